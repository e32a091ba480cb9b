//! Engine configuration.
//!
//! `Timings` holds the four delays that pace a turn. `EngineConfig` adds the
//! roster limits and an optional dice seed. Both serialize to JSON with
//! durations written as whole milliseconds.

use std::ops::RangeInclusive;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Playback speeds [`Timings::scaled`] accepts.
pub const SPEED_RANGE: RangeInclusive<f64> = 0.01..=1000.0;

/// Delays between the phases of a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timings {
    /// Dice in flight before the value is revealed.
    #[serde(with = "millis")]
    pub roll_reveal: Duration,

    /// One cell of movement.
    #[serde(with = "millis")]
    pub step: Duration,

    /// Between the "found a ladder/snake" message and the jump.
    #[serde(with = "millis")]
    pub transport_reveal: Duration,

    /// Between the jump and the turn changing hands.
    #[serde(with = "millis")]
    pub transport_settle: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            roll_reveal: Duration::from_millis(1000),
            step: Duration::from_millis(300),
            transport_reveal: Duration::from_millis(800),
            transport_settle: Duration::from_millis(500),
        }
    }
}

impl Timings {
    /// All delays zero. Phases still run in order, they just fire together.
    #[must_use]
    pub const fn instant() -> Self {
        Self {
            roll_reveal: Duration::ZERO,
            step: Duration::ZERO,
            transport_reveal: Duration::ZERO,
            transport_settle: Duration::ZERO,
        }
    }

    /// Play `speed` times faster (or slower below 1.0).
    ///
    /// Speeds outside [`SPEED_RANGE`] (NaN included) leave the timings
    /// unchanged.
    #[must_use]
    pub fn scaled(self, speed: f64) -> Self {
        if !SPEED_RANGE.contains(&speed) {
            return self;
        }
        let scale = |d: Duration| d.div_f64(speed);
        Self {
            roll_reveal: scale(self.roll_reveal),
            step: scale(self.step),
            transport_reveal: scale(self.transport_reveal),
            transport_settle: scale(self.transport_settle),
        }
    }
}

/// Turn engine configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub timings: Timings,

    /// Fewest players `start_game` accepts.
    pub min_players: usize,

    /// Most players `start_game` accepts.
    pub max_players: usize,

    /// Dice seed. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            timings: Timings::default(),
            min_players: 2,
            max_players: 10,
            seed: None,
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn with_timings(mut self, timings: Timings) -> Self {
        self.timings = timings;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the accepted roster size range.
    #[must_use]
    pub fn with_player_limits(mut self, min: usize, max: usize) -> Self {
        assert!(min >= 1, "Must allow at least 1 player");
        assert!(min <= max, "Minimum players must not exceed maximum");
        assert!(max <= 255, "At most 255 players supported");
        self.min_players = min;
        self.max_players = max;
        self
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
