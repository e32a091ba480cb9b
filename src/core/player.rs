//! Player identification and per-player board state.
//!
//! ## PlayerId
//!
//! Stable identifier assigned at setup. It is *not* the seat index: turn
//! order is the order of the roster handed to `start_game`.
//!
//! ## PlayerSetup / Player
//!
//! `PlayerSetup` is what the setup layer hands over (presentation fields only).
//! `Player` adds the fields the turn engine owns: `position`,
//! `steps_to_move` and `move_direction`.

use serde::{Deserialize, Serialize};

use crate::board::{Cell, START_CELL};

/// Player identifier, stable for the lifetime of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Opaque reference into the avatar catalog owned by the setup layer.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AvatarRef(pub String);

impl AvatarRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AvatarRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Direction of the per-tick advance.
///
/// Only `Backward` after bouncing off the winning cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

impl Direction {
    /// Signed cell offset of one tick: `+1` or `-1`.
    #[must_use]
    pub const fn offset(self) -> i16 {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }
}

/// Palette used by [`PlayerSetup::defaults`], one color per seat.
pub const PLAYER_COLORS: [&str; 10] = [
    "#CF2A2A", "#1E459F", "#FABD32", "#2E8B57", "#8E44AD",
    "#E67E22", "#16A085", "#C0392B", "#2C3E50", "#D35400",
];

/// Avatar references used by [`PlayerSetup::defaults`].
pub const DEFAULT_AVATARS: [&str; 10] = [
    "tiger", "elephant", "orangutan", "rhino", "hornbill",
    "komodo", "tapir", "gecko", "cobra", "peacock",
];

/// Roster entry handed over by the setup layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSetup {
    pub id: PlayerId,
    pub name: String,
    pub color: String,
    pub avatar: AvatarRef,
}

impl PlayerSetup {
    pub fn new(
        id: PlayerId,
        name: impl Into<String>,
        color: impl Into<String>,
        avatar: AvatarRef,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            color: color.into(),
            avatar,
        }
    }

    /// Default roster for `count` seats: "Player 1", "Player 2", ...
    /// with distinct colors and avatars.
    ///
    /// Seats beyond the palette size reuse colors but still get unique avatars.
    ///
    /// ```
    /// use ular_tangga::core::PlayerSetup;
    ///
    /// let roster = PlayerSetup::defaults(3);
    /// assert_eq!(roster.len(), 3);
    /// assert_eq!(roster[2].name, "Player 3");
    /// ```
    pub fn defaults(count: usize) -> Vec<Self> {
        (0..count)
            .map(|i| {
                let avatar = match DEFAULT_AVATARS.get(i) {
                    Some(name) => AvatarRef::new(*name),
                    None => AvatarRef::new(format!("avatar-{}", i + 1)),
                };
                Self {
                    id: PlayerId::new(i as u8),
                    name: format!("Player {}", i + 1),
                    color: PLAYER_COLORS[i % PLAYER_COLORS.len()].to_string(),
                    avatar,
                }
            })
            .collect()
    }
}

/// A player in a running game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub color: String,
    pub avatar: AvatarRef,

    /// Current cell, 1..=100.
    pub position: Cell,

    /// Ticks left in the current move; 0 when idle.
    pub steps_to_move: u8,

    pub move_direction: Direction,
}

impl Player {
    /// Seat a player on the start cell.
    #[must_use]
    pub fn from_setup(setup: PlayerSetup) -> Self {
        Self {
            id: setup.id,
            name: setup.name,
            color: setup.color,
            avatar: setup.avatar,
            position: START_CELL,
            steps_to_move: 0,
            move_direction: Direction::Forward,
        }
    }

    /// Is a move animation in progress for this player?
    #[must_use]
    pub fn is_moving(&self) -> bool {
        self.steps_to_move > 0
    }
}
