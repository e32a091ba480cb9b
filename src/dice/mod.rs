//! Dice.
//!
//! The engine asks a [`Dice`] for one value per accepted roll request. The
//! value stays hidden for the roll reveal delay before the turn reducer
//! applies it.
//!
//! - [`RandomDice`]: uniform rolls from a seeded [`GameRng`].
//! - [`ScriptedDice`]: a fixed sequence, repeated. Used by tests, benchmarks
//!   and replays.

use std::ops::RangeInclusive;

use crate::core::GameRng;

/// Value shown on a die face.
pub type DieValue = u8;

/// Faces of a six-sided die.
pub const DIE_FACES: RangeInclusive<DieValue> = 1..=6;

/// Source of die rolls.
///
/// Each call is independent; implementations must return a value in
/// [`DIE_FACES`].
pub trait Dice {
    fn roll(&mut self) -> DieValue;
}

impl<D: Dice + ?Sized> Dice for Box<D> {
    fn roll(&mut self) -> DieValue {
        (**self).roll()
    }
}

/// Uniform six-sided die.
#[derive(Clone, Debug)]
pub struct RandomDice {
    rng: GameRng,
}

impl RandomDice {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self { rng: GameRng::new(seed) }
    }

    #[must_use]
    pub fn from_entropy() -> Self {
        Self { rng: GameRng::from_entropy() }
    }

    /// Seeded when `seed` is set, from entropy otherwise.
    #[must_use]
    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::new)
    }

    /// Seed to replay this die's sequence.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }
}

impl Dice for RandomDice {
    fn roll(&mut self) -> DieValue {
        self.rng.roll_die()
    }
}

/// Rolls a fixed sequence, starting over when it runs out.
///
/// ```
/// use ular_tangga::dice::{Dice, ScriptedDice};
///
/// let mut dice = ScriptedDice::new([6, 1]);
/// assert_eq!(dice.roll(), 6);
/// assert_eq!(dice.roll(), 1);
/// assert_eq!(dice.roll(), 6);
/// ```
#[derive(Clone, Debug)]
pub struct ScriptedDice {
    rolls: Vec<DieValue>,
    cursor: usize,
}

impl ScriptedDice {
    pub fn new(rolls: impl IntoIterator<Item = DieValue>) -> Self {
        let rolls: Vec<_> = rolls.into_iter().collect();
        assert!(!rolls.is_empty(), "Scripted dice need at least one roll");
        assert!(
            rolls.iter().all(|r| DIE_FACES.contains(r)),
            "Scripted rolls must be between 1 and 6"
        );
        Self { rolls, cursor: 0 }
    }

    /// Number of rolls handed out so far.
    #[must_use]
    pub fn rolled(&self) -> usize {
        self.cursor
    }
}

impl Dice for ScriptedDice {
    fn roll(&mut self) -> DieValue {
        let value = self.rolls[self.cursor % self.rolls.len()];
        self.cursor += 1;
        value
    }
}
