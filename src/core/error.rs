//! Errors for the two fallible surfaces: roster setup and table construction.
//!
//! Turn transitions never fail. A request that does not pass its guard is
//! dropped without an error.

use crate::board::Cell;
use crate::core::player::{AvatarRef, PlayerId};

/// Reasons a roster is refused by `start_game`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("{count} players requested, expected {min} to {max}")]
    PlayerCount { count: usize, min: usize, max: usize },

    #[error("{id} has an empty name")]
    EmptyName { id: PlayerId },

    #[error("avatar {avatar} is chosen by more than one player")]
    DuplicateAvatar { avatar: AvatarRef },

    #[error("{id} appears more than once in the roster")]
    DuplicateId { id: PlayerId },

    #[error("a game is already in progress")]
    AlreadyStarted,
}

/// Reasons a transport table is refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("transport starts on cell {cell}, expected 1 to 99")]
    SourceOutOfRange { cell: Cell },

    #[error("transport ends on cell {cell}, expected 2 to 100")]
    DestinationOutOfRange { cell: Cell },

    #[error("transport on cell {cell} leads back to itself")]
    SelfLoop { cell: Cell },

    #[error("cell {cell} has more than one transport")]
    DuplicateSource { cell: Cell },
}
