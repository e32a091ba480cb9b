//! The 100-cell board: the fixed transport table and single-cell movement.
//!
//! Cells are numbered 1..=100. Every player starts on [`START_CELL`]; the
//! first to rest exactly on [`WINNING_CELL`] wins.

pub mod stepper;
pub mod transport;

pub use stepper::{landing_cell, tick};
pub use transport::{Transport, TransportKind, TransportTable, STANDARD_LADDERS, STANDARD_SNAKES};

/// A board cell number.
pub type Cell = u8;

/// Where every player starts.
pub const START_CELL: Cell = 1;

/// Resting here ends the game.
pub const WINNING_CELL: Cell = 100;
