//! # ular-tangga
//!
//! Turn engine for a 2-10 player snakes and ladders game on a 100-cell board.
//!
//! ## Design Principles
//!
//! 1. **One phase at a time**: a turn runs Rolling, Stepping (one tick per
//!    cell), an optional transport jump, then resolution. A single `Phase`
//!    value serializes them; roll requests outside `Idle` are dropped.
//!
//! 2. **Pure transitions**: every phase change is a pure reducer from
//!    `(GameSession, Event)` to a new session plus timers to schedule.
//!
//! 3. **Time behind a trait**: phases are paced by a `Scheduler`. Tests and
//!    benchmarks use a virtual clock; a real-time driver uses the wall clock.
//!
//! ## Modules
//!
//! - `core`: players, session state, configuration, RNG, errors
//! - `board`: transport table (snakes and ladders) and the movement stepper
//! - `dice`: the `Dice` trait with random and scripted dice
//! - `schedule`: the `Scheduler` trait, virtual and wall clocks
//! - `turn`: the reducer and the `TurnEngine` that drives it

pub mod board;
pub mod core;
pub mod dice;
pub mod schedule;
pub mod turn;

// Re-export commonly used types
pub use crate::core::{
    AvatarRef, Direction, EngineConfig, GameRng, GameSession, GameStatus, Phase, Player,
    PlayerId, PlayerSetup, SessionSnapshot, SetupError, TableError, Timings,
};

pub use crate::board::{Cell, Transport, TransportKind, TransportTable, START_CELL, WINNING_CELL};

pub use crate::dice::{Dice, DieValue, RandomDice, ScriptedDice};

pub use crate::schedule::{Scheduler, TimerId, VirtualScheduler, WallClockScheduler};

pub use crate::turn::{SessionObserver, TurnEngine, TurnEngineBuilder};
