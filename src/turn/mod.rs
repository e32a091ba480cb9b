//! Turn coordination.
//!
//! - `reducer`: pure `(session, event) -> (session, timers)` transitions.
//! - `engine`: [`TurnEngine`], which owns the session and feeds the reducer
//!   from roll requests and fired timers.

pub mod engine;
pub mod reducer;

pub use engine::{Scheduled, SessionObserver, TurnEngine, TurnEngineBuilder};
pub use reducer::{reduce, Command, Commands, Event, Reduction, Rules, Transition};
