//! Core engine types: players, session state, RNG, configuration, errors.

pub mod config;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;

pub use config::{EngineConfig, Timings, SPEED_RANGE};
pub use error::{SetupError, TableError};
pub use player::{AvatarRef, Direction, Player, PlayerId, PlayerSetup, DEFAULT_AVATARS, PLAYER_COLORS};
pub use rng::GameRng;
pub use state::{GameSession, GameStatus, Phase, SessionSnapshot, SETUP_MESSAGE};
