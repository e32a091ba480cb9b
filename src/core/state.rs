//! Game session state.
//!
//! ## GameSession
//!
//! The authoritative state of one game: roster, whose turn it is, the
//! overall status, the current phase of the turn and the status message.
//! Players are held in an `im::Vector` so every reducer step can return a
//! fresh session in O(1).
//!
//! ## Phase
//!
//! A single phase value drives the turn. `is_rolling` and `is_moving` are
//! derived from it for consumers that want the flags.
//!
//! ## SessionSnapshot
//!
//! Serializable, read-only view handed to observers. It never includes the
//! pending roll before it is revealed.

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::config::EngineConfig;
use super::error::SetupError;
use super::player::{Player, PlayerId, PlayerSetup};
use crate::board::Transport;
use crate::dice::DieValue;

/// Message shown before a game starts and after a reset.
pub const SETUP_MESSAGE: &str = "Setup your game to start.";

/// Overall game status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    #[default]
    NotStarted,
    InProgress,
    GameOver,
}

/// Where the active turn is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for a roll request.
    #[default]
    Idle,
    /// Dice in flight.
    Rolling,
    /// Moving one cell per tick.
    Stepping,
    /// Landed on a transport; the jump is pending.
    ResolvingTransport,
    /// Turn outcome being decided.
    TurnResolution,
    /// Someone won.
    Finished,
}

impl Phase {
    #[must_use]
    pub fn is_rolling(self) -> bool {
        self == Phase::Rolling
    }

    /// True from the roll request until the turn has resolved.
    #[must_use]
    pub fn is_moving(self) -> bool {
        matches!(
            self,
            Phase::Rolling | Phase::Stepping | Phase::ResolvingTransport | Phase::TurnResolution
        )
    }
}

/// The authoritative game state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameSession {
    pub(crate) players: Vector<Player>,
    pub(crate) current_player_index: usize,
    pub(crate) status: GameStatus,
    pub(crate) phase: Phase,
    pub(crate) winner: Option<Player>,
    pub(crate) dice_value: DieValue,
    pub(crate) message: String,

    /// Rolled but not yet revealed.
    pub(crate) pending_roll: Option<DieValue>,

    /// Found on the resting cell, jump not yet applied.
    pub(crate) pending_transport: Option<Transport>,

    /// Bumped on every accepted change.
    pub(crate) revision: u64,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    /// An empty, not-yet-started session.
    #[must_use]
    pub fn new() -> Self {
        Self {
            players: Vector::new(),
            current_player_index: 0,
            status: GameStatus::NotStarted,
            phase: Phase::Idle,
            winner: None,
            dice_value: 1,
            message: SETUP_MESSAGE.to_string(),
            pending_roll: None,
            pending_transport: None,
            revision: 0,
        }
    }

    /// Seat a validated roster on cell 1 and hand the first turn to seat 0.
    ///
    /// Only the roster is checked here; whether a game may start at all is
    /// up to the caller.
    pub fn start(&self, roster: Vec<PlayerSetup>, config: &EngineConfig) -> Result<Self, SetupError> {
        validate_roster(&roster, config)?;

        let players: Vector<Player> = roster.into_iter().map(Player::from_setup).collect();
        let message = players
            .front()
            .map(|first| format!("{}'s turn to roll!", first.name))
            .unwrap_or_default();

        Ok(Self {
            players,
            status: GameStatus::InProgress,
            message,
            revision: self.revision + 1,
            ..Self::new()
        })
    }

    /// Back to an empty `NotStarted` session, keeping the revision counter.
    #[must_use]
    pub fn reset(&self) -> Self {
        Self {
            revision: self.revision + 1,
            ..Self::new()
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn players(&self) -> &Vector<Player> {
        &self.players
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Player whose turn it is. `None` before a game starts.
    #[must_use]
    pub fn active_player(&self) -> Option<&Player> {
        self.players.get(self.current_player_index)
    }

    #[must_use]
    pub fn current_player_index(&self) -> usize {
        self.current_player_index
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn winner(&self) -> Option<&Player> {
        self.winner.as_ref()
    }

    /// Last revealed roll.
    #[must_use]
    pub fn dice_value(&self) -> DieValue {
        self.dice_value
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[must_use]
    pub fn is_rolling(&self) -> bool {
        self.phase.is_rolling()
    }

    #[must_use]
    pub fn is_moving(&self) -> bool {
        self.phase.is_moving()
    }

    /// Would a roll request be accepted right now?
    #[must_use]
    pub fn accepts_roll(&self) -> bool {
        self.status == GameStatus::InProgress && self.phase == Phase::Idle && !self.players.is_empty()
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            players: self.players.iter().cloned().collect(),
            current_player_index: self.current_player_index,
            status: self.status,
            phase: self.phase,
            winner: self.winner.clone(),
            dice_value: self.dice_value,
            is_rolling: self.is_rolling(),
            is_moving: self.is_moving(),
            message: self.message.clone(),
            revision: self.revision,
        }
    }
}

fn validate_roster(roster: &[PlayerSetup], config: &EngineConfig) -> Result<(), SetupError> {
    let count = roster.len();
    if count < config.min_players || count > config.max_players {
        return Err(SetupError::PlayerCount {
            count,
            min: config.min_players,
            max: config.max_players,
        });
    }

    let mut ids = FxHashSet::default();
    let mut avatars = FxHashSet::default();
    for setup in roster {
        if !ids.insert(setup.id) {
            return Err(SetupError::DuplicateId { id: setup.id });
        }
        if setup.name.trim().is_empty() {
            return Err(SetupError::EmptyName { id: setup.id });
        }
        if !avatars.insert(&setup.avatar) {
            return Err(SetupError::DuplicateAvatar {
                avatar: setup.avatar.clone(),
            });
        }
    }

    Ok(())
}

/// Read-only view of a session for presentation layers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub players: Vec<Player>,
    pub current_player_index: usize,
    pub status: GameStatus,
    pub phase: Phase,
    pub winner: Option<Player>,
    pub dice_value: DieValue,
    pub is_rolling: bool,
    pub is_moving: bool,
    pub message: String,
    pub revision: u64,
}

impl SessionSnapshot {
    /// Player whose turn it is.
    #[must_use]
    pub fn active_player(&self) -> Option<&Player> {
        self.players.get(self.current_player_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::player::AvatarRef;

    fn config() -> EngineConfig {
        EngineConfig::default()
    }

    #[test]
    fn test_new_session() {
        let session = GameSession::new();

        assert_eq!(session.status(), GameStatus::NotStarted);
        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.players().is_empty());
        assert!(session.active_player().is_none());
        assert_eq!(session.dice_value(), 1);
        assert_eq!(session.message(), SETUP_MESSAGE);
        assert!(!session.accepts_roll());
    }

    #[test]
    fn test_start_seats_everyone_on_first_cell() {
        let session = GameSession::new().start(PlayerSetup::defaults(4), &config()).unwrap();

        assert_eq!(session.status(), GameStatus::InProgress);
        assert_eq!(session.current_player_index(), 0);
        assert_eq!(session.players().len(), 4);
        assert!(session.players().iter().all(|p| p.position == 1 && p.steps_to_move == 0));
        assert_eq!(session.message(), "Player 1's turn to roll!");
        assert_eq!(session.revision(), 1);
        assert!(session.accepts_roll());
    }

    #[test]
    fn test_start_rejects_player_count() {
        let err = GameSession::new().start(PlayerSetup::defaults(1), &config()).unwrap_err();
        assert_eq!(err, SetupError::PlayerCount { count: 1, min: 2, max: 10 });

        let err = GameSession::new().start(PlayerSetup::defaults(11), &config()).unwrap_err();
        assert_eq!(err, SetupError::PlayerCount { count: 11, min: 2, max: 10 });
    }

    #[test]
    fn test_start_rejects_blank_name() {
        let mut roster = PlayerSetup::defaults(3);
        roster[1].name = "   ".to_string();

        let err = GameSession::new().start(roster, &config()).unwrap_err();
        assert_eq!(err, SetupError::EmptyName { id: PlayerId::new(1) });
    }

    #[test]
    fn test_start_rejects_shared_avatar() {
        let mut roster = PlayerSetup::defaults(3);
        roster[2].avatar = roster[0].avatar.clone();

        let err = GameSession::new().start(roster, &config()).unwrap_err();
        assert_eq!(err, SetupError::DuplicateAvatar { avatar: AvatarRef::new("tiger") });
    }

    #[test]
    fn test_start_rejects_duplicate_id() {
        let mut roster = PlayerSetup::defaults(2);
        roster[1].id = roster[0].id;

        let err = GameSession::new().start(roster, &config()).unwrap_err();
        assert_eq!(err, SetupError::DuplicateId { id: PlayerId::new(0) });
    }

    #[test]
    fn test_reset_clears_everything_but_revision() {
        let started = GameSession::new().start(PlayerSetup::defaults(2), &config()).unwrap();
        let reset = started.reset();

        assert_eq!(reset.status(), GameStatus::NotStarted);
        assert!(reset.players().is_empty());
        assert_eq!(reset.message(), SETUP_MESSAGE);
        assert_eq!(reset.revision(), started.revision() + 1);
    }

    #[test]
    fn test_phase_flags() {
        assert!(!Phase::Idle.is_moving());
        assert!(Phase::Rolling.is_rolling());
        assert!(Phase::Rolling.is_moving());
        assert!(!Phase::Stepping.is_rolling());
        assert!(Phase::Stepping.is_moving());
        assert!(Phase::ResolvingTransport.is_moving());
        assert!(Phase::TurnResolution.is_moving());
        assert!(!Phase::Finished.is_moving());
    }

    #[test]
    fn test_lookup_by_id() {
        let mut roster = PlayerSetup::defaults(2);
        roster[0].id = PlayerId::new(40);
        roster[1].id = PlayerId::new(7);
        let session = GameSession::new().start(roster, &config()).unwrap();

        assert_eq!(session.player(PlayerId::new(7)).unwrap().name, "Player 2");
        assert!(session.player(PlayerId::new(0)).is_none());
    }

    #[test]
    fn test_snapshot_serialization() {
        let session = GameSession::new().start(PlayerSetup::defaults(2), &config()).unwrap();
        let snapshot = session.snapshot();

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["status"], "IN_PROGRESS");
        assert_eq!(json["is_rolling"], false);

        let back: SessionSnapshot = serde_json::from_value(json).unwrap();
        assert_eq!(back, snapshot);
        assert_eq!(back.active_player().unwrap().name, "Player 1");
    }
}
