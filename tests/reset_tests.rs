//! Reset and restart behaviour.
//!
//! Includes a scheduler that cannot revoke timers, standing in for a host
//! whose timers keep firing after a reset. The engine's epoch check must keep
//! those stale timers away from the new session.

use std::time::Duration;

use ular_tangga::core::{EngineConfig, GameStatus, Phase, PlayerSetup, SETUP_MESSAGE};
use ular_tangga::dice::ScriptedDice;
use ular_tangga::schedule::{Scheduler, TimerId, VirtualScheduler};
use ular_tangga::turn::{Scheduled, TurnEngine};

/// Scheduler whose `cancel_all` silently does nothing.
#[derive(Default)]
struct LeakyScheduler {
    inner: VirtualScheduler<Scheduled>,
}

impl Scheduler<Scheduled> for LeakyScheduler {
    fn now(&self) -> Duration {
        self.inner.now()
    }

    fn schedule_after(&mut self, delay: Duration, item: Scheduled) -> TimerId {
        self.inner.schedule_after(delay, item)
    }

    fn cancel_all(&mut self) -> usize {
        0
    }

    fn pending(&self) -> usize {
        self.inner.pending()
    }

    fn next_deadline(&self) -> Option<Duration> {
        self.inner.next_deadline()
    }

    fn pop_due(&mut self, until: Duration) -> Option<Scheduled> {
        self.inner.pop_due(until)
    }

    fn catch_up(&mut self, until: Duration) {
        self.inner.catch_up(until)
    }
}

#[test]
fn test_reset_returns_to_setup() {
    let mut engine = TurnEngine::builder(EngineConfig::default())
        .dice(ScriptedDice::new([4]))
        .build();
    engine.start_game(PlayerSetup::defaults(3)).unwrap();
    engine.play_turn();

    engine.reset_game();
    let snapshot = engine.snapshot();
    assert_eq!(snapshot.status, GameStatus::NotStarted);
    assert!(snapshot.players.is_empty());
    assert_eq!(snapshot.current_player_index, 0);
    assert_eq!(snapshot.dice_value, 1);
    assert!(snapshot.winner.is_none());
    assert_eq!(snapshot.message, SETUP_MESSAGE);
    assert!(!engine.request_roll());
}

#[test]
fn test_stale_timers_cannot_touch_new_game() {
    let mut engine = TurnEngine::builder(EngineConfig::default())
        .dice(ScriptedDice::new([6, 1]))
        .scheduler(LeakyScheduler::default())
        .build();
    engine.start_game(PlayerSetup::defaults(2)).unwrap();

    // Mid-move: one step timer is outstanding and cannot be cancelled.
    engine.request_roll();
    engine.advance(Duration::from_millis(1300));
    assert_eq!(engine.session().phase(), Phase::Stepping);
    let epoch = engine.epoch();

    engine.reset_game();
    assert_eq!(engine.epoch(), epoch + 1);
    assert_eq!(engine.pending_timers(), 1, "the leaky scheduler kept the step timer");

    // Fresh game, then let the stale timer come due.
    engine.start_game(PlayerSetup::defaults(2)).unwrap();
    let fresh = engine.snapshot();
    assert_eq!(engine.advance(Duration::from_secs(5)), 0);
    assert_eq!(engine.snapshot(), fresh);
    assert!(engine.session().players().iter().all(|p| p.position == 1));

    // The new game still plays normally. The scripted die moves on to 1: 1 -> 2 -> ladder 38.
    assert!(engine.play_turn());
    assert_eq!(engine.session().players()[0].position, 38);
}

#[test]
fn test_stale_timer_on_empty_session_is_dropped() {
    let mut engine = TurnEngine::builder(EngineConfig::default())
        .dice(ScriptedDice::new([3]))
        .scheduler(LeakyScheduler::default())
        .build();
    engine.start_game(PlayerSetup::defaults(2)).unwrap();
    engine.request_roll();
    engine.reset_game();

    assert_eq!(engine.settle(), 0);
    assert_eq!(engine.session().status(), GameStatus::NotStarted);
    assert!(engine.session().players().is_empty());
}

#[test]
fn test_restart_after_game_over() {
    // Player 1 rolls 1 onto the ladder 2 -> 100 on this board.
    let table = ular_tangga::board::TransportTable::new([(2, 100)]).unwrap();
    let mut engine = TurnEngine::builder(EngineConfig::default())
        .table(table)
        .dice(ScriptedDice::new([1]))
        .build();
    engine.start_game(PlayerSetup::defaults(2)).unwrap();
    engine.play_turn();
    assert_eq!(engine.session().status(), GameStatus::GameOver);

    engine.start_game(PlayerSetup::defaults(4)).unwrap();
    let session = engine.session();
    assert_eq!(session.status(), GameStatus::InProgress);
    assert_eq!(session.players().len(), 4);
    assert!(session.winner().is_none());
    assert_eq!(session.message(), "Player 1's turn to roll!");
}

#[test]
fn test_config_limits_roster() {
    let config = EngineConfig::default().with_player_limits(2, 4);
    let mut engine = TurnEngine::new(config);
    assert!(engine.start_game(PlayerSetup::defaults(5)).is_err());
    assert!(engine.start_game(PlayerSetup::defaults(4)).is_ok());
}
