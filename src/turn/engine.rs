//! The turn engine.
//!
//! `TurnEngine` owns the session and is the only thing that mutates it. Each
//! external request or fired timer goes through [`reduce`]; accepted
//! reductions replace the session, schedule their follow-up timers and
//! notify observers.
//!
//! ## Mutual exclusion
//!
//! A roll request is only accepted while the phase is `Idle`. Everything
//! after that is timer-driven, so a second request arriving mid-turn (a
//! double click, say) is dropped, never queued.
//!
//! ## Reset
//!
//! `reset_game` cancels every pending timer and bumps the session epoch.
//! Timers carry the epoch they were scheduled in and are dropped on delivery
//! if it no longer matches, so a timer the scheduler could not cancel can
//! never touch the fresh session.
//!
//! ## Example
//!
//! ```
//! use std::time::Duration;
//! use ular_tangga::core::{EngineConfig, Phase, PlayerSetup};
//! use ular_tangga::dice::ScriptedDice;
//! use ular_tangga::turn::TurnEngine;
//!
//! let mut engine = TurnEngine::builder(EngineConfig::default())
//!     .dice(ScriptedDice::new([3]))
//!     .build();
//! engine.start_game(PlayerSetup::defaults(2)).unwrap();
//!
//! assert!(engine.request_roll());
//! assert!(!engine.request_roll(), "already rolling");
//!
//! engine.advance(Duration::from_millis(1000));
//! assert_eq!(engine.session().dice_value(), 3);
//!
//! engine.advance(Duration::from_millis(900));
//! assert_eq!(engine.session().players()[0].position, 4);
//! assert_eq!(engine.session().phase(), Phase::Idle);
//! assert_eq!(engine.session().current_player_index(), 1);
//! ```

use std::time::Duration;

use tracing::{debug, info, trace};

use super::reducer::{reduce, Command, Event, Reduction, Rules, Transition};
use crate::board::TransportTable;
use crate::core::{EngineConfig, GameSession, GameStatus, Phase, PlayerSetup, SessionSnapshot, SetupError};
use crate::dice::{Dice, RandomDice};
use crate::schedule::{Scheduler, VirtualScheduler};

/// A transition waiting in the scheduler, tagged with the epoch it belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Scheduled {
    pub epoch: u64,
    pub transition: Transition,
}

/// Receives a snapshot after every accepted change.
pub trait SessionObserver {
    fn session_changed(&mut self, snapshot: &SessionSnapshot);
}

impl<F: FnMut(&SessionSnapshot)> SessionObserver for F {
    fn session_changed(&mut self, snapshot: &SessionSnapshot) {
        self(snapshot)
    }
}

/// Builder for a [`TurnEngine`].
///
/// Defaults to the standard board, seeded dice from the config, and a
/// virtual clock.
pub struct TurnEngineBuilder<D = RandomDice, S = VirtualScheduler<Scheduled>> {
    config: EngineConfig,
    table: TransportTable,
    dice: D,
    scheduler: S,
}

impl TurnEngineBuilder {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            dice: RandomDice::from_seed(config.seed),
            table: TransportTable::standard().clone(),
            scheduler: VirtualScheduler::new(),
            config,
        }
    }
}

impl<D: Dice, S: Scheduler<Scheduled>> TurnEngineBuilder<D, S> {
    /// Play on a different board.
    #[must_use]
    pub fn table(mut self, table: TransportTable) -> Self {
        self.table = table;
        self
    }

    pub fn dice<E: Dice>(self, dice: E) -> TurnEngineBuilder<E, S> {
        TurnEngineBuilder {
            config: self.config,
            table: self.table,
            dice,
            scheduler: self.scheduler,
        }
    }

    pub fn scheduler<T: Scheduler<Scheduled>>(self, scheduler: T) -> TurnEngineBuilder<D, T> {
        TurnEngineBuilder {
            config: self.config,
            table: self.table,
            dice: self.dice,
            scheduler,
        }
    }

    pub fn build(self) -> TurnEngine<D, S> {
        TurnEngine {
            config: self.config,
            table: self.table,
            dice: self.dice,
            scheduler: self.scheduler,
            session: GameSession::new(),
            epoch: 0,
            observers: Vec::new(),
        }
    }
}

/// Drives turns for one game session.
pub struct TurnEngine<D = RandomDice, S = VirtualScheduler<Scheduled>> {
    config: EngineConfig,
    table: TransportTable,
    dice: D,
    scheduler: S,
    session: GameSession,
    epoch: u64,
    observers: Vec<Box<dyn SessionObserver>>,
}

impl TurnEngine {
    /// Engine on the standard board with a virtual clock.
    pub fn new(config: EngineConfig) -> Self {
        TurnEngineBuilder::new(config).build()
    }

    pub fn builder(config: EngineConfig) -> TurnEngineBuilder {
        TurnEngineBuilder::new(config)
    }
}

impl<D: Dice, S: Scheduler<Scheduled>> TurnEngine<D, S> {
    // === Requests ===

    /// Seat `roster` and hand the first turn to its first entry.
    ///
    /// Refused while a game is in progress. Starting over a finished game
    /// resets it first.
    pub fn start_game(&mut self, roster: Vec<PlayerSetup>) -> Result<(), SetupError> {
        match self.session.status() {
            GameStatus::InProgress => return Err(SetupError::AlreadyStarted),
            GameStatus::GameOver => self.clear_timers(),
            GameStatus::NotStarted => {}
        }

        let session = self.session.start(roster, &self.config)?;
        info!(players = session.players().len(), epoch = self.epoch, "game started");
        self.commit(session);
        Ok(())
    }

    /// Roll for the active player.
    ///
    /// Returns `false`, with no effect at all, unless a game is in progress
    /// and the engine is idle.
    pub fn request_roll(&mut self) -> bool {
        if !self.session.accepts_roll() {
            debug!(
                status = ?self.session.status(),
                phase = ?self.session.phase(),
                "roll request ignored"
            );
            return false;
        }
        let value = self.dice.roll();
        self.dispatch(Event::RollRequested(value))
    }

    /// Drop pending timers and return to an empty, not-started session.
    pub fn reset_game(&mut self) {
        self.clear_timers();
        info!(epoch = self.epoch, "game reset");
        let session = self.session.reset();
        self.commit(session);
    }

    /// Subscribe to session changes.
    pub fn subscribe(&mut self, observer: impl SessionObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    // === Time ===

    /// Move the clock forward by `elapsed`, firing every transition that
    /// comes due. Returns the number of transitions applied.
    ///
    /// A real clock cannot be moved: there this fires only what is due by
    /// now, the same as [`TurnEngine::poll`].
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        let until = self.scheduler.now() + elapsed;
        self.run_until(until)
    }

    /// Fire whatever is due at the scheduler's current time.
    pub fn poll(&mut self) -> usize {
        let now = self.scheduler.now();
        self.run_until(now)
    }

    /// Fire every pending transition in order until nothing is scheduled.
    ///
    /// A virtual clock jumps straight to each deadline. A real clock sleeps
    /// until it.
    pub fn settle(&mut self) -> usize {
        let mut fired = 0;
        while let Some(deadline) = self.scheduler.next_deadline() {
            self.scheduler.wait_until(deadline);
            fired += self.run_until(deadline);
        }
        fired
    }

    /// Roll and fast-forward through the whole turn.
    pub fn play_turn(&mut self) -> bool {
        if !self.request_roll() {
            return false;
        }
        self.settle();
        true
    }

    /// Time until the next pending transition.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        let now = self.scheduler.now();
        self.scheduler
            .next_deadline()
            .map(|deadline| deadline.saturating_sub(now))
    }

    // === Observation ===

    #[must_use]
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.session.snapshot()
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn table(&self) -> &TransportTable {
        &self.table
    }

    #[must_use]
    pub fn dice(&self) -> &D {
        &self.dice
    }

    #[must_use]
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending()
    }

    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    // === Internals ===

    fn run_until(&mut self, until: Duration) -> usize {
        let mut fired = 0;
        while let Some(Scheduled { epoch, transition }) = self.scheduler.pop_due(until) {
            if epoch != self.epoch {
                debug!(?transition, stale_epoch = epoch, epoch = self.epoch, "stale timer dropped");
                continue;
            }
            if self.dispatch(Event::Timer(transition)) {
                fired += 1;
            }
        }
        self.scheduler.catch_up(until);
        fired
    }

    fn dispatch(&mut self, event: Event) -> bool {
        let rules = Rules {
            table: &self.table,
            timings: &self.config.timings,
        };
        let mover = self.session.active_player().map(|p| p.id);
        let Some(Reduction { session, commands }) = reduce(&self.session, event, &rules) else {
            debug!(?event, phase = ?self.session.phase(), "transition ignored");
            return false;
        };

        for command in commands {
            match command {
                Command::Schedule { after, transition } => {
                    let timer = self.scheduler.schedule_after(
                        after,
                        Scheduled {
                            epoch: self.epoch,
                            transition,
                        },
                    );
                    trace!(%timer, ?transition, ?after, "scheduled");
                }
            }
        }

        if event == Event::Timer(Transition::Step) {
            // The turn may already have passed on; report whoever moved.
            if let Some(player) = mover.and_then(|id| session.player(id)) {
                trace!(player = %player.name, position = player.position, steps_left = player.steps_to_move, "tick");
            }
        }
        self.commit(session);
        true
    }

    fn commit(&mut self, session: GameSession) {
        let from = self.session.phase();
        let to = session.phase();
        if from != to {
            debug!(?from, ?to, message = session.message(), "phase changed");
        }
        if to == Phase::Finished && from != Phase::Finished {
            if let Some(winner) = session.winner() {
                info!(winner = %winner.name, "game over");
            }
        }

        self.session = session;

        if !self.observers.is_empty() {
            let snapshot = self.session.snapshot();
            for observer in &mut self.observers {
                observer.session_changed(&snapshot);
            }
        }
    }

    fn clear_timers(&mut self) {
        let dropped = self.scheduler.cancel_all();
        self.epoch += 1;
        if dropped > 0 {
            debug!(dropped, epoch = self.epoch, "pending timers cancelled");
        }
    }
}
