//! Pure turn transitions.
//!
//! `reduce` maps a session and an event to the next session plus the timers
//! the caller must schedule. It never reads the clock and never rolls dice,
//! so every phase can be unit tested without timers.
//!
//! ```text
//! Idle --RollRequested--> Rolling --RevealRoll--> Stepping --Step x N-->
//!     cell 100:          TurnResolution -> Finished
//!     transport source:  ResolvingTransport --Relocate--> TurnResolution --Settle-->
//!     plain cell:        TurnResolution
//! TurnResolution -> Idle (next player) | Finished (resting on 100)
//! ```
//!
//! A `None` result means the event failed its guard and has no effect.

use std::time::Duration;

use smallvec::SmallVec;

use crate::board::{stepper, TransportTable, WINNING_CELL};
use crate::core::{Direction, GameSession, GameStatus, Phase, Timings};
use crate::dice::{DieValue, DIE_FACES};

/// Timer-driven transitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Transition {
    /// Roll reveal delay elapsed.
    RevealRoll,
    /// One movement tick.
    Step,
    /// Transport reveal delay elapsed: jump to the destination.
    Relocate,
    /// Post-jump delay elapsed: resolve the turn.
    Settle,
}

/// Inputs to the reducer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    /// The active player asked to roll; the die came up with this value.
    RollRequested(DieValue),
    Timer(Transition),
}

/// Side effects requested by a reduction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Schedule { after: Duration, transition: Transition },
}

pub type Commands = SmallVec<[Command; 1]>;

/// Read-only context a reduction runs against.
#[derive(Clone, Copy, Debug)]
pub struct Rules<'a> {
    pub table: &'a TransportTable,
    pub timings: &'a Timings,
}

/// Result of an accepted event.
#[derive(Clone, Debug)]
pub struct Reduction {
    pub session: GameSession,
    pub commands: Commands,
}

/// Apply `event` to `session`.
pub fn reduce(session: &GameSession, event: Event, rules: &Rules<'_>) -> Option<Reduction> {
    let mut next = session.clone();
    let mut commands = Commands::new();

    match event {
        Event::RollRequested(value) => request_roll(&mut next, value, rules, &mut commands)?,
        Event::Timer(Transition::RevealRoll) => reveal_roll(&mut next, rules, &mut commands)?,
        Event::Timer(Transition::Step) => step(&mut next, rules, &mut commands)?,
        Event::Timer(Transition::Relocate) => relocate(&mut next, rules, &mut commands)?,
        Event::Timer(Transition::Settle) => {
            if next.phase != Phase::TurnResolution {
                return None;
            }
            resolve_turn(&mut next)?;
        }
    }

    next.revision += 1;
    Some(Reduction { session: next, commands })
}

fn schedule(commands: &mut Commands, after: Duration, transition: Transition) {
    commands.push(Command::Schedule { after, transition });
}

fn request_roll(
    s: &mut GameSession,
    value: DieValue,
    rules: &Rules<'_>,
    commands: &mut Commands,
) -> Option<()> {
    if !s.accepts_roll() || !DIE_FACES.contains(&value) {
        return None;
    }
    let name = s.active_player()?.name.clone();

    s.phase = Phase::Rolling;
    s.pending_roll = Some(value);
    s.message = format!("{name} is rolling...");
    schedule(commands, rules.timings.roll_reveal, Transition::RevealRoll);
    Some(())
}

fn reveal_roll(s: &mut GameSession, rules: &Rules<'_>, commands: &mut Commands) -> Option<()> {
    if s.phase != Phase::Rolling {
        return None;
    }
    let value = s.pending_roll.take()?;
    let player = s.players.get_mut(s.current_player_index)?;
    player.steps_to_move = value;
    player.move_direction = Direction::Forward;
    let message = format!("{} rolled a {value}!", player.name);

    s.dice_value = value;
    s.message = message;
    s.phase = Phase::Stepping;
    schedule(commands, rules.timings.step, Transition::Step);
    Some(())
}

fn step(s: &mut GameSession, rules: &Rules<'_>, commands: &mut Commands) -> Option<()> {
    if s.phase != Phase::Stepping {
        return None;
    }
    let player = s.players.get_mut(s.current_player_index)?;
    if !player.is_moving() {
        return None;
    }

    if stepper::advance(player) {
        schedule(commands, rules.timings.step, Transition::Step);
        Some(())
    } else {
        land(s, rules, commands)
    }
}

/// Movement finished: look for a transport unless the player is home.
fn land(s: &mut GameSession, rules: &Rules<'_>, commands: &mut Commands) -> Option<()> {
    let player = s.active_player()?;
    if player.position == WINNING_CELL {
        return resolve_turn(s);
    }

    match rules.table.lookup(player.position) {
        Some(transport) => {
            s.message = format!("{} found a {}!", player.name, transport.kind());
            s.phase = Phase::ResolvingTransport;
            s.pending_transport = Some(transport);
            schedule(commands, rules.timings.transport_reveal, Transition::Relocate);
            Some(())
        }
        None => resolve_turn(s),
    }
}

fn relocate(s: &mut GameSession, rules: &Rules<'_>, commands: &mut Commands) -> Option<()> {
    if s.phase != Phase::ResolvingTransport {
        return None;
    }
    let transport = s.pending_transport.take()?;
    let player = s.players.get_mut(s.current_player_index)?;
    player.position = transport.to;

    s.phase = Phase::TurnResolution;
    schedule(commands, rules.timings.transport_settle, Transition::Settle);
    Some(())
}

/// Win check on the resting cell, otherwise pass the turn on.
fn resolve_turn(s: &mut GameSession) -> Option<()> {
    s.phase = Phase::TurnResolution;
    let player = s.active_player()?.clone();

    if player.position == WINNING_CELL {
        s.status = GameStatus::GameOver;
        s.phase = Phase::Finished;
        s.message = format!("Congratulations, {} Wins!", player.name);
        s.winner = Some(player);
    } else {
        s.current_player_index = (s.current_player_index + 1) % s.players.len();
        s.phase = Phase::Idle;
        let next = s.active_player()?;
        s.message = format!("{}'s turn to roll.", next.name);
    }
    Some(())
}
