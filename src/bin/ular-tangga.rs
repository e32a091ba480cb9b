//! Headless driver - plays a full game in real time and prints the status line.
//!
//! Every seat rolls as soon as the engine is idle, so this doubles as a
//! smoke test for the timer chain against the wall clock.

use std::path::PathBuf;

use clap::Parser;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use ular_tangga::core::{EngineConfig, GameStatus, Phase, PlayerSetup, SessionSnapshot, SPEED_RANGE};
use ular_tangga::schedule::WallClockScheduler;
use ular_tangga::turn::TurnEngine;

#[derive(Parser)]
#[command(name = "ular-tangga")]
#[command(about = "Autoplay a game of snakes and ladders")]
struct Args {
    /// Number of players
    #[arg(short, long, default_value = "2")]
    players: usize,

    /// Dice seed (for reproducible games)
    #[arg(long)]
    seed: Option<u64>,

    /// Playback speed multiplier; 2.0 halves every delay
    #[arg(long, default_value = "1.0", value_parser = parse_speed)]
    speed: f64,

    /// Engine config as JSON; flags above override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Stop after this many turns without a winner
    #[arg(long, default_value = "1000")]
    max_turns: u32,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_speed(raw: &str) -> Result<f64, String> {
    let speed: f64 = raw.parse().map_err(|e: std::num::ParseFloatError| e.to_string())?;
    if SPEED_RANGE.contains(&speed) {
        Ok(speed)
    } else {
        Err(format!(
            "speed must be between {} and {}",
            SPEED_RANGE.start(),
            SPEED_RANGE.end()
        ))
    }
}

fn load_config(args: &Args) -> Result<EngineConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => EngineConfig::default(),
    };
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    config.timings = config.timings.scaled(args.speed);
    Ok(config)
}

fn print_standings(snapshot: &SessionSnapshot) {
    let line: Vec<String> = snapshot
        .players
        .iter()
        .map(|p| format!("{}@{}", p.name, p.position))
        .collect();
    println!("    [{}]", line.join("  "));
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Silent by default, only show warnings/errors. RUST_LOG wins if set.
    let default_filter = if args.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = load_config(&args)?;
    let mut engine = TurnEngine::builder(config)
        .scheduler(WallClockScheduler::new())
        .build();
    info!(seed = engine.dice().seed(), players = args.players, "starting autoplay");
    for transport in engine.table().transports() {
        debug!(from = transport.from, to = transport.to, kind = %transport.kind(), "board");
    }

    let mut last_message = String::new();
    engine.subscribe(move |snapshot: &SessionSnapshot| {
        if snapshot.message != last_message {
            println!("{}", snapshot.message);
            last_message.clone_from(&snapshot.message);
        }
        if snapshot.phase == Phase::Idle || snapshot.phase == Phase::Finished {
            print_standings(snapshot);
        }
    });

    engine.start_game(PlayerSetup::defaults(args.players))?;

    let mut turns = 0;
    while engine.session().status() == GameStatus::InProgress {
        if engine.session().accepts_roll() {
            if turns == args.max_turns {
                warn!(turns, "no winner, giving up");
                break;
            }
            engine.request_roll();
            turns += 1;
        }

        match engine.next_deadline() {
            Some(wait) => std::thread::sleep(wait),
            None => {
                warn!(phase = ?engine.session().phase(), "nothing scheduled mid-turn");
                break;
            }
        }
        engine.poll();
    }

    if let Some(winner) = engine.session().winner() {
        info!(winner = %winner.name, turns, "finished");
    }
    Ok(())
}
