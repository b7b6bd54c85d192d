//! Dodge Arena headless runner
//!
//! Drives the simulation at a fixed tick rate without any window: useful for
//! watching the dodger in the logs (`RUST_LOG=debug`) or for replaying a seed.

use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;

use dodge_arena::GameConfig;
use dodge_arena::ai::{DecisionSource, HeuristicEngine, HumanInput, LearnedPolicy, LinearPolicy};
use dodge_arena::sim::{GameEvent, GamePhase, GameState, Outcome, Slot, TickInput, tick};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum AiKind {
    Heuristic,
    Learned,
}

#[derive(Parser)]
#[command(name = "dodge-arena")]
#[command(about = "Run a headless Dodge Arena round")]
struct Args {
    /// Session seed (defaults to the current time)
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many playing ticks even if nobody was hit
    #[arg(long, default_value_t = 18_000)]
    max_ticks: u64,

    /// JSON config file (missing fields use defaults)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Decision source for the autonomous player
    #[arg(long, value_enum, default_value_t = AiKind::Heuristic)]
    ai: AiKind,

    /// Linear policy weights (JSON) for `--ai learned`
    #[arg(long)]
    policy: Option<PathBuf>,

    /// Let a second heuristic dodger play the human slot instead of standing still
    #[arg(long)]
    autopilot_human: bool,

    /// Sleep between ticks to run at the configured tick rate
    #[arg(long)]
    realtime: bool,

    /// Print the final summary as JSON
    #[arg(long)]
    summary_json: bool,
}

#[derive(Debug, Serialize)]
struct Summary {
    seed: u64,
    ticks: u64,
    objects_spawned: u32,
    outcome: Option<Outcome>,
    human: &'static str,
    autonomous: &'static str,
}

fn autonomous_source(args: &Args, config: &GameConfig) -> Box<dyn DecisionSource> {
    if args.ai == AiKind::Learned {
        match args.policy.as_ref().map(|path| LinearPolicy::load(path)) {
            Some(Ok(policy)) => return Box::new(LearnedPolicy::new(policy, config)),
            Some(Err(err)) => log::warn!("{err}; falling back to the heuristic dodger"),
            None => log::warn!("--ai learned needs --policy; falling back to the heuristic dodger"),
        }
    }
    Box::new(HeuristicEngine::new(config))
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => GameConfig::default(),
    };
    let seed = match args.seed {
        Some(seed) => seed,
        None => SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .context("system clock before 1970")?
            .as_secs(),
    };

    let human: Box<dyn DecisionSource> = if args.autopilot_human {
        Box::new(HeuristicEngine::new(&config))
    } else {
        Box::new(HumanInput)
    };
    let autonomous = autonomous_source(&args, &config);
    let frame_time = Duration::from_secs_f64(1.0 / f64::from(config.tick_rate));

    let mut state = GameState::new(config, seed, human, autonomous);
    let mut spawned = 0u32;

    let start = TickInput {
        start: true,
        ..Default::default()
    };
    tick(&mut state, &start);

    let idle = TickInput::default();
    while state.phase == GamePhase::Playing && state.frame_count < args.max_ticks {
        for event in tick(&mut state, &idle) {
            match event {
                GameEvent::Spawned { .. } => spawned += 1,
                GameEvent::Collision(hit) => {
                    log::debug!("{} struck by object {}", hit.slot.label(), hit.object_id)
                }
                _ => {}
            }
        }
        if args.realtime {
            std::thread::sleep(frame_time);
        }
    }

    if state.outcome.is_none() {
        log::info!("No winner after {} ticks", state.frame_count);
    }

    let summary = Summary {
        seed,
        ticks: state.frame_count,
        objects_spawned: spawned,
        outcome: state.outcome,
        human: state.player(Slot::Human).controller.kind(),
        autonomous: state.player(Slot::Autonomous).controller.kind(),
    };
    if args.summary_json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        let result = match summary.outcome {
            Some(Outcome::Winner(slot)) => format!("{} wins", slot.label()),
            Some(Outcome::Draw) => "Draw".to_string(),
            None => "No winner".to_string(),
        };
        println!(
            "{} ({} vs {}, seed {}, {} ticks, {} objects)",
            result,
            summary.human,
            summary.autonomous,
            summary.seed,
            summary.ticks,
            summary.objects_spawned
        );
    }
    Ok(())
}
