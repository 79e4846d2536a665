//! Lava Shooter headless host
//!
//! Drives an engine at the nominal tick rate with a simple autopilot and
//! reports how the session went. Useful for balance checks and soak runs.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use lava_shooter::consts::SIM_DT;
use lava_shooter::sim::{Engine, GameEvent, Obstacle, Phase, World};
use lava_shooter::tuning::Tuning;

#[derive(Parser, Debug)]
#[command(name = "lava-shooter", about = "Run a headless Lava Shooter session with an autopilot", version)]
struct Args {
    /// RNG seed (random when omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Play-field width
    #[arg(long, default_value_t = 390.0)]
    width: f32,
    /// Play-field height
    #[arg(long, default_value_t = 700.0)]
    height: f32,
    /// Stop after this many ticks even if the session is still running
    #[arg(long, default_value_t = 60 * 60 * 10)]
    max_ticks: u64,
    /// Ticks between autopilot shots
    #[arg(long, default_value_t = 12)]
    fire_every: u64,
    /// JSON tuning overrides
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Print the final observables as JSON
    #[arg(long)]
    snapshot: bool,
}

/// Final simulation state, as a renderer would see it
#[derive(Serialize)]
struct Snapshot<'a> {
    seed: Option<u64>,
    world: &'a World,
}

#[derive(Debug, Default)]
struct Tally {
    destroyed: u32,
    escaped_hazards: u32,
    spawned: u32,
}

fn load_tuning(path: Option<&PathBuf>) -> Result<Tuning> {
    let Some(path) = path else {
        return Ok(Tuning::default());
    };
    let json = fs::read_to_string(path).with_context(|| format!("read tuning {:?}", path))?;
    let tuning = Tuning::from_json(&json).with_context(|| format!("parse tuning {:?}", path))?;
    log::info!("Loaded tuning from {:?}", path);
    Ok(tuning)
}

/// Pick where to stand: under the lowest hazard, else under the lowest obstacle
fn autopilot_target(obstacles: &[Obstacle]) -> Option<f32> {
    let lowest = |hazards_only: bool| {
        obstacles
            .iter()
            .filter(|o| !hazards_only || o.category.is_hazard())
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|o| o.pos.x)
    };
    lowest(true).or_else(|| lowest(false))
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let tuning = load_tuning(args.tuning.as_ref())?;
    let seed = args.seed.unwrap_or_else(rand::random);
    let mut engine = Engine::with_tuning(seed, tuning);
    log::info!("Lava Shooter (headless) starting with seed {}", seed);

    engine.resize(args.width, args.height);
    if engine.field().is_degenerate() {
        anyhow::bail!("field {}x{} has no area", args.width, args.height);
    }
    engine.start();

    let mut tally = Tally::default();
    let fire_every = args.fire_every.max(1);

    while engine.phase() == Phase::Playing && engine.ticks() < args.max_ticks {
        if let Some(x) = autopilot_target(engine.obstacles()) {
            engine.set_player_position(x, args.width);
        }
        if engine.ticks() % fire_every == 0 {
            engine.shoot(args.width, args.height);
        }

        for event in engine.tick(SIM_DT).events {
            match event {
                GameEvent::Spawned { .. } => tally.spawned += 1,
                GameEvent::Destroyed { .. } => tally.destroyed += 1,
                GameEvent::Escaped { category, .. } if category.is_hazard() => {
                    tally.escaped_hazards += 1
                }
                _ => {}
            }
        }
    }

    println!(
        "phase={:?} score={} lives={} ticks={} spawned={} destroyed={} escaped_hazards={}",
        engine.phase(),
        engine.score(),
        engine.lives(),
        engine.ticks(),
        tally.spawned,
        tally.destroyed,
        tally.escaped_hazards
    );

    if args.snapshot {
        let snapshot = Snapshot {
            seed: engine.seed(),
            world: engine.world(),
        };
        println!("{}", serde_json::to_string_pretty(&snapshot).context("serialize snapshot")?);
    }

    Ok(())
}
