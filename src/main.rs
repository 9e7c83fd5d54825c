//! Hegemon - entry point
//!
//! Builds or loads a world, drives it for the configured number of ticks,
//! and writes the run artifact.

use std::path::PathBuf;

use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use hegemon::core::config::SimulationConfig;
use hegemon::core::error::Result;
use hegemon::map::generator;
use hegemon::sim::battle::BattleOutcome;
use hegemon::sim::output::{RunOutput, Snapshot};
use hegemon::sim::{assignment, tick, union, World};

/// Territorial politics simulation on a hex world grid
#[derive(Parser, Debug)]
#[command(name = "hegemon")]
#[command(about = "Simulate territorial states: secession, war, coalitions")]
struct Args {
    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Map height in cells
    #[arg(long)]
    rows: Option<u32>,

    /// Map width in cells
    #[arg(long)]
    cols: Option<u32>,

    /// Number of states seeded at world creation
    #[arg(long)]
    states: Option<u32>,

    /// Ticks to simulate
    #[arg(long)]
    ticks: Option<u64>,

    /// TOML configuration file; CLI flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Resume from a snapshot instead of generating a world
    #[arg(long)]
    load: Option<PathBuf>,

    /// Write a snapshot here after the run
    #[arg(long)]
    save: Option<PathBuf>,

    /// Write the full run artifact (stats, history, snapshot) as JSON
    #[arg(long, default_value = "run_output.json")]
    output: PathBuf,

    /// Report coalitions among the surviving states after the run
    #[arg(long, default_value_t = false)]
    unions: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("hegemon=info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SimulationConfig::from_toml_file(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.map.seed = seed;
    }
    if let Some(rows) = args.rows {
        config.map.rows = rows;
    }
    if let Some(cols) = args.cols {
        config.map.cols = cols;
    }
    if let Some(states) = args.states {
        config.politics.initial_states = states;
    }
    if let Some(ticks) = args.ticks {
        config.ticks = ticks;
    }
    config.validate()?;

    let mut world = match &args.load {
        Some(path) => {
            let world = Snapshot::load(path)?.restore(config.map.seed)?;
            tracing::info!(tick = world.tick, states = world.states.len(), "snapshot loaded");
            world
        }
        None => {
            let mut rng = ChaCha8Rng::seed_from_u64(config.map.seed);
            let grid = generator::generate_map(&config.map, &mut rng);
            let mut world = World::new(grid, config.map.seed);
            assignment::generate_states(&mut world, config.politics.initial_states);
            tracing::info!(
                states = world.states.len(),
                "world generated ({}x{} cells)",
                config.map.rows,
                config.map.cols
            );
            world
        }
    };

    let states_at_start = world.states.len();
    let mut secessions = 0;
    let mut battles = 0;
    let mut absorbed = 0;

    let start = std::time::Instant::now();
    for _ in 0..config.ticks {
        let summary = tick::run_tick(&mut world, &config);
        secessions += summary.seceded.len();
        battles += summary.battles.len();
        absorbed += summary.absorbed;

        let annihilations = summary
            .battles
            .iter()
            .filter(|b| matches!(b.outcome, BattleOutcome::Victory { annihilated: true, .. }))
            .count();
        if annihilations > 0 {
            tracing::info!(tick = summary.tick, annihilations, "states wiped out this tick");
        }
    }
    let elapsed = start.elapsed();

    if args.unions {
        union::form_unions(&mut world, &config.politics);
        for u in &world.unions {
            let members: Vec<&str> = u
                .members
                .iter()
                .filter_map(|id| world.state(*id).map(|s| s.name.as_str()))
                .collect();
            println!("{}: {}", u.name, members.join(", "));
        }
    }

    let stats = hegemon::sim::output::run_stats(
        &world,
        states_at_start,
        secessions,
        battles,
        absorbed,
        elapsed,
        config.ticks,
    );
    println!("{}", stats.summary());

    let output = RunOutput::new(&world, stats);
    std::fs::write(&args.output, output.to_json())?;
    println!("Full output written to {}", args.output.display());

    if let Some(path) = &args.save {
        Snapshot::capture(&world).save(path)?;
        tracing::info!(path = %path.display(), "snapshot saved");
    }

    Ok(())
}
