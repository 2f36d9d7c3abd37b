//! Headless driver: configure, then run epochs back to back
use clap::Parser;
use foraging_sim::config::SimConfig;
use foraging_sim::error::Result;
use foraging_sim::{debug, diagnostics, world::Simulation};
use std::path::PathBuf;

/// Species foraging simulation - runs generations and prints survival statistics
#[derive(Parser, Debug)]
#[command(name = "foraging-sim")]
struct Args {
    /// TOML configuration file; built-in defaults when omitted
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Number of epochs to run
    #[arg(long, short = 'e', default_value_t = 5)]
    epochs: u32,

    /// Override the ticks per epoch from the configuration
    #[arg(long)]
    ticks: Option<u32>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Print a population analysis after every epoch
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    debug::init();

    let mut config = match &args.config {
        Some(path) => SimConfig::from_toml_file(path)?,
        None => SimConfig::default(),
    };
    if let Some(ticks) = args.ticks {
        config.epoch_ticks = ticks;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let mut sim = Simulation::configure(config)?;
    println!(
        "[FORAGING-SIM] {}x{} board, {} individuals, {} food",
        sim.config().width,
        sim.config().height,
        sim.current_generation().total(),
        sim.config().food_quantity
    );

    for _ in 0..args.epochs {
        let report = sim.run_epoch();
        println!("\n{}", report);
        if args.verbose {
            diagnostics::analyze_population(&sim).print_report();
        }
    }

    debug::print_stats();
    Ok(())
}
