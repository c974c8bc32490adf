use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use schelling::{
    rng::SimRng,
    scenario::{Scenario, ScenarioLoader},
    simulation::Simulator,
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Schelling segregation runner")]
struct Cli {
    /// Path to a scenario YAML file (runs the classic 75x75 setup when omitted)
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Override trial count
    #[arg(long)]
    trials: Option<usize>,

    /// Override the random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .init();

    let scenario = match &cli.scenario {
        Some(path) => ScenarioLoader::new(".").load(path)?,
        None => Scenario::classic(),
    };
    let config = scenario.config()?;
    let trials = scenario.trials(cli.trials);
    let rng = match cli.seed.or(scenario.seed) {
        Some(seed) => SimRng::new(seed),
        None => SimRng::from_entropy(),
    };

    tracing::info!(
        scenario = %scenario.name,
        trials,
        width = config.width(),
        height = config.height(),
        population = config.population(),
        tolerance = config.tolerance(),
        "starting simulation"
    );

    let mut simulator = Simulator::with_rng(config, rng);
    simulator.run_trials(trials)?;

    match simulator.summary() {
        Some(summary) => {
            println!("Scenario '{}' completed {} trials.", scenario.name, summary.trials);
            println!("Average homophily ratio across trials: {}", summary.mean);
            println!("Standard deviation across trials: {}", summary.std_dev);
            println!(
                "Converged trials: {}/{} (range {:.4}..{:.4})",
                summary.converged, summary.trials, summary.min, summary.max
            );
        }
        None => println!("Scenario '{}' ran no trials.", scenario.name),
    }
    Ok(())
}
