//! Coven balance simulator entry point.

use std::error::Error;

use coven_ritual::application::batch::run_batch;
use coven_ritual::domain::game::Simulation;
use coven_sim::report::render;
use coven_sim::settings::SimSettings;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    // Logs go to stderr so stdout carries only the report.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting Coven balance simulator");

    // Read configuration from environment.
    let settings = SimSettings::from_env()?;
    let balance = settings.load_balance()?;
    if let Some(path) = &settings.balance_file {
        tracing::info!("Loaded balance file {}", path.display());
    }

    // Validate before any game runs.
    let simulation = Simulation::new(balance)?;

    let report = run_batch(&simulation, &settings.batch)?;
    println!("{}", render(&report, settings.output)?);

    tracing::info!("Simulation finished");

    Ok(())
}
