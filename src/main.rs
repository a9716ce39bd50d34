mod analysis;
mod app;
mod error;
mod models;
mod report;
mod utils;

use crate::app::Cli;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    app::run(&cli)?;
    Ok(())
}
