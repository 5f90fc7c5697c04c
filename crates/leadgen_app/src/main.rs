mod cli;
mod config;
mod platform;

use anyhow::Context;
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse();
    let config = config::AppConfig::resolve(&args).context("loading configuration")?;

    engine_logging::initialize(
        config.log_destination.into(),
        config.log_level.into(),
        &config.log_path,
    );

    platform::run_app(config)
}
