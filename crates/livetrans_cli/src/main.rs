mod app;
mod cli;
mod config;
mod effects;
mod input;
mod render;

use anyhow::Context;
use clap::Parser;

use crate::cli::Cli;
use crate::config::AppConfig;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    config.apply_overrides(&cli);
    livetrans_logging::initialize(&config.log_settings()?);
    livetrans_logging::lt_info!(
        "livetrans {} backend={} target={}",
        env!("CARGO_PKG_VERSION"),
        config.base_url,
        config.target_lang
    );

    app::run(&config, cli.realtime)
}
