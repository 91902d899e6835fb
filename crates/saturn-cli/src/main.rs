mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Args, Command};
use saturn_core::Config;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("saturn=info".parse()?)
                .add_directive("saturn_core=info".parse()?),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => match Config::load(path) {
            Ok(c) => {
                info!("Loaded config from {:?}", path);
                c
            }
            Err(e) => {
                warn!("Failed to load config: {}, using defaults", e);
                Config::default()
            }
        },
        None => Config::default(),
    };
    if args.mirror {
        config.chart.mirror_enabled = true;
    }

    match args.command {
        Command::Inspect { chart } => commands::inspect::run(&chart, &config),
        Command::Validate {
            chart,
            audio_length_ms,
        } => {
            if audio_length_ms.is_some() {
                config.chart.audio_length_ms = audio_length_ms;
            }
            commands::validate::run(&chart, &config)
        }
        Command::Export { chart, output } => {
            commands::export::run(&chart, output.as_deref(), &config)
        }
        Command::Simulate { chart, inputs } => commands::simulate::run(&chart, &inputs, &config),
    }
}
