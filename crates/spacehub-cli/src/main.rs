//! SpaceHub CLI entry point.

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use spacehub_cli::cli::Cli;
use spacehub_cli::commands::{self, Context};
use spacehub_core::SpaceHubConfig;

fn main() {
    let cli = Cli::parse();

    // Loads .env.local before reading SPACEHUB_* variables
    let config = match SpaceHubConfig::from_env() {
        Ok(config) => cli.apply(config),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_directive(cli.verbose)));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let events_path = cli.events_path(&config);
    let content_path = cli.content_path(&config);
    let ctx = Context {
        config: &config,
        events_path: &events_path,
        content_path: &content_path,
        format: cli.format,
    };

    if let Err(e) = commands::execute(cli.command, &ctx) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
