//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;

use anyhow::Result;
use args::{Cli, Commands};
use clap::Parser;

use crate::config::Config;
use crate::logging::{init_logging, LogConfig};

/// Run the CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut log_config = LogConfig::new().verbosity(cli.verbose);
    if cli.log_json {
        log_config = log_config.json();
    }
    init_logging(&log_config)?;

    if cli.no_color {
        colored::control::set_override(false);
    }

    // Load configuration
    let config_path = Config::resolve_path(cli.config)?;
    let config = Config::load_from(&config_path)?;

    // Flag beats config file
    let output_format = cli
        .output
        .or(config.output_format)
        .unwrap_or_default();

    let ctx = commands::Context {
        config,
        config_path,
        pagerank_key: cli.pagerank_key,
        output_format,
    };

    match cli.command {
        Commands::Check(args) => commands::check::execute(ctx, args).await,
        Commands::Serve(args) => commands::serve::execute(ctx, args).await,
        Commands::Config(args) => commands::config::execute(&ctx, &args),
    }
}
