//! Command-line argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::output::OutputFormat;

/// Heuristic trust scoring for web addresses
///
/// Checks a site's certificate, its response content and the reputation
/// of its domain, then prints a score between 0 and 1.
///
/// Get a page-rank key at: https://www.domcop.com/openpagerank/
#[derive(Parser, Debug)]
#[command(name = "sitetrust")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Open PageRank API key (or set SITETRUST_PAGERANK_KEY env var)
    #[arg(
        short = 'k',
        long,
        env = "SITETRUST_PAGERANK_KEY",
        global = true,
        hide_env_values = true
    )]
    pub pagerank_key: Option<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score one web address
    Check(CheckArgs),

    /// Serve checks over HTTP
    Serve(ServeArgs),

    /// Inspect CLI configuration
    Config(ConfigArgs),
}

// ============================================================================
// Check command
// ============================================================================

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Address to check (e.g., https://example.com)
    pub url: String,

    /// Trusted-domain list, overriding the config file
    #[arg(short, long, value_name = "PATH")]
    pub trusted_domains: Option<PathBuf>,
}

// ============================================================================
// Serve command
// ============================================================================

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to listen on, overriding the config file
    #[arg(short, long, value_name = "ADDR")]
    pub listen: Option<String>,

    /// Trusted-domain list, overriding the config file
    #[arg(short, long, value_name = "PATH")]
    pub trusted_domains: Option<PathBuf>,
}

// ============================================================================
// Config command
// ============================================================================

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,

    /// Show the config file path
    Path,
}
