//! Command implementations.

pub mod check;
pub mod config;
pub mod serve;

use sitetrust::{default_engine, TrustEngine};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::output::OutputFormat;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Loaded configuration
    pub config: Config,

    /// Where the configuration was looked for
    pub config_path: PathBuf,

    /// Page-rank key from the flag or environment
    pub pagerank_key: Option<String>,

    /// Output format
    pub output_format: OutputFormat,
}

impl Context {
    /// Build the engine with the three built-in probes.
    pub fn engine(&self, trusted_override: Option<&Path>) -> anyhow::Result<TrustEngine> {
        let settings = self
            .config
            .probe_settings(self.pagerank_key.clone(), trusted_override);
        Ok(default_engine(self.config.engine_config(), &settings)?)
    }
}
