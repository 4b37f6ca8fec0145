//! Configuration management.

use anyhow::{Context as _, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use sitetrust::{load_trusted_domains, EngineConfig, ProbeSettings, DEFAULT_MAX_REDIRECTS};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

use crate::output::OutputFormat;

/// Default HTTP bind address for `serve`
pub const DEFAULT_LISTEN: &str = "127.0.0.1:8080";

/// Default timeout for the initial fetch and each probe
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Open PageRank API key.
    pub pagerank_api_key: Option<String>,

    /// Path to the trusted-domain list.
    pub trusted_domains: Option<PathBuf>,

    /// HTTP bind address for `serve`.
    pub listen: String,

    /// Network timeout in seconds.
    pub timeout_secs: u64,

    /// User-Agent override.
    pub user_agent: Option<String>,

    /// Redirect hops followed before giving up.
    pub max_redirects: usize,

    /// Default output format.
    pub output_format: Option<OutputFormat>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pagerank_api_key: None,
            trusted_domains: None,
            listen: DEFAULT_LISTEN.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            output_format: None,
        }
    }
}

impl Config {
    /// Get the default config file path.
    pub fn default_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("org", "sitetrust", "sitetrust")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// The explicit path if given, the default path otherwise.
    pub fn resolve_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
        explicit.map_or_else(Self::default_path, Ok)
    }

    /// Load configuration from file; a missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;

        if config.timeout_secs == 0 {
            anyhow::bail!("Invalid config {}: timeout_secs must be positive", path.display());
        }

        Ok(config)
    }

    /// Network timeout.
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Settings for the initial fetch.
    pub fn engine_config(&self) -> EngineConfig {
        let mut config = EngineConfig::new()
            .timeout(self.timeout())
            .max_redirects(self.max_redirects);
        if let Some(agent) = &self.user_agent {
            config = config.user_agent(agent.clone());
        }
        config
    }

    /// Settings for the built-in probes.
    ///
    /// `pagerank_key` comes from the flag or environment and wins over the
    /// file; `trusted_override` replaces the configured list path.
    pub fn probe_settings(
        &self,
        pagerank_key: Option<String>,
        trusted_override: Option<&Path>,
    ) -> ProbeSettings {
        let mut settings = ProbeSettings::new().timeout(self.timeout());
        if let Some(agent) = &self.user_agent {
            settings = settings.user_agent(agent.clone());
        }
        if let Some(key) = pagerank_key.or_else(|| self.pagerank_api_key.clone()) {
            settings = settings.pagerank_api_key(key);
        }

        let list = trusted_override.or(self.trusted_domains.as_deref());
        settings.trusted_domains(list.map(read_trusted_list).unwrap_or_default())
    }
}

/// Hide all but the first and last four characters of a secret.
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    } else {
        "****".to_string()
    }
}

/// An unreadable list degrades to an empty one.
fn read_trusted_list(path: &Path) -> Vec<String> {
    match load_trusted_domains(path) {
        Ok(list) => {
            debug!(path = %path.display(), entries = list.len(), "loaded trusted domains");
            list
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "trusted-domain list unavailable");
            Vec::new()
        }
    }
}
