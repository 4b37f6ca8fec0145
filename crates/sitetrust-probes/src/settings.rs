//! Probe settings and the trusted-domain list.

use std::path::Path;
use std::time::Duration;

use crate::error::{ProbeError, ProbeResult};

/// Default per-probe network timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Default Open PageRank API base URL
pub const DEFAULT_PAGERANK_URL: &str = "https://openpagerank.com/api/v1.0";

/// Settings shared by the built-in probes
#[derive(Debug, Clone)]
pub struct ProbeSettings {
    /// Timeout for each probe's own network work
    pub timeout: Duration,

    /// User-Agent for the response-content probe and page-rank lookups
    pub user_agent: String,

    /// Open PageRank API key; lookups are reported unavailable without it
    pub pagerank_api_key: Option<String>,

    /// Open PageRank API base URL (useful for testing)
    pub pagerank_base_url: String,

    /// Domains that impersonators try to look like
    pub trusted_domains: Vec<String>,

    /// Port the certificate probe connects to
    pub tls_port: u16,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!(
                "Mozilla/5.0 (compatible; sitetrust/{}; +https://github.com/sitetrust/sitetrust)",
                env!("CARGO_PKG_VERSION")
            ),
            pagerank_api_key: None,
            pagerank_base_url: DEFAULT_PAGERANK_URL.to_string(),
            trusted_domains: Vec::new(),
            tls_port: 443,
        }
    }
}

impl ProbeSettings {
    /// Create settings with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the probe timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Set the Open PageRank API key
    #[must_use]
    pub fn pagerank_api_key(mut self, key: impl Into<String>) -> Self {
        self.pagerank_api_key = Some(key.into());
        self
    }

    /// Set the Open PageRank API base URL
    #[must_use]
    pub fn pagerank_base_url(mut self, url: impl Into<String>) -> Self {
        self.pagerank_base_url = url.into();
        self
    }

    /// Set the trusted-domain list
    #[must_use]
    pub fn trusted_domains(mut self, domains: Vec<String>) -> Self {
        self.trusted_domains = domains;
        self
    }

    /// Set the port the certificate probe connects to
    #[must_use]
    pub const fn tls_port(mut self, port: u16) -> Self {
        self.tls_port = port;
        self
    }
}

/// Read a trusted-domain list: one entry per line, `#` starts a comment.
pub fn load_trusted_domains(path: &Path) -> ProbeResult<Vec<String>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        ProbeError::Config(format!("cannot read trusted domains {}: {e}", path.display()))
    })?;
    Ok(parse_trusted_domains(&content))
}

/// Parse the contents of a trusted-domain list.
pub fn parse_trusted_domains(content: &str) -> Vec<String> {
    content
        .lines()
        .map(|line| line.split('#').next().unwrap_or_default().trim())
        .filter(|line| !line.is_empty())
        .map(str::to_ascii_lowercase)
        .collect()
}
