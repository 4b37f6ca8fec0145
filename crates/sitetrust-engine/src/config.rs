//! Engine configuration types.

use std::time::Duration;

/// Default timeout for the initial fetch
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Default number of redirect hops the engine follows itself
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// Settings for the initial fetch
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Timeout for each request of the initial fetch
    pub timeout: Duration,

    /// Maximum redirect hops before the fetch is abandoned
    pub max_redirects: usize,

    /// User-Agent sent with the initial fetch
    pub user_agent: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineConfig {
    /// Create a configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            user_agent: format!("sitetrust/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Set the fetch timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the redirect hop budget
    #[must_use]
    pub const fn max_redirects(mut self, hops: usize) -> Self {
        self.max_redirects = hops;
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }
}
