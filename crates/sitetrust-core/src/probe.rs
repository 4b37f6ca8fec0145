//! Contracts the engine is built on.

use async_trait::async_trait;
use url::Url;

use crate::{Finding, Result};

/// An independent heuristic check run against a resolved address.
///
/// Implementations never fail past this boundary: every internal error is
/// turned into [`Finding::failure`] so one broken probe cannot abort the
/// others. Probes run concurrently with each other and must not share
/// mutable state.
#[async_trait]
pub trait Probe: Send + Sync {
    /// Short label used in the report text
    fn name(&self) -> &str;

    /// Inspect `address` and describe what was found
    async fn check(&self, address: &Url) -> Finding;
}

/// Result of the engine's initial fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutcome {
    /// Address the fetch ended on after all redirect hops
    pub final_url: Url,
    /// Every redirect target visited, in order
    pub hops: Vec<Url>,
    /// Status code of the last response
    pub status: u16,
}

impl FetchOutcome {
    /// Outcome of a fetch that was answered without redirecting
    #[must_use]
    pub fn direct(url: Url, status: u16) -> Self {
        Self {
            final_url: url,
            hops: Vec::new(),
            status,
        }
    }
}

/// Performs the engine's initial fetch without letting the transport
/// follow redirects on its own.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch `address` and report where it ended up
    async fn fetch(&self, address: &Url) -> Result<FetchOutcome>;
}
