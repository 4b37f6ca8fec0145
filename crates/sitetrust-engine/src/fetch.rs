//! Redirect-aware initial fetch.
//!
//! The transport is told not to follow redirects; hops are walked here so the
//! engine sees every `Location` the target hands out.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, LOCATION};
use reqwest::redirect::Policy;
use reqwest::Client as HttpClient;
use sitetrust_core::{FetchOutcome, Fetcher, Result, TrustError};
use tracing::debug;
use url::Url;

use crate::config::EngineConfig;

/// [`Fetcher`] backed by `reqwest` with transport-level redirects disabled
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    http: HttpClient,
    config: EngineConfig,
}

impl HttpFetcher {
    /// Build a fetcher from engine settings
    pub fn new(config: EngineConfig) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .redirect(Policy::none())
            .gzip(true)
            .build()
            .map_err(|e| TrustError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, config })
    }

    fn classify(&self, err: &reqwest::Error) -> TrustError {
        if err.is_timeout() {
            TrustError::Timeout(self.config.timeout.as_secs())
        } else if err.is_connect() {
            TrustError::Connection(err.to_string())
        } else {
            TrustError::Http(err.to_string())
        }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, address: &Url) -> Result<FetchOutcome> {
        let mut current = address.clone();
        let mut hops = Vec::new();

        loop {
            debug!(url = %current, "GET request");

            let response = self
                .http
                .get(current.clone())
                .send()
                .await
                .map_err(|e| self.classify(&e))?;

            let status = response.status();
            let next = if status.is_redirection() {
                redirect_target(&current, response.headers())
            } else {
                None
            };

            let Some(next) = next else {
                return Ok(FetchOutcome {
                    final_url: current,
                    hops,
                    status: status.as_u16(),
                });
            };

            if hops.len() >= self.config.max_redirects {
                return Err(TrustError::TooManyRedirects(self.config.max_redirects));
            }

            debug!(from = %current, to = %next, status = status.as_u16(), "redirect");
            hops.push(next.clone());
            current = next;
        }
    }
}

/// Resolve a `Location` header against the address that returned it.
fn redirect_target(current: &Url, headers: &HeaderMap) -> Option<Url> {
    let location = headers.get(LOCATION)?.to_str().ok()?;
    let target = current.join(location.trim()).ok()?;
    matches!(target.scheme(), "http" | "https").then_some(target)
}
