//! Open PageRank API client.

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::RankLookup;
use crate::error::{ProbeError, ProbeResult};
use crate::settings::ProbeSettings;

/// Header carrying the API key
const API_KEY_HEADER: &str = "API-OPR";

#[derive(Debug, Deserialize)]
struct PageRankResponse {
    #[serde(default)]
    response: Vec<PageRankEntry>,
}

#[derive(Debug, Deserialize)]
struct PageRankEntry {
    #[serde(default)]
    status_code: Option<u16>,
    #[serde(default)]
    page_rank_integer: Option<u8>,
    #[serde(default)]
    error: Option<String>,
}

/// Looks up a domain's 0-10 page rank
#[derive(Debug, Clone)]
pub struct PageRankClient {
    http: HttpClient,
    api_key: Option<String>,
    base_url: String,
}

impl PageRankClient {
    /// Create a client from probe settings
    pub fn new(settings: &ProbeSettings) -> ProbeResult<Self> {
        let http = HttpClient::builder()
            .timeout(settings.timeout)
            .user_agent(&settings.user_agent)
            .build()
            .map_err(|e| ProbeError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            api_key: settings.pagerank_api_key.clone(),
            base_url: settings.pagerank_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the integer page rank of `domain`
    pub async fn lookup(&self, domain: &str) -> ProbeResult<u8> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ProbeError::Config("no page-rank API key configured".into()))?;

        let url = format!("{}/getPageRank", self.base_url);
        debug!(url = %url, domain, "page-rank request");

        let response = self
            .http
            .get(&url)
            .query(&[("domains[0]", domain)])
            .header(API_KEY_HEADER, api_key)
            .send()
            .await
            .map_err(|e| ProbeError::PageRank(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "page-rank service refused the request");
            return Err(ProbeError::PageRank(format!("service returned {status}")));
        }

        let body: PageRankResponse = response
            .json()
            .await
            .map_err(|e| ProbeError::PageRank(e.to_string()))?;

        let entry = body
            .response
            .into_iter()
            .next()
            .ok_or_else(|| ProbeError::PageRank("no data returned".into()))?;

        if entry.status_code.is_some_and(|code| code != 200) {
            let reason = entry.error.filter(|e| !e.is_empty());
            return Err(ProbeError::PageRank(
                reason.unwrap_or_else(|| "domain not ranked".into()),
            ));
        }

        entry
            .page_rank_integer
            .ok_or_else(|| ProbeError::PageRank("no rank in response".into()))
    }
}

#[async_trait]
impl RankLookup for PageRankClient {
    async fn page_rank(&self, domain: &str) -> ProbeResult<u8> {
        self.lookup(domain).await
    }
}
