//! Domain-reputation probe.
//!
//! Combines registration age from WHOIS, the Open PageRank score and
//! lexical features of the hostname itself. A lookup that comes back
//! empty is reported in the notes and never fails the probe.

mod rules;

pub use rules::{
    age_rule, assess, confusables, impersonated, DomainEvidence, RANK_THRESHOLD,
    SIMILARITY_THRESHOLD,
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sitetrust_core::{domain_suffix, registrable_domain, Finding, Probe};
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

use crate::error::{ProbeError, ProbeResult};
use crate::pagerank::PageRankClient;
use crate::settings::ProbeSettings;
use crate::whois::WhoisClient;

/// Source of domain registration dates
#[async_trait]
pub trait RegistrationLookup: Send + Sync {
    /// When `domain` was first registered
    async fn creation_date(&self, domain: &str) -> ProbeResult<DateTime<Utc>>;
}

/// Source of 0-10 page ranks
#[async_trait]
pub trait RankLookup: Send + Sync {
    /// Integer page rank of `domain`
    async fn page_rank(&self, domain: &str) -> ProbeResult<u8>;
}

/// Grades the reputation of the target's hostname
pub struct DomainProbe {
    registry: Arc<dyn RegistrationLookup>,
    ranks: Arc<dyn RankLookup>,
    trusted: Vec<String>,
}

impl DomainProbe {
    /// Create a probe backed by WHOIS and the Open PageRank API
    pub fn new(settings: &ProbeSettings) -> ProbeResult<Self> {
        Ok(Self::with_lookups(
            WhoisClient::new(settings.timeout)?,
            PageRankClient::new(settings)?,
            settings.trusted_domains.clone(),
        ))
    }

    /// Create a probe with custom lookups
    pub fn with_lookups(
        registry: impl RegistrationLookup + 'static,
        ranks: impl RankLookup + 'static,
        trusted: Vec<String>,
    ) -> Self {
        Self {
            registry: Arc::new(registry),
            ranks: Arc::new(ranks),
            trusted,
        }
    }

    /// Trusted domains this probe compares against
    pub fn trusted(&self) -> &[String] {
        &self.trusted
    }

    async fn gather(&self, host: &str) -> DomainEvidence {
        let (created, rank) = tokio::join!(self.creation_date(host), self.ranks.page_rank(host));

        DomainEvidence {
            created: created.map_err(|e| unavailable("creation date", host, &e)),
            rank: rank.map_err(|e| unavailable("page rank", host, &e)),
        }
    }

    /// Registry lookup on the last two labels, retried on the last three
    /// for hosts under suffixes like `co.uk`.
    async fn creation_date(&self, host: &str) -> ProbeResult<DateTime<Utc>> {
        let domain = registrable_domain(host);
        let first = match self.registry.creation_date(domain).await {
            Ok(created) => return Ok(created),
            Err(e) => e,
        };

        let wider = domain_suffix(host, 3);
        if wider == domain {
            return Err(first);
        }
        debug!(domain, wider, "retrying registry lookup: {first}");
        self.registry.creation_date(wider).await.map_err(|_| first)
    }
}

fn unavailable(what: &str, host: &str, error: &ProbeError) -> String {
    warn!(host, kind = error.kind(), "{what} unavailable: {error}");
    error.to_string()
}

#[async_trait]
impl Probe for DomainProbe {
    fn name(&self) -> &str {
        "domain"
    }

    async fn check(&self, address: &Url) -> Finding {
        let Some(host) = address.host_str() else {
            return Finding::failure(ProbeError::MissingHost(address.to_string()).to_string());
        };
        let ascii = host
            .trim_start_matches('[')
            .trim_end_matches(']')
            .trim_end_matches('.')
            .to_ascii_lowercase();

        let evidence = self.gather(&ascii).await;

        // Lexical rules look at what the reader sees, not the punycode
        let (unicode, errors) = idna::domain_to_unicode(&ascii);
        let shown_host = if errors.is_ok() { unicode } else { ascii };
        debug!(host = %shown_host, "grading domain");

        assess(&shown_host, &evidence, &self.trusted, Utc::now())
    }
}
