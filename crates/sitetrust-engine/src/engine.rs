//! Trust-score orchestration.
//!
//! One address in, one [`Report`] out: parse, fetch, weigh redirects, fan the
//! final address out to every probe, then fold the findings into a score.

use futures_util::future::join_all;
use sitetrust_core::{
    is_cross_host, parse_address, FetchOutcome, Fetcher, Finding, Probe, ProbeSummary,
    RedirectEvent, Report, Result, CROSS_HOST_PENALTY,
};
use std::fmt::Write as _;
use std::sync::Arc;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::EngineConfig;
use crate::fetch::HttpFetcher;

/// Runs every registered probe against an address and aggregates the result
#[derive(Clone)]
pub struct TrustEngine {
    probes: Vec<Arc<dyn Probe>>,
    fetcher: Arc<dyn Fetcher>,
}

impl TrustEngine {
    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder() -> TrustEngineBuilder {
        TrustEngineBuilder::new()
    }

    /// Names of the registered probes, in registration order
    #[must_use]
    pub fn probe_names(&self) -> Vec<&str> {
        self.probes.iter().map(|probe| probe.name()).collect()
    }

    /// Check one address and produce its report.
    ///
    /// A malformed address or an unreachable target ends the check with a
    /// zero score before any probe runs. Individual probe failures are
    /// reported but left out of the average.
    pub async fn check(&self, input: &str) -> Report {
        let address = match parse_address(input) {
            Ok(address) => address,
            Err(e) => {
                warn!(input, error = %e, "rejected address");
                return Report::fatal(e);
            }
        };

        let outcome = match self.fetcher.fetch(&address).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(address = %address, error = %e, "initial fetch failed");
                return Report::fatal(format_args!("Error connecting to URL: {e}"));
            }
        };

        debug!(address = %address, status = outcome.status, hops = outcome.hops.len(), "fetched");

        let mut tally = Tally::new();
        let target = if outcome.final_url == address {
            address
        } else {
            tally.redirect(&address, &outcome);
            outcome.final_url
        };

        for (name, finding) in self.dispatch(&target).await {
            tally.record(&name, &finding);
        }

        let report = tally.finish();
        info!(
            address = %target,
            score = report.score(),
            verdict = %report.verdict(),
            "check complete"
        );
        report
    }

    /// Run every probe as its own task and wait for all of them.
    async fn dispatch(&self, target: &Url) -> Vec<(String, Finding)> {
        let handles: Vec<_> = self
            .probes
            .iter()
            .map(|probe| {
                let probe = Arc::clone(probe);
                let target = target.clone();
                tokio::spawn(async move { probe.check(&target).await })
            })
            .collect();

        let joined = join_all(handles).await;

        self.probes
            .iter()
            .zip(joined)
            .map(|(probe, joined)| {
                let finding = joined.unwrap_or_else(|e| {
                    warn!(probe = probe.name(), error = %e, "probe task aborted");
                    Finding::failure(format!("probe task aborted: {e}"))
                });
                debug!(
                    probe = probe.name(),
                    score = finding.score(),
                    failed = finding.is_failure(),
                    "probe finished"
                );
                (probe.name().to_string(), finding)
            })
            .collect()
    }
}

/// Running total, term count and report text for one check.
///
/// The seed term starts at `1.0` and counts as one contributor.
struct Tally {
    total: f64,
    count: u32,
    text: String,
    redirect: Option<RedirectEvent>,
    probes: Vec<ProbeSummary>,
}

impl Tally {
    const fn new() -> Self {
        Self {
            total: 1.0,
            count: 1,
            text: String::new(),
            redirect: None,
            probes: Vec::new(),
        }
    }

    fn redirect(&mut self, from: &Url, outcome: &FetchOutcome) {
        let to = &outcome.final_url;
        let cross_host = is_cross_host(from, to);
        let _ = writeln!(self.text, "[!] URL {:?} redirects to {:?}", from.as_str(), to.as_str());

        if cross_host {
            self.total *= CROSS_HOST_PENALTY;
            let _ = writeln!(
                self.text,
                "[!] Redirect leaves host {:?} for {:?}",
                from.host_str().unwrap_or_default(),
                to.host_str().unwrap_or_default()
            );
        }

        self.redirect = Some(RedirectEvent {
            from: from.to_string(),
            to: to.to_string(),
            hops: outcome.hops.iter().map(Url::to_string).collect(),
            cross_host,
        });
    }

    fn record(&mut self, name: &str, finding: &Finding) {
        let failed = finding.is_failure();
        if failed {
            let explanation = finding.explanation();
            let detail = explanation.trim_end();
            let detail = if detail.is_empty() { "no details" } else { detail };
            let _ = writeln!(self.text, "[!] Error in {name} check: {detail}");
        } else {
            self.total += finding.score();
            self.count += 1;
            let _ = write!(self.text, "[+] Result from {name}:\n{}", finding.explanation());
        }

        self.probes.push(ProbeSummary {
            name: name.to_string(),
            score: finding.score(),
            failed,
        });
    }

    fn finish(self) -> Report {
        Report::new(
            self.text,
            self.total / f64::from(self.count),
            self.redirect,
            self.probes,
        )
    }
}

/// Builder for configuring a [`TrustEngine`]
#[derive(Default)]
pub struct TrustEngineBuilder {
    probes: Vec<Arc<dyn Probe>>,
    fetcher: Option<Arc<dyn Fetcher>>,
    config: EngineConfig,
}

impl TrustEngineBuilder {
    /// Create an empty builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a probe
    #[must_use]
    pub fn probe(mut self, probe: impl Probe + 'static) -> Self {
        self.probes.push(Arc::new(probe));
        self
    }

    /// Register an already shared probe
    #[must_use]
    pub fn shared_probe(mut self, probe: Arc<dyn Probe>) -> Self {
        self.probes.push(probe);
        self
    }

    /// Replace the HTTP fetcher (useful for testing)
    #[must_use]
    pub fn fetcher(mut self, fetcher: impl Fetcher + 'static) -> Self {
        self.fetcher = Some(Arc::new(fetcher));
        self
    }

    /// Set the settings used by the default fetcher
    #[must_use]
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the engine
    pub fn build(self) -> Result<TrustEngine> {
        let fetcher = match self.fetcher {
            Some(fetcher) => fetcher,
            None => Arc::new(HttpFetcher::new(self.config)?),
        };

        Ok(TrustEngine {
            probes: self.probes,
            fetcher,
        })
    }
}
