//! Heuristic trust scoring for web addresses.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use sitetrust::{default_engine, EngineConfig, ProbeSettings};
//!
//! #[tokio::main]
//! async fn main() -> sitetrust::Result<()> {
//!     let settings = ProbeSettings::new().pagerank_api_key("your-api-key");
//!     let engine = default_engine(EngineConfig::new(), &settings)?;
//!
//!     let report = engine.check("https://example.com").await;
//!     println!("{}", report.text());
//!     println!("score: {:.2} ({})", report.score(), report.verdict());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Crates
//!
//! - [`sitetrust_core`] - data model and the `Probe` / `Fetcher` contracts
//! - [`sitetrust_engine`] - the concurrent orchestration engine
//! - [`probes`] - certificate, content and domain-reputation probes

#![doc(html_root_url = "https://docs.rs/sitetrust/0.1.0")]

// Re-export core types
pub use sitetrust_core::*;

// Re-export the engine
pub use sitetrust_engine::{
    EngineConfig, HttpFetcher, TrustEngine, TrustEngineBuilder, DEFAULT_MAX_REDIRECTS,
};

// Re-export the probes
pub use sitetrust_probes as probes;
pub use sitetrust_probes::{
    load_trusted_domains, parse_trusted_domains, CertificateProbe, ContentProbe, DomainProbe,
    ProbeError, ProbeSettings,
};

// Re-export runtime for convenience
pub use serde;
pub use serde_json;
pub use tokio;

use tracing::debug;

/// Build an engine with the certificate, content and domain probes, in that
/// order.
pub fn default_engine(config: EngineConfig, settings: &ProbeSettings) -> Result<TrustEngine> {
    let certificate = CertificateProbe::new(settings)?;
    let content = ContentProbe::new(settings)?;
    let domain = DomainProbe::new(settings)?;

    debug!(
        trusted = settings.trusted_domains.len(),
        pagerank = settings.pagerank_api_key.is_some(),
        "building default engine"
    );

    TrustEngine::builder()
        .config(config)
        .probe(certificate)
        .probe(content)
        .probe(domain)
        .build()
}
