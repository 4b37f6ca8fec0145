//! Built-in probes for the sitetrust engine.
//!
//! Three independent checks, each implementing [`sitetrust_core::Probe`]:
//!
//! - [`CertificateProbe`] - who the TLS certificate vouches for
//! - [`ContentProbe`] - inline-script red flags and missing protective headers
//! - [`DomainProbe`] - registration age, page rank and lexical tells
//!
//! # Example
//!
//! ```rust,ignore
//! use sitetrust_probes::{DomainProbe, ProbeSettings};
//!
//! let settings = ProbeSettings::new().pagerank_api_key("key");
//! let probe = DomainProbe::new(&settings)?;
//! ```

#![doc(html_root_url = "https://docs.rs/sitetrust-probes/0.1.0")]

pub mod cert;
pub mod content;
pub mod domain;
mod error;
pub mod pagerank;
mod settings;
pub mod whois;

pub use cert::{CertificateProbe, CertificateSummary};
pub use content::ContentProbe;
pub use domain::{DomainEvidence, DomainProbe, RankLookup, RegistrationLookup};
pub use error::{ProbeError, ProbeResult};
pub use pagerank::PageRankClient;
pub use settings::*;
pub use whois::{WhoisClient, WhoisRecord};
