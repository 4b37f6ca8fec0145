//! Core types and contracts for the sitetrust scoring engine.
//!
//! This crate provides the foundational pieces shared by the engine, the
//! probes and the command-line front end:
//!
//! - **Types**: [`Finding`], [`Report`], [`RedirectEvent`] and friends
//! - **Contracts**: the [`Probe`] and [`Fetcher`] traits the engine is built on
//! - **Errors**: the [`TrustError`] taxonomy
//!
//! # Example
//!
//! ```rust,ignore
//! use sitetrust_core::{Finding, Probe};
//!
//! struct AlwaysFine;
//!
//! #[async_trait::async_trait]
//! impl Probe for AlwaysFine {
//!     fn name(&self) -> &str {
//!         "always-fine"
//!     }
//!
//!     async fn check(&self, _address: &url::Url) -> Finding {
//!         Finding::new(1.0, ["- nothing to report"])
//!     }
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/sitetrust-core/0.1.0")]

mod error;
mod probe;
pub mod types;

pub use error::{Result, TrustError};
pub use probe::{FetchOutcome, Fetcher, Probe};
pub use types::*;
