//! Concurrent trust-score orchestration engine.
//!
//! This crate provides the main [`TrustEngine`]: it fetches an address with
//! redirects under its own control, runs every registered probe concurrently
//! and folds their findings into one [`Report`](sitetrust_core::Report).

#![doc(html_root_url = "https://docs.rs/sitetrust-engine/0.1.0")]

mod config;
mod engine;
mod fetch;

pub use config::*;
pub use engine::{TrustEngine, TrustEngineBuilder};
pub use fetch::HttpFetcher;
pub use sitetrust_core::{Result, TrustError};
