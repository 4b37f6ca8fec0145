//! # sitetrust-cli
//!
//! Command-line interface and HTTP service for the sitetrust engine.
//!
//! ## Features
//!
//! - **Direct mode**: `sitetrust check <url>` prints a report
//! - **Service mode**: `sitetrust serve` answers `POST /check` over HTTP
//! - **Multiple output formats**: pretty text, JSON, YAML

pub mod cli;
pub mod config;
pub mod logging;
pub mod output;
pub mod server;

pub use cli::run;
