//! sitetrust - heuristic trust scoring for web addresses
//!
//! Checks one address from the command line, or serves checks over HTTP.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    sitetrust_cli::run().await
}
