//! `sitetrust serve` - answer checks over HTTP.

use anyhow::{Context as _, Result};
use colored::Colorize;
use std::sync::Arc;
use tokio::net::TcpListener;

use super::Context;
use crate::cli::args::ServeArgs;
use crate::server;

pub async fn execute(ctx: Context, args: ServeArgs) -> Result<()> {
    let engine = Arc::new(ctx.engine(args.trusted_domains.as_deref())?);
    let listen = args.listen.unwrap_or_else(|| ctx.config.listen.clone());

    let listener = TcpListener::bind(&listen)
        .await
        .with_context(|| format!("Could not listen on {listen}"))?;

    eprintln!(
        "{} {}",
        "Server is running on".bold(),
        listener.local_addr()?.to_string().cyan()
    );

    server::serve(listener, engine).await
}
