//! `sitetrust config` - configuration inspection.

use anyhow::Result;
use colored::Colorize;
use serde_json::json;

use super::Context;
use crate::cli::args::{ConfigArgs, ConfigCommands};
use crate::config::mask_key;
use crate::output::render_data;

pub fn execute(ctx: &Context, args: &ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Show => show_config(ctx),
        ConfigCommands::Path => {
            println!("{}", ctx.config_path.display());
            Ok(())
        }
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    let config = &ctx.config;
    let pagerank_source = if ctx.pagerank_key.is_some() {
        "flag/env"
    } else if config.pagerank_api_key.is_some() {
        "config"
    } else {
        "unset"
    };

    let pagerank_key = ctx
        .pagerank_key
        .as_deref()
        .or(config.pagerank_api_key.as_deref())
        .map(mask_key);
    let trusted_domains = config
        .trusted_domains
        .as_ref()
        .map(|path| path.display().to_string());

    let effective = json!({
        "path": ctx.config_path.display().to_string(),
        "pagerank_api_key": pagerank_key,
        "pagerank_source": pagerank_source,
        "trusted_domains": trusted_domains,
        "listen": config.listen,
        "timeout_secs": config.timeout_secs,
        "user_agent": config.user_agent,
        "max_redirects": config.max_redirects,
        "output_format": ctx.output_format,
    });

    if let Some(data) = render_data(&effective, ctx.output_format)? {
        println!("{data}");
        return Ok(());
    }

    let unset = || "(not set)".dimmed().to_string();

    println!("{}", "Current Configuration:".bold());
    println!("  {} {}", "path:".bold(), ctx.config_path.display());
    println!();
    println!(
        "  {} {} ({pagerank_source})",
        "pagerank_api_key:".bold(),
        pagerank_key.unwrap_or_else(unset)
    );
    println!(
        "  {} {}",
        "trusted_domains:".bold(),
        trusted_domains.unwrap_or_else(unset)
    );
    println!("  {} {}", "listen:".bold(), config.listen);
    println!("  {} {}", "timeout_secs:".bold(), config.timeout_secs);
    println!(
        "  {} {}",
        "user_agent:".bold(),
        config.user_agent.clone().unwrap_or_else(unset)
    );
    println!("  {} {}", "max_redirects:".bold(), config.max_redirects);
    println!("  {} {}", "output_format:".bold(), ctx.output_format);

    Ok(())
}
