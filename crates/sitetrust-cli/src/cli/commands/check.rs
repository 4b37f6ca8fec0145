//! `sitetrust check` - score one address.

use anyhow::Result;

use super::Context;
use crate::cli::args::CheckArgs;
use crate::output::render_report;

pub async fn execute(ctx: Context, args: CheckArgs) -> Result<()> {
    let engine = ctx.engine(args.trusted_domains.as_deref())?;
    let report = engine.check(&args.url).await;

    println!("{}", render_report(&report, ctx.output_format)?);
    Ok(())
}
