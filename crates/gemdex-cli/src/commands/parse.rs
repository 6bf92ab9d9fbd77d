//! Parse command implementation.

use anyhow::Result;
use clap::Args;

use super::{InterceptArgs, read_input};
use crate::output;

#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Captured response body (use - for stdin)
    pub file: String,

    #[command(flatten)]
    pub intercept: InterceptArgs,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Print every record list found in the body, one JSON array per list.
pub fn run(args: ParseArgs) -> Result<()> {
    let body = read_input(&args.file)?;
    let parser = args.intercept.config().parser();

    let lists = parser.record_lists(&body);
    if lists.is_empty() {
        output::note("No Gem list found.");
        return Ok(());
    }

    for records in &lists {
        output::json(records, args.pretty)?;
    }

    Ok(())
}
