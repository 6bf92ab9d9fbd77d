//! List command implementation.

use anyhow::Result;
use clap::Args;

use gemdex_core::{KeyValueStore, view};
use gemdex_store::RecordCache;

use crate::output;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only show Gems whose name or description contains this text
    #[arg(long, short)]
    pub query: Option<String>,

    /// Output the entries as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run<S: KeyValueStore>(args: ListArgs, store: S) -> Result<()> {
    let snapshot = RecordCache::new(store).snapshot().await;
    let entries = view::entries(
        &snapshot.records,
        &snapshot.favorites,
        &snapshot.emoji_map,
        args.query.as_deref(),
    );

    if args.json {
        return output::json(&entries, false);
    }

    if entries.is_empty() {
        output::note("No Gems found.");
        return Ok(());
    }

    for entry in &entries {
        output::gem_entry(entry)?;
    }

    Ok(())
}
