//! Options command implementation.

use anyhow::{Context, Result};
use clap::Args;

use gemdex_core::KeyValueStore;
use gemdex_store::Preferences;

use crate::output;

#[derive(Args, Debug)]
pub struct OptionsArgs {
    /// Keep the Gem panel pinned open
    #[arg(long, conflicts_with = "unpin")]
    pub pin: bool,

    /// Let the Gem panel close on its own
    #[arg(long)]
    pub unpin: bool,

    /// Output the options as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run<S: KeyValueStore>(args: OptionsArgs, store: S) -> Result<()> {
    let prefs = Preferences::new(store);
    let mut options = prefs.options().await.context("Failed to read options")?;

    if args.pin || args.unpin {
        options.pinned = args.pin;
        prefs
            .set_options(options)
            .await
            .context("Failed to save options")?;
    }

    if args.json {
        return output::json(&options, false);
    }

    output::options(&options);

    Ok(())
}
