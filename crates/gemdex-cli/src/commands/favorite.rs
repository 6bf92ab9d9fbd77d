//! Favorite command implementation.

use anyhow::{Context, Result};
use clap::Args;

use gemdex_core::KeyValueStore;
use gemdex_store::Preferences;

use super::gem_id;
use crate::output;

#[derive(Args, Debug)]
pub struct FavoriteArgs {
    /// Gem id
    pub id: String,
}

pub async fn run<S: KeyValueStore>(args: FavoriteArgs, store: S) -> Result<()> {
    let id = gem_id(&args.id)?;
    let starred = Preferences::new(store)
        .toggle_favorite(&id)
        .await
        .context("Failed to update favorites")?;

    if starred {
        output::success(&format!("Starred {}", id));
    } else {
        output::success(&format!("Unstarred {}", id));
    }

    Ok(())
}
