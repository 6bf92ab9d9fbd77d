//! Emoji command implementation.

use anyhow::{Context, Result};
use clap::Args;

use gemdex_core::{EmojiGlyph, KeyValueStore};
use gemdex_store::Preferences;

use super::gem_id;
use crate::output;

#[derive(Args, Debug)]
pub struct EmojiArgs {
    /// Gem id
    pub id: String,

    /// Emoji to show for the Gem; omit to restore the default
    pub glyph: Option<String>,
}

pub async fn run<S: KeyValueStore>(args: EmojiArgs, store: S) -> Result<()> {
    let id = gem_id(&args.id)?;
    let prefs = Preferences::new(store);

    match args.glyph {
        Some(glyph) => {
            let glyph = EmojiGlyph::new(&glyph).context("Invalid emoji")?;
            let message = format!("Set {} for {}", glyph, id);
            prefs
                .set_emoji(&id, glyph)
                .await
                .context("Failed to save emoji")?;
            output::success(&message);
        }
        None => {
            let cleared = prefs
                .clear_emoji(&id)
                .await
                .context("Failed to clear emoji")?;
            if cleared {
                output::success(&format!("Cleared emoji for {}", id));
            } else {
                output::note(&format!("No emoji set for {}", id));
            }
        }
    }

    Ok(())
}
