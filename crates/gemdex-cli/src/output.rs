//! Terminal rendering for Gem lists, options and status lines.

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;

use gemdex_core::{Options, view};
use gemdex_core::view::GemEntry;

/// Print a status line for a completed change.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print a note on stderr so stdout stays machine-readable.
pub fn note(msg: &str) {
    eprintln!("{}", msg.dimmed());
}

/// Print a value as JSON, indented when `pretty` is set.
pub fn json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", json);
    Ok(())
}

/// Print one Gem as it appears in the overlay: emoji, name, star, then the
/// description and the Gem's chat URL on indented lines.
pub fn gem_entry(entry: &GemEntry) -> Result<()> {
    let star = if entry.is_favorite {
        " ★".yellow().to_string()
    } else {
        String::new()
    };
    println!("{} {}{}", entry.emoji, entry.record.name.bold(), star);
    if !entry.record.description.is_empty() {
        println!("   {}", entry.record.description);
    }
    let url = view::gem_url(&entry.record.id).context("Failed to build Gem URL")?;
    println!("   {}", url.as_str().dimmed());
    Ok(())
}

/// Print the overlay options under their stored key names.
pub fn options(options: &Options) {
    for (label, value) in [
        ("pinned", options.pinned),
        ("showInEmptyState", options.show_in_empty_state),
        ("showInChat", options.show_in_chat),
    ] {
        println!("{}: {}", label.dimmed(), value);
    }
}
