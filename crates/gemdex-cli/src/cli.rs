//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::{emoji, favorite, ingest, list, options, parse};

/// Gem list interception and cache tool.
#[derive(Parser, Debug)]
#[command(name = "gemdex")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Cache directory (defaults to the platform data directory)
    #[arg(long, env = "GEMDEX_STORE", global = true)]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract Gem records from a captured response body
    Parse(parse::ParseArgs),

    /// Replay a captured response through the hooks into the cache
    Ingest(ingest::IngestArgs),

    /// List cached Gems
    List(list::ListArgs),

    /// Star or unstar a Gem
    Favorite(favorite::FavoriteArgs),

    /// Set or clear a Gem's emoji
    Emoji(emoji::EmojiArgs),

    /// Show or change display options
    Options(options::OptionsArgs),
}
