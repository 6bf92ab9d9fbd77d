//! Subcommand implementations.

pub mod emoji;
pub mod favorite;
pub mod ingest;
pub mod list;
pub mod options;
pub mod parse;

use std::io::{self, Read};

use anyhow::{Context, Result};
use clap::Args;

use gemdex_core::GemId;
use gemdex_intercept::config::DEFAULT_RPC_ID;
use gemdex_intercept::{InterceptConfig, MatchMode};

/// Interception settings shared by `parse` and `ingest`.
#[derive(Args, Debug)]
pub struct InterceptArgs {
    /// RPC id whose response carries the Gem list
    #[arg(long, default_value = DEFAULT_RPC_ID)]
    pub rpc_id: String,

    /// Accept every RPC section and every batch request
    #[arg(long)]
    pub broad: bool,

    /// Reject lists whose first id is not longer than this
    #[arg(long)]
    pub min_id_len: Option<usize>,
}

impl InterceptArgs {
    pub fn config(&self) -> InterceptConfig {
        InterceptConfig {
            rpc_id: self.rpc_id.clone(),
            match_mode: if self.broad {
                MatchMode::Broad
            } else {
                MatchMode::Narrow
            },
            min_id_len: self.min_id_len,
            ..InterceptConfig::default()
        }
    }
}

/// Read a captured body from a file, or stdin for `-`.
fn read_input(path: &str) -> Result<String> {
    if path == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read from stdin")?;
        return Ok(buf);
    }

    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))
}

fn gem_id(value: &str) -> Result<GemId> {
    GemId::new(value).context("Invalid Gem id")
}
