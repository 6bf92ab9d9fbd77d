//! gemdex - Inspect, replay and browse intercepted Gem lists.
//!
//! A thin wrapper over the gemdex crates: `parse` and `ingest` drive the
//! interception pipeline with captured response bodies, the remaining
//! commands read and edit the local Gem cache.

mod cli;
mod commands;
mod output;
mod store;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};
use commands::{emoji, favorite, ingest, list, options, parse};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.json_logs);

    let root = cli.store;
    match cli.command {
        Commands::Parse(args) => parse::run(args),
        Commands::Ingest(args) => ingest::run(args, store::open(root)?).await,
        Commands::List(args) => list::run(args, store::open(root)?).await,
        Commands::Favorite(args) => favorite::run(args, store::open(root)?).await,
        Commands::Emoji(args) => emoji::run(args, store::open(root)?).await,
        Commands::Options(args) => options::run(args, store::open(root)?).await,
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
