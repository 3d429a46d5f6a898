//! Producer Finder - find the producers behind an artist's catalogue.
//!
//! Resolves an artist through the Genius API, walks their most popular songs,
//! and aggregates every credited producer with a profile and the songs they
//! worked on. Requests are retried with backoff, paced to stay under the
//! upstream rate limits, and cached in memory for the life of the process.

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod genius;
pub mod producers;
#[cfg(test)]
pub mod test_utils;
pub mod timer;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging (stderr keeps --json output clean)
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("producer_finder=info")),
        )
        .init();

    cli::run_command(&args)
}
