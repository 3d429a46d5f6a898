//! CLI command definitions and dispatch.
//!
//! Each group of subcommands lives in its own submodule:
//! - `search`: Artist search, song listing and producer aggregation
//! - `config`: Config file location and initialization

mod config;
mod search;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::runtime::Runtime;

pub use config::{cmd_config_path, cmd_init_config};
pub use search::{cmd_producers, cmd_search, cmd_songs};

use crate::config::Config;

/// Producer Finder CLI
#[derive(Parser)]
#[command(
    author,
    version,
    about = "Find the producers behind an artist's songs",
    long_about = None
)]
pub struct Cli {
    /// Genius API access token (overrides the config file)
    #[arg(long, env = "GENIUS_ACCESS_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,

    /// Log start/stop of named timers
    #[arg(long, env = "DEBUG_TIMERS", global = true)]
    pub debug_timers: bool,

    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Find the producers credited on an artist's songs
    Search {
        /// Artist name to search for
        query: String,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// List an artist's songs (most popular first, up to the page cap)
    Songs {
        /// Upstream artist ID
        artist_id: u64,
    },
    /// Aggregate producers for a known artist ID
    Producers {
        /// Upstream artist ID
        artist_id: u64,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the config file location
    ConfigPath,
    /// Write a config file populated with defaults
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Run the selected command.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let config = effective_config(cli);

    match &cli.command {
        Commands::Search { query, json } => {
            let rt = Runtime::new()?;
            cmd_search(&rt, &config, query, *json)
        }
        Commands::Songs { artist_id } => {
            let rt = Runtime::new()?;
            cmd_songs(&rt, &config, *artist_id)
        }
        Commands::Producers { artist_id, json } => {
            let rt = Runtime::new()?;
            cmd_producers(&rt, &config, *artist_id, *json)
        }
        Commands::ConfigPath => cmd_config_path(cli.config.as_deref()),
        Commands::InitConfig { force } => cmd_init_config(cli.config.as_deref(), *force),
    }
}

/// Config file contents with command-line and environment overrides applied
fn effective_config(cli: &Cli) -> Config {
    let mut config = match &cli.config {
        Some(path) => crate::config::load_from(path),
        None => crate::config::load(),
    };

    if let Some(token) = &cli.token {
        config.credentials.genius_access_token = Some(token.clone());
    }
    if cli.debug_timers {
        config.diagnostics.debug_timers = true;
    }
    config
}
