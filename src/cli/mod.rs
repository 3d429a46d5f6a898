//! Command-line interface for producer-finder.
//!
//! This module provides commands for searching artists, listing their songs
//! and aggregating the producers credited on them.

mod commands;

pub use commands::{Cli, Commands, run_command};
