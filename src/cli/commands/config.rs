//! Config file commands.

use std::path::Path;

use crate::config::{self, Config};

/// Print where the config file is read from
pub fn cmd_config_path(explicit: Option<&Path>) -> anyhow::Result<()> {
    match explicit.map(Path::to_path_buf).or_else(config::config_path) {
        Some(path) => {
            let state = if path.exists() { "exists" } else { "not created yet" };
            println!("{} ({})", path.display(), state);
            Ok(())
        }
        None => anyhow::bail!(config::ConfigError::NoConfigDir),
    }
}

/// Write a default config file
pub fn cmd_init_config(explicit: Option<&Path>, force: bool) -> anyhow::Result<()> {
    let target = match explicit {
        Some(path) => path.to_path_buf(),
        None => config::config_path().ok_or(config::ConfigError::NoConfigDir)?,
    };

    if target.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {} (use --force to overwrite)",
            target.display()
        );
    }

    let defaults = Config::default();
    let written = match explicit {
        Some(path) => {
            config::save_to(&defaults, path)?;
            path.to_path_buf()
        }
        None => config::save(&defaults)?,
    };
    println!("✓ Wrote default config to {}", written.display());
    println!("  Add your token under [credentials] genius_access_token");
    Ok(())
}
