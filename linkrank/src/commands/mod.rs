// linkrank/src/commands/mod.rs
//! Implementations of the `linkrank` subcommands.

pub mod disambiguate;
pub mod show_config;

use anyhow::{Context, Result};
use log::debug;
use std::path::Path;

use linkrank_core::{merge_config, DisambiguationConfig};

/// The embedded defaults, overlaid with the user's file when one is given.
pub fn load_effective_config(user_path: Option<&Path>) -> Result<DisambiguationConfig> {
    let defaults = DisambiguationConfig::load_default().context("Failed to load default configuration")?;
    let user = match user_path {
        Some(path) => {
            debug!("Merging user configuration from {}", path.display());
            Some(DisambiguationConfig::load_from_file(path)?)
        }
        None => None,
    };
    let merged = merge_config(defaults, user);
    merged.validate().context("Merged configuration is invalid")?;
    Ok(merged)
}
