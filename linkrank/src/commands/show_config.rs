// linkrank/src/commands/show_config.rs
//! `linkrank config`: prints the configuration the engine would run with.

use anyhow::{Context, Result};
use std::io::{self, Write};

use super::load_effective_config;
use crate::cli::ConfigCommand;

pub fn run_show_config(cmd: &ConfigCommand) -> Result<()> {
    let config = load_effective_config(cmd.config.as_deref())?;
    let yaml = config.to_yaml().context("Failed to render configuration")?;
    let mut stdout = io::stdout().lock();
    write!(stdout, "{}", yaml)?;
    stdout.flush()?;
    Ok(())
}
