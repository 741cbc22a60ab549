// linkrank/src/main.rs
//! Linkrank entry point.
//!
//! Parses the command line, sets up logging and dispatches to the command
//! implementations.

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

use linkrank::cli::{Cli, Commands};
use linkrank::commands::{disambiguate, show_config};
use linkrank::logger;

fn main() -> Result<()> {
    let args = Cli::parse();

    let level = if args.quiet {
        Some(LevelFilter::Off)
    } else if args.debug {
        Some(LevelFilter::Debug)
    } else {
        None
    };
    logger::init_logger(level);

    match args.command {
        Commands::Disambiguate(cmd) => disambiguate::run_disambiguate(&cmd),
        Commands::Config(cmd) => show_config::run_show_config(&cmd),
    }
}
