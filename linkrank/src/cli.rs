// linkrank/src/cli.rs
//! This file defines the command-line interface (CLI) for the linkrank application,
//! including all available commands and their arguments.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "linkrank",
    author = "Relay",
    version = env!("CARGO_PKG_VERSION"),
    about = "Re-rank entity link suggestions of enhanced documents",
    long_about = "Linkrank re-scores the entity suggestions attached to the mentions of a document. Each candidate entity is looked up in a knowledge base; its new confidence combines the upstream confidence, whether its name matches the mention text, and how strongly it references the same things as the other candidates of the document.",
    arg_required_else_help = true
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', global = true, conflicts_with = "debug", help = "Suppress all log output.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `linkrank` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Re-scores the entity suggestions of one or more documents.
    #[command(about = "Re-score the entity suggestions of one or more documents.")]
    Disambiguate(DisambiguateCommand),

    /// Prints the effective engine configuration.
    #[command(about = "Print the effective engine configuration as YAML.")]
    Config(ConfigCommand),
}

/// Arguments for the `disambiguate` command.
#[derive(Args, Debug)]
pub struct DisambiguateCommand {
    /// Document files (JSON content items) to process.
    #[arg(
        long = "document",
        short = 'i',
        value_name = "FILE",
        required = true,
        num_args = 1..,
        help = "Document file(s) to process; may be repeated."
    )]
    pub documents: Vec<PathBuf>,

    /// Knowledge base JSON file.
    #[arg(
        long = "kb",
        value_name = "FILE",
        conflicts_with = "entityhub",
        required_unless_present = "entityhub",
        help = "Look entities up in a local knowledge base JSON file."
    )]
    pub kb: Option<PathBuf>,

    /// Base URL of a remote Entityhub.
    #[arg(
        long = "entityhub",
        value_name = "URL",
        env = "LINKRANK_ENTITYHUB_URL",
        help = "Look entities up on a remote Entityhub."
    )]
    pub entityhub: Option<String>,

    /// Path to a custom engine configuration file (YAML).
    #[arg(long = "config", value_name = "FILE", help = "Path to a custom engine configuration file (YAML).")]
    pub config: Option<PathBuf>,

    /// Overwrite every document with its updated metadata.
    #[arg(long = "in-place", conflicts_with = "output_dir", help = "Write results back into the document files.")]
    pub in_place: bool,

    /// Write updated documents into this directory, keeping their file names.
    #[arg(long = "output-dir", short = 'o', value_name = "DIR", help = "Write updated documents into this directory.")]
    pub output_dir: Option<PathBuf>,

    /// Print the reports as JSON instead of tables.
    #[arg(long = "json", help = "Print the reports as JSON to stdout.")]
    pub json: bool,
}

/// Arguments for the `config` command.
#[derive(Args, Debug)]
pub struct ConfigCommand {
    /// Path to a custom engine configuration file (YAML) to merge over the defaults.
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,
}
