// linkrank/src/logger.rs
//! Logging setup for the `linkrank` binary.
//!
//! Log records go to stderr so stdout stays reserved for results (tables or
//! JSON). `RUST_LOG` is honoured unless a level is forced from the command
//! line.

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

/// Initializes the global logger once; later calls are ignored.
///
/// `level` overrides the default level taken from `RUST_LOG` (or `warn` when
/// it is unset).
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder.target(Target::Stderr).format_timestamp(None);
    // A logger may already be installed when running inside tests.
    let _ = builder.try_init();
}
