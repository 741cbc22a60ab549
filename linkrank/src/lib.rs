// linkrank/src/lib.rs
//! # Linkrank CLI Application
//!
//! This crate provides the command-line interface for the linkrank
//! disambiguation engine: it loads documents and a knowledge base, runs the
//! engine over every document and reports the re-ranked suggestions.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;
