// linkrank-core/src/engines/mod.rs
//! This module contains the concrete enhancement engine implementations.
//!
//! Each engine is a separate file within this directory and implements the
//! `EnhancementEngine` trait.
//!
//! # License
//! MIT OR Apache-2.0

pub mod foaf_engine;
