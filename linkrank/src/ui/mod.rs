// linkrank/src/ui/mod.rs
//! Console rendering of disambiguation results.

pub mod ranking_table;
