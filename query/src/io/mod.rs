//! Filesystem helpers for the `query` CLI.

pub mod config;
pub mod tree_store;
