//! Invariant checks and debug dumps for graph-query result trees.
//!
//! Each query execution produces a tree of [`tree::ResultNode`]s whose uid
//! lists must be strictly increasing for the engine's merge-based set
//! operations to be correct. The crate is split the same way the engine uses
//! it:
//!
//! - **[`core`]**: Read-only passes over a built tree (sortedness validation,
//!   indented dumps). No I/O besides a caller-supplied sink.
//! - **[`check`]**: What the engine calls after building a tree; applies a
//!   [`check::ViolationPolicy`] to validation results.
//! - **[`io`]**: Loading trees and config from disk for the `query` CLI.

pub mod check;
pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod tree;
