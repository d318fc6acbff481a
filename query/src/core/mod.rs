//! Pure passes over an already-built result tree.
//!
//! Core modules never mutate the tree and perform no I/O beyond the sink a
//! caller hands to [`dump::dump`].

pub mod dump;
pub mod invariants;
pub mod walk;
