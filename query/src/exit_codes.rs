//! Stable exit codes for `query` CLI commands.

/// Tree is sorted, or the dump was written.
pub const OK: i32 = 0;
/// Tree or config could not be read, parsed, or schema-checked.
pub const INVALID: i32 = 1;
/// `query validate` found an unsorted uid list.
pub const UNSORTED: i32 = 2;
