//! Entry points for the query engine once a result tree is built.
//!
//! An unsorted uid list is an executor bug, never a retryable condition. The
//! caller picks how loudly to fail through [`ViolationPolicy`].

use serde::{Deserialize, Serialize};
use tracing::{Level, debug, error, warn};

use crate::core::dump::{DumpOptions, dump_to_string};
use crate::core::invariants::{
    InvariantViolation, assert_sorted, collect_sorted_violations, validate_sorted,
};
use crate::tree::ResultNode;

/// Tracing target of the dump lines emitted by [`trace_result_tree`].
pub const DUMP_TARGET: &str = "query::dump";

/// What to do when a uid list is found unsorted.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ViolationPolicy {
    /// Return the first violation to the caller.
    #[default]
    Error,
    /// Log every violation and carry on.
    Log,
    /// Panic on the first violation.
    Panic,
}

/// Summary of one checking pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckReport {
    /// Nodes visited.
    pub nodes: usize,
    /// Violations that were logged rather than returned (only under `Log`).
    pub violations: Vec<InvariantViolation>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Check the sorted-uid invariant across `tree` under `policy`.
pub fn check_result_tree(
    tree: Option<&ResultNode>,
    policy: ViolationPolicy,
) -> Result<CheckReport, InvariantViolation> {
    let Some(root) = tree else {
        debug!("no result tree to check");
        return Ok(CheckReport::default());
    };
    let nodes = root.node_count();
    debug!(nodes, ?policy, "checking result tree");

    let violations = match policy {
        ViolationPolicy::Error => {
            if let Err(err) = validate_sorted(Some(root)) {
                warn!(path = %err.path, kind = %err.kind, index = err.index, "result tree invariant violated");
                return Err(err);
            }
            Vec::new()
        }
        ViolationPolicy::Log => {
            let violations = collect_sorted_violations(root);
            for violation in &violations {
                error!(path = %violation.path, kind = %violation.kind, "{violation}");
            }
            violations
        }
        ViolationPolicy::Panic => {
            assert_sorted(Some(root));
            Vec::new()
        }
    };

    debug!(nodes, violations = violations.len(), "result tree checked");
    Ok(CheckReport { nodes, violations })
}

/// Emit the dump of `tree` line by line at debug level under [`DUMP_TARGET`].
pub fn trace_result_tree(tree: Option<&ResultNode>, options: &DumpOptions) {
    if !tracing::enabled!(target: DUMP_TARGET, Level::DEBUG) {
        return;
    }
    let rendered = match dump_to_string(tree, "", options) {
        Ok(rendered) => rendered,
        Err(err) => {
            warn!(error = %err, "failed to render result tree dump");
            return;
        }
    };
    for line in rendered.lines() {
        debug!(target: DUMP_TARGET, "{line}");
    }
}
