//! Sorted-uid invariants of a result tree.
//!
//! Every merge-based set operation in the engine (intersection, union,
//! sort-merge joins) assumes `src_uids` and `dest_uids` are strictly
//! increasing. An unsorted list means the executor broke that contract, so
//! these checks report it instead of letting a join return wrong rows.

use std::fmt;

use thiserror::Error;

use crate::core::dump::format_uids;
use crate::core::walk::{Visit, walk};
use crate::tree::ResultNode;

/// Which uid list of a node is being checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UidListKind {
    Src,
    Dest,
}

impl fmt::Display for UidListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UidListKind::Src => f.write_str("src uid"),
            UidListKind::Dest => f.write_str("dest uid"),
        }
    }
}

/// A uid list that is not strictly increasing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "{kind} list not sorted at index {index} in {path} (attr={attr:?}): {}",
    format_uids(.uids)
)]
pub struct InvariantViolation {
    pub attr: String,
    pub path: String,
    pub kind: UidListKind,
    /// First `i` with `uids[i] >= uids[i + 1]`.
    pub index: usize,
    /// Snapshot of the offending list.
    pub uids: Vec<u64>,
}

/// Index of the first adjacent pair that is not strictly increasing.
pub fn first_unsorted_index(uids: &[u64]) -> Option<usize> {
    uids.windows(2).position(|pair| pair[0] >= pair[1])
}

/// Check one uid list of a visited node.
pub fn check_uid_list_sorted(visit: &Visit<'_>, kind: UidListKind) -> Result<(), InvariantViolation> {
    let uids = match kind {
        UidListKind::Src => &visit.node.src_uids,
        UidListKind::Dest => &visit.node.dest_uids,
    };
    match first_unsorted_index(uids) {
        None => Ok(()),
        Some(index) => Err(InvariantViolation {
            attr: visit.node.attr.clone(),
            path: visit.path(),
            kind,
            index,
            uids: uids.clone(),
        }),
    }
}

/// Check both uid lists of every node, stopping at the first violation.
///
/// An absent tree is trivially valid.
pub fn validate_sorted(tree: Option<&ResultNode>) -> Result<(), InvariantViolation> {
    let Some(root) = tree else {
        return Ok(());
    };
    for visit in walk(root) {
        check_uid_list_sorted(&visit, UidListKind::Src)?;
        check_uid_list_sorted(&visit, UidListKind::Dest)?;
    }
    Ok(())
}

/// Every unsorted list in the tree, in traversal order.
pub fn collect_sorted_violations(tree: &ResultNode) -> Vec<InvariantViolation> {
    let mut errors = Vec::new();
    for visit in walk(tree) {
        for kind in [UidListKind::Src, UidListKind::Dest] {
            if let Err(err) = check_uid_list_sorted(&visit, kind) {
                errors.push(err);
            }
        }
    }
    errors
}

/// Panic on the first unsorted list.
///
/// Only for test and debug harnesses; serving code should use
/// [`validate_sorted`] or [`crate::check::check_result_tree`].
pub fn assert_sorted(tree: Option<&ResultNode>) {
    if let Err(err) = validate_sorted(tree) {
        panic!("{err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{forum_tree, leaf, node_with_children, unsorted_forum_tree};

    #[test]
    fn first_unsorted_index_finds_decrease_and_duplicate() {
        assert_eq!(first_unsorted_index(&[]), None);
        assert_eq!(first_unsorted_index(&[7]), None);
        assert_eq!(first_unsorted_index(&[1, 2, 3]), None);
        assert_eq!(first_unsorted_index(&[1, 3, 2]), Some(1));
        assert_eq!(first_unsorted_index(&[4, 4]), Some(0));
        assert_eq!(first_unsorted_index(&[1, 2, 2, 1]), Some(1));
    }

    #[test]
    fn sorted_tree_and_every_subtree_validate() {
        let tree = node_with_children(
            "root",
            &[1, 2],
            vec![
                node_with_children("a", &[3], vec![leaf("a1", &[4, 8], &[9, 10, 11])]),
                leaf("b", &[], &[u64::MAX]),
            ],
        );

        assert_eq!(validate_sorted(Some(&tree)), Ok(()));
        for visit in walk(&tree) {
            assert_eq!(validate_sorted(Some(visit.node)), Ok(()));
        }
    }

    #[test]
    fn absent_tree_is_valid() {
        assert_eq!(validate_sorted(None), Ok(()));
        assert_sorted(None);
    }

    #[test]
    fn empty_and_single_element_lists_never_violate() {
        let tree = node_with_children(
            "",
            &[],
            vec![leaf("one", &[5], &[]), leaf("none", &[], &[3])],
        );
        assert!(collect_sorted_violations(&tree).is_empty());
    }

    #[test]
    fn unsorted_dest_uids_reported_with_snapshot() {
        let err = validate_sorted(Some(&unsorted_forum_tree())).expect_err("should fail");
        assert_eq!(
            err,
            InvariantViolation {
                attr: "thread".to_string(),
                path: "forum/thread[0]".to_string(),
                kind: UidListKind::Dest,
                index: 0,
                uids: vec![11, 10],
            }
        );

        let message = err.to_string();
        assert!(message.contains("dest uid"));
        assert!(message.contains("list not sorted"));
        assert!(message.contains("[11 10]"));
    }

    #[test]
    fn duplicate_src_uid_is_a_violation() {
        let tree = leaf("dup", &[3, 3], &[]);
        let err = validate_sorted(Some(&tree)).expect_err("should fail");
        assert_eq!(err.kind, UidListKind::Src);
        assert!(err.to_string().starts_with("src uid list not sorted"));
    }

    #[test]
    fn src_checked_before_dest() {
        let tree = leaf("both", &[2, 1], &[2, 1]);
        let err = validate_sorted(Some(&tree)).expect_err("should fail");
        assert_eq!(err.kind, UidListKind::Src);
    }

    #[test]
    fn deep_last_leaf_violation_is_found() {
        let tree = node_with_children(
            "root",
            &[1],
            vec![
                leaf("first", &[1, 2], &[3, 4]),
                node_with_children(
                    "second",
                    &[5],
                    vec![node_with_children(
                        "third",
                        &[6],
                        vec![leaf("ok", &[], &[]), leaf("last", &[7], &[9, 8])],
                    )],
                ),
            ],
        );

        let err = validate_sorted(Some(&tree)).expect_err("should fail");
        assert_eq!(err.path, "root/second[1]/third[0]/last[1]");
        assert_eq!(err.kind, UidListKind::Dest);
        assert_eq!(err.index, 0);
    }

    #[test]
    fn collect_reports_every_unsorted_list() {
        let tree = node_with_children(
            "root",
            &[2, 1],
            vec![leaf("a", &[1, 2], &[5, 5]), leaf("b", &[9, 1], &[3, 2])],
        );

        let errors = collect_sorted_violations(&tree);
        let found: Vec<(&str, UidListKind)> = errors
            .iter()
            .map(|err| (err.attr.as_str(), err.kind))
            .collect();
        assert_eq!(
            found,
            vec![
                ("root", UidListKind::Src),
                ("a", UidListKind::Dest),
                ("b", UidListKind::Src),
                ("b", UidListKind::Dest),
            ]
        );
    }

    #[test]
    fn assert_sorted_accepts_forum_tree() {
        assert_sorted(Some(&forum_tree()));
    }

    #[test]
    #[should_panic(expected = "dest uid list not sorted")]
    fn assert_sorted_panics_on_violation() {
        assert_sorted(Some(&unsorted_forum_tree()));
    }
}
