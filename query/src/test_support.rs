//! Test-only helpers for constructing result trees.

use std::path::{Path, PathBuf};

use anyhow::Result;
use tempfile::TempDir;

use crate::io::tree_store::write_tree;
use crate::tree::ResultNode;

/// Create a leaf with explicit uid lists.
pub fn leaf(attr: &str, src_uids: &[u64], dest_uids: &[u64]) -> ResultNode {
    ResultNode::new(attr)
        .with_src_uids(src_uids)
        .with_dest_uids(dest_uids)
}

/// Create a node with children and no destination uids.
pub fn node_with_children(attr: &str, src_uids: &[u64], children: Vec<ResultNode>) -> ResultNode {
    ResultNode::new(attr)
        .with_src_uids(src_uids)
        .with_children(children)
}

/// The two-level forum/thread tree used throughout the docs.
pub fn forum_tree() -> ResultNode {
    node_with_children("forum", &[1, 5, 9], vec![leaf("thread", &[2, 4], &[10, 11])])
}

/// Forum tree whose thread has unsorted destination uids.
pub fn unsorted_forum_tree() -> ResultNode {
    node_with_children("forum", &[1, 5, 9], vec![leaf("thread", &[2, 4], &[11, 10])])
}

/// Scratch directory holding tree and config files for CLI tests.
pub struct TreeDir {
    dir: TempDir,
}

impl TreeDir {
    pub fn new() -> Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir()?,
        })
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Write `tree` as `<name>.json` and return its path.
    pub fn write_tree(&self, name: &str, tree: &ResultNode) -> Result<PathBuf> {
        let path = self.dir.path().join(format!("{name}.json"));
        write_tree(&path, tree)?;
        Ok(path)
    }

    /// Write raw file contents (for malformed inputs) and return the path.
    pub fn write_raw(&self, name: &str, contents: &str) -> Result<PathBuf> {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents)?;
        Ok(path)
    }
}
