use serde::{Deserialize, Serialize};

/// One level of a query result tree.
///
/// `src_uids` holds the graph nodes that reached this point of the query and
/// `dest_uids` the nodes reachable from them via `attr`. Both are sets kept as
/// strictly increasing lists so merge-style set operations can consume them.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ResultNode {
    pub attr: String,
    pub src_uids: Vec<u64>,
    pub dest_uids: Vec<u64>,
    pub children: Vec<ResultNode>,
}

impl ResultNode {
    pub fn new(attr: impl Into<String>) -> Self {
        Self {
            attr: attr.into(),
            ..Self::default()
        }
    }

    pub fn with_src_uids(mut self, uids: impl Into<Vec<u64>>) -> Self {
        self.src_uids = uids.into();
        self
    }

    pub fn with_dest_uids(mut self, uids: impl Into<Vec<u64>>) -> Self {
        self.dest_uids = uids.into();
        self
    }

    pub fn with_children(mut self, children: Vec<ResultNode>) -> Self {
        self.children = children;
        self
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }

    /// Number of levels in this subtree; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1)];
        while let Some((node, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            stack.extend(node.children.iter().map(|child| (child, depth + 1)));
        }
        deepest
    }
}
