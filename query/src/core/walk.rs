//! Depth-first, pre-order traversal of a result tree.
//!
//! The walk keeps its own work stack instead of recursing, so deeply nested
//! queries cannot exhaust the thread stack. Node paths are only rendered on
//! request; a visit carries a shared link to its parent instead.

use std::rc::Rc;

use crate::tree::ResultNode;

/// Path label used for a root node without an attribute.
pub const ROOT_LABEL: &str = "<root>";

/// A node reached by [`walk`], with its position in the tree.
#[derive(Debug, Clone)]
pub struct Visit<'a> {
    pub node: &'a ResultNode,
    /// Zero for the root.
    pub depth: usize,
    /// Position in the parent's `children`; `None` for the root.
    pub child_index: Option<usize>,
    trail: Rc<Trail<'a>>,
}

/// Link from a visited node back to its parent.
#[derive(Debug)]
struct Trail<'a> {
    attr: &'a str,
    child_index: Option<usize>,
    parent: Option<Rc<Trail<'a>>>,
}

impl Drop for Trail<'_> {
    // Unlink iteratively so a long ancestor chain does not drop recursively.
    fn drop(&mut self) {
        let mut parent = self.parent.take();
        while let Some(link) = parent {
            match Rc::try_unwrap(link) {
                Ok(mut trail) => parent = trail.parent.take(),
                Err(_) => break,
            }
        }
    }
}

impl Visit<'_> {
    /// `/`-separated labels from the root, e.g. `forum/thread[0]`.
    pub fn path(&self) -> String {
        let mut segments = Vec::with_capacity(self.depth + 1);
        let mut link = Some(&self.trail);
        while let Some(trail) = link {
            segments.push(match trail.child_index {
                Some(index) => format!("{}[{}]", trail.attr, index),
                None if trail.attr.is_empty() => ROOT_LABEL.to_string(),
                None => trail.attr.to_string(),
            });
            link = trail.parent.as_ref();
        }
        segments.reverse();
        segments.join("/")
    }
}

/// Iterator returned by [`walk`].
pub struct Walk<'a> {
    stack: Vec<Visit<'a>>,
}

/// Visit `root` and every descendant, parents before children, children in
/// stored order.
pub fn walk(root: &ResultNode) -> Walk<'_> {
    Walk {
        stack: vec![Visit {
            node: root,
            depth: 0,
            child_index: None,
            trail: Rc::new(Trail {
                attr: &root.attr,
                child_index: None,
                parent: None,
            }),
        }],
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = Visit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let visit = self.stack.pop()?;
        // Reverse so the first child is popped next.
        for (index, child) in visit.node.children.iter().enumerate().rev() {
            self.stack.push(Visit {
                node: child,
                depth: visit.depth + 1,
                child_index: Some(index),
                trail: Rc::new(Trail {
                    attr: &child.attr,
                    child_index: Some(index),
                    parent: Some(Rc::clone(&visit.trail)),
                }),
            });
        }
        Some(visit)
    }
}
