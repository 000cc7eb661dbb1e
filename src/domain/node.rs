//! Tree node data: identity, label, bookkeeping and an opaque payload

use std::fmt;

use generational_arena::Index;

/// Stable node identity, assigned by the host at creation time.
pub type NodeId = i32;

/// Identity of the synthetic root node.
pub const ROOT_ID: NodeId = NodeId::MAX;

/// Depth of the synthetic root node; its direct children sit at depth 0.
pub const ROOT_DEPTH: i32 = -1;

/// A node as handed over by the host, before it is attached to a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNode<T> {
    pub id: NodeId,
    pub label: String,
    pub payload: T,
}

impl<T> NewNode<T> {
    pub fn new(id: NodeId, label: impl Into<String>, payload: T) -> Self {
        Self {
            id,
            label: label.into(),
            payload,
        }
    }
}

impl NewNode<()> {
    /// Node without payload, labelled with its own id.
    pub fn plain(id: NodeId) -> Self {
        Self::new(id, id.to_string(), ())
    }
}

/// Tree node in the arena-backed hierarchy.
#[derive(Debug, Clone)]
pub struct TreeNode<T> {
    pub id: NodeId,
    pub depth: i32,
    pub label: String,
    pub payload: T,
    /// Index of the parent in the arena, None for the root
    pub parent: Option<Index>,
    /// Child indices; None until the node gets its first child
    pub children: Option<Vec<Index>>,
    /// Set between "marked for move-out/delete" and "pruned"
    pub removable: bool,
}

impl<T> TreeNode<T> {
    pub(crate) fn detached(node: NewNode<T>) -> Self {
        Self {
            id: node.id,
            depth: 0,
            label: node.label,
            payload: node.payload,
            parent: None,
            children: None,
            removable: false,
        }
    }

    pub fn has_children(&self) -> bool {
        self.children.as_ref().is_some_and(|c| !c.is_empty())
    }

    pub fn child_count(&self) -> usize {
        self.children.as_ref().map_or(0, Vec::len)
    }

    pub fn child_indices(&self) -> &[Index] {
        self.children.as_deref().unwrap_or(&[])
    }

    pub fn is_root(&self) -> bool {
        self.id == ROOT_ID && self.parent.is_none()
    }
}

impl<T: Clone> TreeNode<T> {
    /// Shallow copy used by relocation: same identity, same child list and
    /// parent handle, never flagged.
    pub(crate) fn relocation_copy(&self) -> Self {
        Self {
            id: self.id,
            depth: self.depth,
            label: self.label.clone(),
            payload: self.payload.clone(),
            parent: self.parent,
            children: self.children.clone(),
            removable: false,
        }
    }
}

impl<T> fmt::Display for TreeNode<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}
