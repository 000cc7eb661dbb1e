use std::collections::HashSet;

use generational_arena::{Arena, Index};
use itertools::Itertools;
use tracing::{debug, instrument, trace, warn};

use super::error::{DomainError, DomainResult};
use super::node::{NewNode, NodeId, TreeNode, ROOT_DEPTH, ROOT_ID};

/// Arena-backed tree with a synthetic root.
///
/// Parent links are plain arena indices, so parent and child never own each
/// other. Structural edits that remove nodes go through mark-then-prune:
/// nodes are flagged `removable`, [`TreeArena::prune`] detaches them in one
/// pass and frees every slot no longer reachable from the root.
#[derive(Debug)]
pub struct TreeArena<T> {
    arena: Arena<TreeNode<T>>,
    root: Index,
}

impl<T: Default> Default for TreeArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Default> TreeArena<T> {
    pub fn new() -> Self {
        Self::with_root("Root", T::default())
    }
}

impl<T> TreeArena<T> {
    pub fn with_root(label: impl Into<String>, payload: T) -> Self {
        let mut arena = Arena::new();
        let root = arena.insert(TreeNode {
            id: ROOT_ID,
            depth: ROOT_DEPTH,
            label: label.into(),
            payload,
            parent: None,
            children: Some(Vec::new()),
            removable: false,
        });
        Self { arena, root }
    }

    pub fn root(&self) -> Index {
        self.root
    }

    pub fn root_node(&self) -> &TreeNode<T> {
        &self.arena[self.root]
    }

    /// Number of real nodes (the root is not counted).
    pub fn len(&self) -> usize {
        self.arena.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, idx: Index) -> Option<&TreeNode<T>> {
        self.arena.get(idx)
    }

    pub(crate) fn get_mut(&mut self, idx: Index) -> Option<&mut TreeNode<T>> {
        self.arena.get_mut(idx)
    }

    /// Depth-first search from the root; first match wins.
    #[instrument(level = "trace", skip(self))]
    pub fn find_by_id(&self, id: NodeId) -> Option<Index> {
        self.iter().find(|(_, node)| node.id == id).map(|(idx, _)| idx)
    }

    pub fn node(&self, id: NodeId) -> Option<&TreeNode<T>> {
        self.find_by_id(id).and_then(|idx| self.get(idx))
    }

    pub fn parent_id(&self, id: NodeId) -> Option<NodeId> {
        let node = self.node(id)?;
        node.parent.and_then(|p| self.get(p)).map(|p| p.id)
    }

    pub fn children_ids(&self, id: NodeId) -> Option<Vec<NodeId>> {
        let node = self.node(id)?;
        Some(self.ids_of(node.child_indices()))
    }

    /// Ids of all real nodes in pre-order.
    pub fn ids(&self) -> Vec<NodeId> {
        self.iter().skip(1).map(|(_, node)| node.id).collect()
    }

    fn ids_of(&self, indices: &[Index]) -> Vec<NodeId> {
        indices
            .iter()
            .filter_map(|&idx| self.get(idx))
            .map(|n| n.id)
            .collect()
    }

    /// Pre-order iterator starting at (and including) the root.
    pub fn iter(&self) -> TreeIterator<'_, T> {
        TreeIterator::new(self)
    }

    /// Number of levels below the root; a flat list of top-level nodes has height 1.
    #[instrument(level = "debug", skip(self))]
    pub fn height(&self) -> usize {
        self.calculate_height(self.root) - 1
    }

    fn calculate_height(&self, node_idx: Index) -> usize {
        if let Some(node) = self.get(node_idx) {
            1 + node
                .child_indices()
                .iter()
                .map(|&child| self.calculate_height(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Appends a new node as the last child of `parent_id`.
    #[instrument(level = "trace", skip(self, node), fields(id = node.id))]
    pub fn append_child(&mut self, parent_id: NodeId, node: NewNode<T>) -> DomainResult<Index> {
        let parent = self
            .find_by_id(parent_id)
            .ok_or(DomainError::NotFound(parent_id))?;
        if node.id == ROOT_ID || self.find_by_id(node.id).is_some() {
            return Err(DomainError::DuplicateId(node.id));
        }

        let idx = self.arena.insert(TreeNode::detached(node));
        self.attach(parent, idx);
        Ok(idx)
    }

    /// Pushes `child` at the end of `parent`'s children and restamps its subtree.
    fn attach(&mut self, parent: Index, child: Index) {
        let parent_depth = match self.get_mut(parent) {
            Some(p) => {
                p.children.get_or_insert_with(Vec::new).push(child);
                p.depth
            }
            None => return,
        };
        if let Some(c) = self.get_mut(child) {
            c.parent = Some(parent);
            c.depth = parent_depth + 1;
        }
        self.update_depth(child);
    }

    /// Restamps `parent` and `depth` for every descendant of `idx`.
    #[instrument(level = "trace", skip(self))]
    pub fn update_depth(&mut self, idx: Index) {
        let mut stack = vec![idx];
        while let Some(current) = stack.pop() {
            let (depth, children) = match self.get(current) {
                Some(node) => (node.depth, node.child_indices().to_vec()),
                None => continue,
            };
            for child in children {
                if let Some(c) = self.get_mut(child) {
                    c.parent = Some(current);
                    c.depth = depth + 1;
                    stack.push(child);
                }
            }
        }
    }

    /// True iff `target` is one of `candidates` or a transitive descendant of one.
    pub fn is_self_or_child(&self, candidates: &[Index], target: Index) -> bool {
        if candidates.contains(&target) {
            return true;
        }
        candidates.iter().any(|&candidate| {
            self.get(candidate)
                .is_some_and(|node| self.is_self_or_child(node.child_indices(), target))
        })
    }

    /// Flags a node for the next prune. The root is never flagged.
    pub fn mark_removable(&mut self, idx: Index) -> bool {
        if idx == self.root {
            warn!("refusing to flag the root node");
            return false;
        }
        match self.get_mut(idx) {
            Some(node) => {
                node.removable = true;
                true
            }
            None => false,
        }
    }

    /// Detaches every flagged node reachable from the root, then frees every
    /// arena slot that is no longer reachable. Returns the detached ids.
    ///
    /// # Panics
    /// If the root itself is flagged.
    #[instrument(level = "debug", skip(self))]
    pub fn prune(&mut self) -> Vec<NodeId> {
        assert!(
            !self.root_node().removable,
            "the root node can not be pruned"
        );

        // collect
        let mut detach: Vec<(Index, Index)> = Vec::new();
        let mut stack = vec![self.root];
        while let Some(current) = stack.pop() {
            let Some(node) = self.get(current) else {
                continue;
            };
            for &child in node.child_indices() {
                match self.get(child) {
                    Some(c) if c.removable => detach.push((current, child)),
                    Some(_) => stack.push(child),
                    None => {}
                }
            }
        }

        // apply
        let mut pruned = Vec::with_capacity(detach.len());
        for (parent, child) in detach {
            if let Some(p) = self.get_mut(parent) {
                if let Some(children) = p.children.as_mut() {
                    children.retain(|&c| c != child);
                }
            }
            if let Some(c) = self.get(child) {
                pruned.push(c.id);
            }
        }

        let freed = self.sweep_unreachable();
        debug!(pruned = pruned.len(), freed, "pruned flagged nodes");
        pruned
    }

    fn sweep_unreachable(&mut self) -> usize {
        let reachable: HashSet<Index> = self.iter().map(|(idx, _)| idx).collect();
        let orphans: Vec<Index> = self
            .arena
            .iter()
            .map(|(idx, _)| idx)
            .filter(|idx| !reachable.contains(idx))
            .collect();
        for idx in &orphans {
            self.arena.remove(*idx);
        }
        orphans.len()
    }

    /// Flags every resolvable id and prunes. Stale ids and the root are skipped.
    #[instrument(level = "debug", skip(self))]
    pub fn delete_nodes(&mut self, ids: &[NodeId]) -> Vec<NodeId> {
        let mut flagged = 0;
        for &id in ids {
            match self.find_by_id(id) {
                Some(idx) => {
                    if self.mark_removable(idx) {
                        flagged += 1;
                    }
                }
                None => debug!(id, "skipping stale id"),
            }
        }
        if flagged == 0 {
            return Vec::new();
        }
        self.prune()
    }

    /// Direct removal is not supported; use [`TreeArena::mark_removable`]
    /// followed by [`TreeArena::prune`].
    ///
    /// # Panics
    /// Always.
    pub fn remove(&mut self, id: NodeId) -> ! {
        panic!("direct removal of node {id} is not supported, mark it and prune instead")
    }

    /// Resolves ids in order, dropping unknown and repeated ones.
    fn resolve(&self, ids: &[NodeId]) -> Vec<Index> {
        ids.iter()
            .unique()
            .filter_map(|&id| {
                let found = self.find_by_id(id);
                if found.is_none() {
                    debug!(id, "dragged id not found");
                }
                found
            })
            .collect()
    }

    /// Checks whether `dragged_ids` may be dropped below `target` without
    /// mutating anything. Returns the resolved dragged nodes and the target.
    #[instrument(level = "trace", skip(self))]
    pub fn check_drop(
        &self,
        dragged_ids: &[NodeId],
        target: Option<NodeId>,
    ) -> DomainResult<(Vec<Index>, Index)> {
        let target_id = target.ok_or(DomainError::InvalidTarget)?;
        let first = *dragged_ids.first().ok_or(DomainError::EmptyPayload)?;
        let target_idx = self
            .find_by_id(target_id)
            .ok_or(DomainError::NotFound(target_id))?;

        let dragged = self.resolve(dragged_ids);
        if dragged.is_empty() {
            return Err(DomainError::NotFound(first));
        }
        if self.is_self_or_child(&dragged, target_idx) {
            return Err(DomainError::CycleRejected { target: target_id });
        }
        Ok((dragged, target_idx))
    }
}

impl<T: Clone> TreeArena<T> {
    /// Moves the dragged nodes (with their subtrees) below `target`.
    ///
    /// `insert_index` is taken against the target's children before the
    /// originals are pruned; absent or out of range means append. Returns the
    /// ids that now live under `target`.
    #[instrument(level = "debug", skip(self))]
    pub fn relocate(
        &mut self,
        dragged_ids: &[NodeId],
        target: Option<NodeId>,
        insert_index: Option<usize>,
    ) -> DomainResult<Vec<NodeId>> {
        let (dragged, target_idx) = self.check_drop(dragged_ids, target)?;

        let mut copies = Vec::with_capacity(dragged.len());
        let mut moved = Vec::with_capacity(dragged.len());
        for idx in dragged {
            let Some(original) = self.get_mut(idx) else {
                continue;
            };
            original.removable = true;
            let copy = original.relocation_copy();
            moved.push(copy.id);
            copies.push(self.arena.insert(copy));
        }
        trace!(?moved, "inserting relocation copies");

        let has_children = self.get(target_idx).is_some_and(|t| t.has_children());
        if has_children {
            if let Some(children) = self.get_mut(target_idx).and_then(|t| t.children.as_mut()) {
                match insert_index.filter(|&i| i <= children.len()) {
                    Some(at) => {
                        children.splice(at..at, copies);
                    }
                    None => children.extend(copies),
                }
            }
        } else {
            for copy in copies {
                self.attach(target_idx, copy);
            }
        }

        self.prune();
        self.update_depth(target_idx);
        Ok(moved)
    }
}

pub struct TreeIterator<'a, T> {
    arena: &'a TreeArena<T>,
    stack: Vec<Index>,
}

impl<'a, T> TreeIterator<'a, T> {
    fn new(arena: &'a TreeArena<T>) -> Self {
        Self {
            arena,
            stack: vec![arena.root()],
        }
    }
}

impl<'a, T> Iterator for TreeIterator<'a, T> {
    type Item = (Index, &'a TreeNode<T>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.arena.get(current_idx) {
                // Push children in reverse order for left-to-right traversal
                self.stack.extend(node.child_indices().iter().rev());
                return Some((current_idx, node));
            }
        }
        None
    }
}
