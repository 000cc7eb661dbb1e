use generational_arena::Index;
use tracing::{debug, instrument};

use crate::application::drag::{DragPayload, DropOutcome, DropPreview, DropVisualMode};
use crate::application::host::TreeViewHost;
use crate::application::state::{Row, TreeViewState};
use crate::config::{SearchSettings, Settings};
use crate::domain::{DomainError, DomainResult, NewNode, NodeId, TreeArena, TreeNode, ROOT_ID};

/// Reorderable, searchable tree view over an arena tree.
///
/// The host forwards gestures (drag start, hover, drop, delete key) and the
/// view mutates its tree synchronously, then reports back through
/// [`TreeViewHost`]. `T` is the per-use-case payload carried by every node.
#[derive(Debug)]
pub struct BaseTreeView<T> {
    tree: TreeArena<T>,
    state: TreeViewState,
    search: SearchSettings,
    drag_flag: String,
}

impl<T: Default> BaseTreeView<T> {
    pub fn new(settings: &Settings) -> Self {
        Self::with_state(settings, TreeViewState::default())
    }

    pub fn with_state(settings: &Settings, state: TreeViewState) -> Self {
        Self {
            tree: TreeArena::with_root(settings.root_label.clone(), T::default()),
            state,
            search: settings.search.clone(),
            drag_flag: settings.drag.data_flag.clone(),
        }
    }
}

impl<T> BaseTreeView<T> {
    pub fn tree(&self) -> &TreeArena<T> {
        &self.tree
    }

    pub fn state(&self) -> &TreeViewState {
        &self.state
    }

    /// Appends a top-level node.
    pub fn add_child(&mut self, node: NewNode<T>) -> DomainResult<NodeId> {
        self.append_child(ROOT_ID, node)
    }

    pub fn append_child(&mut self, parent_id: NodeId, node: NewNode<T>) -> DomainResult<NodeId> {
        let id = node.id;
        self.tree.append_child(parent_id, node)?;
        Ok(id)
    }

    pub fn find_by_id(&self, id: NodeId) -> Option<&TreeNode<T>> {
        self.tree.node(id)
    }

    pub fn can_start_drag(&self, selected_ids: &[NodeId]) -> bool {
        !selected_ids.is_empty()
    }

    /// Packages the selection for the platform drag session.
    #[instrument(level = "debug", skip(self))]
    pub fn begin_drag(&self, selected_ids: &[NodeId]) -> Option<DragPayload> {
        if !self.can_start_drag(selected_ids) {
            return None;
        }
        Some(DragPayload::new(self.drag_flag.clone(), selected_ids.to_vec()))
    }

    fn validate_payload(&self, payload: &DragPayload) -> DomainResult<()> {
        if payload.data_flag() != self.drag_flag {
            return Err(DomainError::ForeignPayload(payload.data_flag().to_string()));
        }
        if payload.ids().is_empty() {
            return Err(DomainError::EmptyPayload);
        }
        Ok(())
    }

    /// Decides the drop affordance for a hover position. Never mutates.
    #[instrument(level = "trace", skip(self))]
    pub fn preview_drop(
        &self,
        payload: &DragPayload,
        target: Option<NodeId>,
        insert_index: Option<usize>,
    ) -> DropPreview {
        let checked = self
            .validate_payload(payload)
            .and_then(|_| self.tree.check_drop(payload.ids(), target));
        let visual_mode = match checked {
            Ok(_) => DropVisualMode::Move,
            Err(reason) => {
                debug!(%reason, "drop not accepted");
                DropVisualMode::None
            }
        };
        DropPreview { visual_mode }
    }

    /// Flags every resolvable selected node and prunes them with their
    /// subtrees. Returns the number of nodes removed from their parents;
    /// a selected node below another selected node is not counted.
    #[instrument(level = "debug", skip(self, host))]
    pub fn delete_selection(&mut self, selected_ids: &[NodeId], host: &mut dyn TreeViewHost) -> usize {
        let pruned = self.tree.delete_nodes(selected_ids);
        if pruned.is_empty() {
            return 0;
        }
        let remaining: Vec<NodeId> = self
            .state
            .selected_ids
            .iter()
            .copied()
            .filter(|&id| self.tree.find_by_id(id).is_some())
            .collect();
        self.state
            .expanded_ids
            .retain(|&id| self.tree.find_by_id(id).is_some());
        self.reload_and_select(remaining, host);
        pruned.len()
    }

    fn reload_and_select(&mut self, selection: Vec<NodeId>, host: &mut dyn TreeViewHost) {
        for &id in &selection {
            self.reveal(id);
        }
        host.on_structure_changed(&selection);
        self.state.selected_ids = selection;
        host.on_request_repaint();
    }

    /// Expands every ancestor of `id` so it shows up in [`BaseTreeView::rows`].
    pub fn reveal(&mut self, id: NodeId) {
        let mut current = self.tree.parent_id(id);
        while let Some(parent) = current {
            if parent == ROOT_ID {
                break;
            }
            self.state.expanded_ids.insert(parent);
            current = self.tree.parent_id(parent);
        }
    }

    pub fn set_selection(&mut self, ids: Vec<NodeId>) {
        self.state.selected_ids = ids;
    }

    pub fn selection(&self) -> &[NodeId] {
        &self.state.selected_ids
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.state.search_string = search.into();
    }

    pub fn search(&self) -> &str {
        &self.state.search_string
    }

    pub fn set_expanded(&mut self, id: NodeId, expanded: bool) {
        if expanded {
            self.state.expanded_ids.insert(id);
        } else {
            self.state.expanded_ids.remove(&id);
        }
    }

    pub fn toggle_expanded(&mut self, id: NodeId) {
        let expanded = self.state.is_expanded(id);
        self.set_expanded(id, !expanded);
    }

    pub fn expand_all(&mut self) {
        let parents: Vec<NodeId> = self
            .tree
            .iter()
            .skip(1)
            .filter(|(_, node)| node.has_children())
            .map(|(_, node)| node.id)
            .collect();
        self.state.expanded_ids.extend(parents);
    }

    pub fn collapse_all(&mut self) {
        self.state.expanded_ids.clear();
    }

    fn matches(&self, label: &str) -> bool {
        let search = &self.state.search_string;
        if self.search.case_sensitive {
            label.contains(search.as_str())
        } else {
            label.to_lowercase().contains(&search.to_lowercase())
        }
    }

    fn row(&self, node: &TreeNode<T>, depth: i32) -> Row {
        Row {
            id: node.id,
            depth,
            label: node.label.clone(),
            has_children: node.has_children(),
            expanded: self.state.is_expanded(node.id),
            selected: self.state.is_selected(node.id),
        }
    }

    /// Displayable rows. While searching this is a flat list of matching
    /// nodes in tree order; otherwise only expanded nodes are descended.
    #[instrument(level = "trace", skip(self))]
    pub fn rows(&self) -> Vec<Row> {
        if self.state.is_searching() {
            return self
                .tree
                .iter()
                .skip(1)
                .filter(|(_, node)| self.matches(&node.label))
                .map(|(_, node)| self.row(node, 0))
                .collect();
        }

        let mut rows = Vec::new();
        let mut stack: Vec<Index> = self.tree.root_node().child_indices().iter().rev().copied().collect();
        while let Some(idx) = stack.pop() {
            let Some(node) = self.tree.get(idx) else {
                continue;
            };
            rows.push(self.row(node, node.depth));
            if self.state.is_expanded(node.id) {
                stack.extend(node.child_indices().iter().rev());
            }
        }
        rows
    }

    /// Context-menu summary of an item.
    pub fn describe_item(&self, id: NodeId) -> Option<String> {
        self.find_by_id(id)
            .map(|node| format!("name:{},childCount:{}", node.label, node.child_count()))
    }

    /// Label to copy to the clipboard.
    pub fn display_name(&self, id: NodeId) -> Option<&str> {
        self.find_by_id(id).map(|node| node.label.as_str())
    }
}

impl<T: Clone> BaseTreeView<T> {
    /// Moves the dragged nodes below `target` at `insert_index`, then reloads
    /// the host with the moved ids selected. Rejections leave the tree untouched.
    #[instrument(level = "debug", skip(self, host))]
    pub fn perform_drop(
        &mut self,
        payload: &DragPayload,
        target: Option<NodeId>,
        insert_index: Option<usize>,
        host: &mut dyn TreeViewHost,
    ) -> DropOutcome {
        let relocated = self
            .validate_payload(payload)
            .and_then(|_| self.tree.relocate(payload.ids(), target, insert_index));
        match relocated {
            Ok(moved_ids) => {
                self.reload_and_select(moved_ids.clone(), host);
                DropOutcome::Moved { moved_ids }
            }
            Err(reason) => {
                debug!(%reason, "drop rejected");
                DropOutcome::Rejected { reason }
            }
        }
    }
}
