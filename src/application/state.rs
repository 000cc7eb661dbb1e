//! Per-widget view state: selection, search string, expansion

use std::collections::HashSet;

use crate::domain::NodeId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeViewState {
    pub selected_ids: Vec<NodeId>,
    pub search_string: String,
    pub expanded_ids: HashSet<NodeId>,
}

impl TreeViewState {
    pub fn is_searching(&self) -> bool {
        !self.search_string.is_empty()
    }

    pub fn is_selected(&self, id: NodeId) -> bool {
        self.selected_ids.contains(&id)
    }

    pub fn is_expanded(&self, id: NodeId) -> bool {
        self.expanded_ids.contains(&id)
    }
}

/// One displayable line of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: NodeId,
    pub depth: i32,
    pub label: String,
    pub has_children: bool,
    pub expanded: bool,
    pub selected: bool,
}
