//! Drag session payload and drop results

use crate::domain::{DomainError, NodeId};

/// Data a host hands to its platform drag session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragPayload {
    data_flag: String,
    ids: Vec<NodeId>,
}

impl DragPayload {
    pub fn new(data_flag: impl Into<String>, ids: Vec<NodeId>) -> Self {
        Self {
            data_flag: data_flag.into(),
            ids,
        }
    }

    pub fn data_flag(&self) -> &str {
        &self.data_flag
    }

    pub fn ids(&self) -> &[NodeId] {
        &self.ids
    }
}

/// Visual affordance shown while hovering a drop position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DropVisualMode {
    #[default]
    None,
    Move,
}

/// Result of a non-mutating drop check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropPreview {
    pub visual_mode: DropVisualMode,
}

impl DropPreview {
    pub fn accepted(&self) -> bool {
        self.visual_mode == DropVisualMode::Move
    }
}

/// Result of a drop. Rejections are no-ops, never errors for the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    Moved { moved_ids: Vec<NodeId> },
    Rejected { reason: DomainError },
}

impl DropOutcome {
    pub fn moved_ids(&self) -> &[NodeId] {
        match self {
            DropOutcome::Moved { moved_ids } => moved_ids,
            DropOutcome::Rejected { .. } => &[],
        }
    }

    pub fn is_moved(&self) -> bool {
        matches!(self, DropOutcome::Moved { .. })
    }

    pub fn visual_mode(&self) -> DropVisualMode {
        match self {
            DropOutcome::Moved { .. } => DropVisualMode::Move,
            DropOutcome::Rejected { .. } => DropVisualMode::None,
        }
    }
}
