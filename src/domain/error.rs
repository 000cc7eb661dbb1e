//! Domain-level errors (no external dependencies)

use thiserror::Error;

use super::node::NodeId;

/// Domain errors describe why a structural operation did not happen.
///
/// None of these are fatal: relocation and deletion turn them into a no-op
/// and the host only sees "nothing changed".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("node not found: {0}")]
    NotFound(NodeId),

    #[error("drop target missing")]
    InvalidTarget,

    #[error("cannot move a node below itself or its descendants (target: {target})")]
    CycleRejected { target: NodeId },

    #[error("node id already in use: {0}")]
    DuplicateId(NodeId),

    #[error("drag payload does not belong to this tree view: {0}")]
    ForeignPayload(String),

    #[error("drag payload carries no node ids")]
    EmptyPayload,

    #[error("cannot create {0} items: ids would not fit a node id")]
    TooManyItems(usize),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
