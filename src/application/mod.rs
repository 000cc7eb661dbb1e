//! Application layer: the tree view controller and its host-facing types
//!
//! This layer drives the domain tree in response to host gestures.

pub mod drag;
pub mod error;
pub mod host;
pub mod items;
pub mod state;
pub mod tree_view;

pub use drag::{DragPayload, DropOutcome, DropPreview, DropVisualMode};
pub use error::{ApplicationError, ApplicationResult};
pub use host::{NoopHost, RecordingHost, TreeViewHost};
pub use items::{
    behavior_tree_view, populate, BehaviorKind, BehaviorNode, BehaviorNodeItems,
    BehaviorNodeTreeView, ItemFactory, PlainItems,
};
pub use state::{Row, TreeViewState};
pub use tree_view::BaseTreeView;
