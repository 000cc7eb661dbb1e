//! Reorderable, searchable tree-view model for editor tooling.
//!
//! [`domain`] holds the arena tree and its structural operations,
//! [`application`] the tree view controller a host surface drives,
//! [`cli`] a headless terminal host.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod tree_traits;
pub mod util;

pub use application::{BaseTreeView, DragPayload, DropOutcome, DropPreview, TreeViewHost};
pub use domain::{DomainError, NewNode, NodeId, TreeArena, TreeNode, ROOT_ID};
