//! Domain layer: the tree model and its structural operations
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod error;
pub mod node;

pub use arena::{TreeArena, TreeIterator};
pub use error::{DomainError, DomainResult};
pub use node::{NewNode, NodeId, TreeNode, ROOT_DEPTH, ROOT_ID};
