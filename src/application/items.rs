//! Item construction strategies for the concrete tree views
//!
//! A tree view is specialized by its payload type and by the factory that
//! builds its items, not by subclassing the view.

use std::fmt;

use tracing::{info, instrument};

use crate::application::tree_view::BaseTreeView;
use crate::config::Settings;
use crate::domain::{DomainError, DomainResult, NewNode, NodeId};

/// Builds the items a tree view is populated with.
pub trait ItemFactory {
    type Payload;

    fn create_item(&self, id: NodeId) -> NewNode<Self::Payload>;
}

/// Items without payload, labelled with their id.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainItems;

impl ItemFactory for PlainItems {
    type Payload = ();

    fn create_item(&self, id: NodeId) -> NewNode<()> {
        NewNode::plain(id)
    }
}

/// Payload of a behavior-tree editor node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BehaviorNode {
    pub kind: BehaviorKind,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BehaviorKind {
    #[default]
    Action,
    Condition,
    Sequence,
    Selector,
}

impl fmt::Display for BehaviorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BehaviorKind::Action => "action",
            BehaviorKind::Condition => "condition",
            BehaviorKind::Sequence => "sequence",
            BehaviorKind::Selector => "selector",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct BehaviorNodeItems;

impl ItemFactory for BehaviorNodeItems {
    type Payload = BehaviorNode;

    fn create_item(&self, id: NodeId) -> NewNode<BehaviorNode> {
        NewNode::new(id, id.to_string(), BehaviorNode::default())
    }
}

pub type BehaviorNodeTreeView = BaseTreeView<BehaviorNode>;

/// Appends `count` sequential top-level items with ids `0..count`.
///
/// Fails without touching the view when `count` exceeds the node id range.
#[instrument(level = "debug", skip(view, factory))]
pub fn populate<F: ItemFactory>(
    view: &mut BaseTreeView<F::Payload>,
    factory: &F,
    count: usize,
) -> DomainResult<()> {
    let count = NodeId::try_from(count).map_err(|_| DomainError::TooManyItems(count))?;
    for id in 0..count {
        view.add_child(factory.create_item(id))?;
    }
    Ok(())
}

/// Builds a behavior-node tree view filled with the configured test data.
pub fn behavior_tree_view(settings: &Settings) -> DomainResult<BehaviorNodeTreeView> {
    let mut view = BehaviorNodeTreeView::new(settings);
    populate(&mut view, &BehaviorNodeItems, settings.test_data_count)?;
    info!(count = view.tree().len(), "behavior node tree view populated");
    Ok(view)
}
