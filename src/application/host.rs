//! Callbacks the tree view invokes on its host surface

use crate::domain::NodeId;

/// Host surface notified after structural changes.
///
/// The tree view never redraws on its own; after every mutation it asks the
/// host to reload rows, restore `selection` and repaint.
pub trait TreeViewHost {
    /// Rows must be rebuilt and `selection` reselected.
    fn on_structure_changed(&mut self, selection: &[NodeId]);

    /// Visual state changed; redraw.
    fn on_request_repaint(&mut self);
}

/// Host that ignores every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHost;

impl TreeViewHost for NoopHost {
    fn on_structure_changed(&mut self, _selection: &[NodeId]) {}

    fn on_request_repaint(&mut self) {}
}

/// Host that records notifications, for headless hosts and tests.
#[derive(Debug, Default, Clone)]
pub struct RecordingHost {
    pub reloads: usize,
    pub repaints: usize,
    pub last_selection: Option<Vec<NodeId>>,
}

impl TreeViewHost for RecordingHost {
    fn on_structure_changed(&mut self, selection: &[NodeId]) {
        self.reloads += 1;
        self.last_selection = Some(selection.to_vec());
    }

    fn on_request_repaint(&mut self) {
        self.repaints += 1;
    }
}
