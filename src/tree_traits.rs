//! Text rendering of a tree for terminal output and test diagnostics

use generational_arena::Index;
use termtree::Tree;

use crate::domain::TreeArena;

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl<T> TreeNodeConvert for TreeArena<T> {
    fn to_tree_string(&self) -> Tree<String> {
        fn build_tree<T>(arena: &TreeArena<T>, node_idx: Index, parent_tree: &mut Tree<String>) {
            if let Some(node) = arena.get(node_idx) {
                for &child_idx in node.child_indices() {
                    if let Some(child) = arena.get(child_idx) {
                        let mut child_tree = Tree::new(format!("{} (#{})", child.label, child.id));
                        build_tree(arena, child_idx, &mut child_tree);
                        parent_tree.push(child_tree);
                    }
                }
            }
        }

        let mut tree = Tree::new(self.root_node().label.clone());
        build_tree(self, self.root(), &mut tree);
        tree
    }
}
