//! Tests for the arena tree model: lookup, containment, relocation, pruning

use std::collections::HashSet;

use rstest::{fixture, rstest};

use behavior_tree_view::domain::{DomainError, NewNode, NodeId, TreeArena, ROOT_DEPTH, ROOT_ID};
use behavior_tree_view::util::testing::init_test_setup;

/// Checks parent links, depths and id uniqueness from the root down.
fn assert_invariants<T>(tree: &TreeArena<T>) {
    assert_eq!(tree.root_node().depth, ROOT_DEPTH);
    let mut seen = HashSet::new();
    for (idx, node) in tree.iter() {
        assert!(seen.insert(node.id), "duplicate id {}", node.id);
        assert!(!node.removable, "node {} still flagged", node.id);
        for &child in node.child_indices() {
            let c = tree.get(child).expect("child slot alive");
            assert_eq!(c.parent, Some(idx), "parent link of {}", c.id);
            assert_eq!(c.depth, node.depth + 1, "depth of {}", c.id);
        }
    }
    assert_eq!(seen.len(), tree.len() + 1, "unreachable slots left behind");
}

// root
// ├── A(1)
// └── B(2)
//     └── C(3)
#[fixture]
fn scenario() -> TreeArena<()> {
    init_test_setup();
    let mut tree = TreeArena::new();
    tree.append_child(ROOT_ID, NewNode::new(1, "A", ())).unwrap();
    tree.append_child(ROOT_ID, NewNode::new(2, "B", ())).unwrap();
    tree.append_child(2, NewNode::new(3, "C", ())).unwrap();
    tree
}

// root
// ├── 1
// │   ├── 11
// │   │   └── 111
// │   └── 12
// ├── 2
// │   └── 21
// └── 3
#[fixture]
fn deep() -> TreeArena<()> {
    init_test_setup();
    let mut tree = TreeArena::new();
    for (parent, id) in [
        (ROOT_ID, 1),
        (1, 11),
        (11, 111),
        (1, 12),
        (ROOT_ID, 2),
        (2, 21),
        (ROOT_ID, 3),
    ] {
        tree.append_child(parent, NewNode::plain(id)).unwrap();
    }
    tree
}

fn idx(tree: &TreeArena<()>, id: NodeId) -> generational_arena::Index {
    tree.find_by_id(id).expect("node present")
}

// ============================================================
// Scenarios
// ============================================================

#[rstest]
fn given_scenario_tree_when_dragging_a_under_b_at_zero_then_a_is_first_child(
    mut scenario: TreeArena<()>,
) {
    let moved = scenario.relocate(&[1], Some(2), Some(0)).unwrap();

    assert_eq!(moved, vec![1]);
    assert_eq!(scenario.children_ids(2), Some(vec![1, 3]));
    assert_eq!(scenario.children_ids(ROOT_ID), Some(vec![2]));
    assert_eq!(scenario.node(1).unwrap().depth, 1);
    assert_eq!(scenario.parent_id(1), Some(2));
    assert_invariants(&scenario);
}

#[rstest]
fn given_b_with_child_c_when_dragging_b_onto_c_then_rejected(mut scenario: TreeArena<()>) {
    let before = scenario.ids();

    let result = scenario.relocate(&[2], Some(3), None);

    assert_eq!(result, Err(DomainError::CycleRejected { target: 3 }));
    assert_eq!(scenario.ids(), before);
    assert_eq!(scenario.parent_id(3), Some(2));
    assert_invariants(&scenario);
}

#[rstest]
fn given_scenario_tree_when_deleting_b_then_subtree_is_gone(mut scenario: TreeArena<()>) {
    let pruned = scenario.delete_nodes(&[2]);

    assert_eq!(pruned, vec![2]);
    assert_eq!(scenario.children_ids(ROOT_ID), Some(vec![1]));
    assert!(scenario.find_by_id(3).is_none());
    assert_eq!(scenario.len(), 1);
    assert_invariants(&scenario);
}

#[rstest]
fn given_any_tree_when_finding_unknown_id_then_none(scenario: TreeArena<()>) {
    assert!(scenario.find_by_id(999).is_none());
}

#[test]
fn given_5000_sequential_children_when_finding_last_then_found_in_flat_tree() {
    init_test_setup();
    let mut tree = TreeArena::<()>::new();
    for id in 0..5000 {
        tree.append_child(ROOT_ID, NewNode::plain(id)).unwrap();
    }

    assert_eq!(tree.height(), 1);
    let node = tree.node(4999).expect("last node");
    assert_eq!(node.id, 4999);
    assert_eq!(node.label, "4999");
    assert_eq!(node.depth, 0);
}

// ============================================================
// Containment
// ============================================================

#[rstest]
#[case(1, 111, true)]
#[case(1, 12, true)]
#[case(11, 111, true)]
#[case(2, 2, true)]
#[case(1, 2, false)]
#[case(11, 12, false)]
#[case(111, 1, false)]
fn given_candidate_when_testing_containment_then_matches_descendancy(
    deep: TreeArena<()>,
    #[case] candidate: NodeId,
    #[case] target: NodeId,
    #[case] expected: bool,
) {
    let result = deep.is_self_or_child(&[idx(&deep, candidate)], idx(&deep, target));
    assert_eq!(result, expected);
}

#[rstest]
fn given_several_candidates_when_any_contains_target_then_true(deep: TreeArena<()>) {
    let candidates = [idx(&deep, 3), idx(&deep, 2)];
    assert!(deep.is_self_or_child(&candidates, idx(&deep, 21)));
    assert!(!deep.is_self_or_child(&candidates, idx(&deep, 12)));
}

// ============================================================
// Relocation
// ============================================================

#[rstest]
#[case(1, 111)]
#[case(1, 1)]
#[case(11, 111)]
fn given_target_inside_dragged_subtree_when_relocating_then_tree_unchanged(
    mut deep: TreeArena<()>,
    #[case] dragged: NodeId,
    #[case] target: NodeId,
) {
    let before = deep.ids();
    let result = deep.relocate(&[dragged], Some(target), Some(0));
    assert_eq!(result, Err(DomainError::CycleRejected { target }));
    assert_eq!(deep.ids(), before);
    assert_invariants(&deep);
}

#[rstest]
fn given_missing_target_when_relocating_then_invalid_target(mut deep: TreeArena<()>) {
    assert_eq!(
        deep.relocate(&[1], None, None),
        Err(DomainError::InvalidTarget)
    );
    assert_eq!(
        deep.relocate(&[1], Some(404), None),
        Err(DomainError::NotFound(404))
    );
}

#[rstest]
fn given_only_stale_ids_when_relocating_then_not_found(mut deep: TreeArena<()>) {
    assert_eq!(
        deep.relocate(&[77, 78], Some(3), None),
        Err(DomainError::NotFound(77))
    );
    assert_eq!(deep.relocate(&[], Some(3), None), Err(DomainError::EmptyPayload));
}

#[rstest]
fn given_stale_and_live_ids_when_relocating_then_stale_are_skipped(mut deep: TreeArena<()>) {
    let moved = deep.relocate(&[77, 21], Some(3), None).unwrap();
    assert_eq!(moved, vec![21]);
    assert_eq!(deep.children_ids(3), Some(vec![21]));
    assert_eq!(deep.children_ids(2), Some(vec![]));
    assert_invariants(&deep);
}

#[rstest]
fn given_subtree_when_relocated_deeper_then_descendant_depths_follow(mut deep: TreeArena<()>) {
    deep.relocate(&[1], Some(21), None).unwrap();

    assert_eq!(deep.parent_id(1), Some(21));
    assert_eq!(deep.node(1).unwrap().depth, 2);
    assert_eq!(deep.node(11).unwrap().depth, 3);
    assert_eq!(deep.node(111).unwrap().depth, 4);
    assert_eq!(deep.node(12).unwrap().depth, 3);
    assert_eq!(deep.children_ids(1), Some(vec![11, 12]));
    assert_invariants(&deep);
}

#[rstest]
#[case(Some(0), vec![21, 1, 2, 3])]
#[case(Some(1), vec![1, 21, 2, 3])]
#[case(Some(3), vec![1, 2, 3, 21])]
#[case(Some(4), vec![1, 2, 3, 21])]
#[case(None, vec![1, 2, 3, 21])]
fn given_insert_index_when_dropping_on_root_then_batch_lands_in_order(
    mut deep: TreeArena<()>,
    #[case] index: Option<usize>,
    #[case] expected: Vec<NodeId>,
) {
    deep.relocate(&[21], Some(ROOT_ID), index).unwrap();
    assert_eq!(deep.children_ids(ROOT_ID), Some(expected));
    assert_invariants(&deep);
}

#[rstest]
fn given_multi_drag_when_dropping_then_input_order_is_preserved(mut deep: TreeArena<()>) {
    let moved = deep.relocate(&[3, 12], Some(2), Some(0)).unwrap();
    assert_eq!(moved, vec![3, 12]);
    assert_eq!(deep.children_ids(2), Some(vec![3, 12, 21]));
    assert_eq!(deep.children_ids(1), Some(vec![11]));
    assert_invariants(&deep);
}

#[rstest]
fn given_ancestor_and_descendant_dragged_when_dropping_then_both_relocated_independently(
    mut deep: TreeArena<()>,
) {
    let moved = deep.relocate(&[1, 11], Some(3), None).unwrap();

    assert_eq!(moved, vec![1, 11]);
    assert_eq!(deep.children_ids(3), Some(vec![1, 11]));
    assert_eq!(deep.children_ids(1), Some(vec![12]));
    assert_eq!(deep.children_ids(11), Some(vec![111]));
    assert_eq!(deep.node(111).unwrap().depth, 2);
    assert_invariants(&deep);
}

#[rstest]
fn given_relocated_node_when_finding_by_id_then_exactly_one_unflagged_match(
    mut deep: TreeArena<()>,
) {
    deep.relocate(&[11], Some(3), None).unwrap();

    let matches: Vec<_> = deep.iter().filter(|(_, n)| n.id == 11).collect();
    assert_eq!(matches.len(), 1);
    assert!(!matches[0].1.removable);
    assert_eq!(deep.parent_id(11), Some(3));
    assert_eq!(deep.len(), 7);
}

#[rstest]
fn given_sequence_of_moves_and_deletes_then_invariants_hold(mut deep: TreeArena<()>) {
    deep.relocate(&[2], Some(111), None).unwrap();
    deep.relocate(&[21, 3], Some(12), Some(0)).unwrap();
    deep.delete_nodes(&[11]);
    deep.relocate(&[12], Some(ROOT_ID), Some(0)).unwrap();

    assert_eq!(deep.ids(), vec![12, 21, 3, 1]);
    assert_invariants(&deep);
}

// ============================================================
// Deletion
// ============================================================

#[rstest]
fn given_stale_ids_when_deleting_then_nothing_changes(mut deep: TreeArena<()>) {
    assert!(deep.delete_nodes(&[404]).is_empty());
    assert!(deep.delete_nodes(&[ROOT_ID]).is_empty());
    assert_eq!(deep.len(), 7);
}

#[rstest]
fn given_parent_and_child_selected_when_deleting_then_both_gone(mut deep: TreeArena<()>) {
    let pruned = deep.delete_nodes(&[111, 1]);
    assert_eq!(pruned, vec![1]);
    assert_eq!(deep.ids(), vec![2, 21, 3]);
    assert_invariants(&deep);
}

#[rstest]
#[should_panic(expected = "not supported")]
fn given_direct_removal_when_called_then_panics(mut deep: TreeArena<()>) {
    deep.remove(21);
}
