//! Sibling reordering tests: placement policy and validation of shift

use rstest::rstest;

use nestedset::{NestedSet, Node, NodeId, TreeError};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Imported 11-node tree used by every shift scenario:
///
/// root
/// ├── node 1
/// ├── node 2
/// │   ├── node 3
/// │   └── node 4
/// ├── node 5
/// │   └── node 6
/// │       └── node 7
/// ├── node 8
/// └── node 9
///     └── node 10
///
/// `ids[i]` is "node i"; `ids[0]` is the root.
fn standard_tree() -> (NestedSet, Vec<NodeId>) {
    init_tracing();
    let root = Node::with_labels(0, 0, 21, "root");
    let nodes = vec![
        Node::with_labels(1, 1, 2, "node 1"),
        Node::with_labels(1, 3, 8, "node 2"),
        Node::with_labels(2, 4, 5, "node 3"),
        Node::with_labels(2, 6, 7, "node 4"),
        Node::with_labels(1, 9, 14, "node 5"),
        Node::with_labels(2, 10, 13, "node 6"),
        Node::with_labels(3, 11, 12, "node 7"),
        Node::with_labels(1, 15, 16, "node 8"),
        Node::with_labels(1, 17, 20, "node 9"),
        Node::with_labels(2, 18, 19, "node 10"),
    ];

    let tree = NestedSet::from_nodes(root, nodes);
    let ids = tree.branch(None);
    (tree, ids)
}

fn branch_labels(tree: &NestedSet) -> Vec<(i64, i64, i64)> {
    tree.branch(None)
        .iter()
        .map(|&id| {
            let n = tree.get(id).unwrap();
            (n.level(), n.left(), n.right())
        })
        .collect()
}

fn assert_labels_contiguous(tree: &NestedSet) {
    let mut labels: Vec<i64> = tree
        .iter()
        .flat_map(|(_, n)| [n.left(), n.right()])
        .collect();
    labels.sort_unstable();
    let expected: Vec<i64> = (0..2 * tree.node_count() as i64).collect();
    assert_eq!(labels, expected, "label set must be 0..2N-1");
}

#[rstest]
#[case::leaf_up_before_leaf_reference(8, 1, vec![
    (0, 0, 21),
    (1, 1, 2),
    (1, 3, 4),
    (1, 5, 10),
    (2, 6, 7),
    (2, 8, 9),
    (1, 11, 16),
    (2, 12, 15),
    (3, 13, 14),
    (1, 17, 20),
    (2, 18, 19),
])]
#[case::leaf_down_before_leaf_reference(1, 8, vec![
    (0, 0, 21),
    (1, 1, 6),
    (2, 2, 3),
    (2, 4, 5),
    (1, 7, 12),
    (2, 8, 11),
    (3, 9, 10),
    (1, 13, 14),
    (1, 15, 16),
    (1, 17, 20),
    (2, 18, 19),
])]
#[case::subtree_up_before_leaf_reference(9, 1, vec![
    (0, 0, 21),
    (1, 1, 4),
    (2, 2, 3),
    (1, 5, 6),
    (1, 7, 12),
    (2, 8, 9),
    (2, 10, 11),
    (1, 13, 18),
    (2, 14, 17),
    (3, 15, 16),
    (1, 19, 20),
])]
#[case::subtree_down_past_reference_subtree(5, 9, vec![
    (0, 0, 21),
    (1, 1, 2),
    (1, 3, 8),
    (2, 4, 5),
    (2, 6, 7),
    (1, 9, 10),
    (1, 11, 14),
    (2, 12, 13),
    (1, 15, 20),
    (2, 16, 19),
    (3, 17, 18),
])]
#[case::adjacent_leaves_swap_in_place(4, 3, vec![
    (0, 0, 21),
    (1, 1, 2),
    (1, 3, 8),
    (2, 4, 5),
    (2, 6, 7),
    (1, 9, 14),
    (2, 10, 13),
    (3, 11, 12),
    (1, 15, 16),
    (1, 17, 20),
    (2, 18, 19),
])]
fn given_standard_tree_when_shifting_then_branch_matches(
    #[case] node: usize,
    #[case] shifted: usize,
    #[case] expected: Vec<(i64, i64, i64)>,
) {
    let (mut tree, ids) = standard_tree();

    tree.shift(ids[node], ids[shifted]).unwrap();

    assert_eq!(branch_labels(&tree), expected);
    assert_labels_contiguous(&tree);
}

#[test]
fn given_operands_at_different_levels_when_shifting_then_level_mismatch() {
    let (mut tree, ids) = standard_tree();
    let before = branch_labels(&tree);

    let result = tree.shift(ids[1], ids[3]);

    assert_eq!(
        result,
        Err(TreeError::LevelMismatch {
            node_level: 1,
            shifted_level: 2,
        })
    );
    assert_eq!(branch_labels(&tree), before);
}

#[test]
fn given_reference_outside_parent_when_shifting_then_out_of_bounds() {
    let (mut tree, ids) = standard_tree();
    let before = branch_labels(&tree);

    // node 3 and node 6 are both level 2 but under different parents
    let result = tree.shift(ids[3], ids[6]);

    assert_eq!(result, Err(TreeError::OutOfParentBounds(ids[6])));
    assert_eq!(branch_labels(&tree), before);
}

#[test]
fn given_unregistered_operand_when_shifting_then_node_not_found() {
    let (mut tree, ids) = standard_tree();
    tree.delete(ids[8]).unwrap();

    let result = tree.shift(ids[8], ids[1]);

    assert_eq!(result, Err(TreeError::NodeNotFound(ids[8])));
}

#[test]
fn given_same_node_twice_when_shifting_then_noop() {
    let (mut tree, ids) = standard_tree();
    let before = branch_labels(&tree);

    tree.shift(ids[2], ids[2]).unwrap();

    assert_eq!(branch_labels(&tree), before);
}
