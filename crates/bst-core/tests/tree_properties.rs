//! Integration tests: BST invariants under random operation sequences.
//!
//! Uses a seeded RNG so failures are reproducible.

use bst_core::{Key, Settings, TraversalKind, Tree, compute_draw_state};
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;

fn assert_strictly_increasing(keys: &[Key]) {
    for pair in keys.windows(2) {
        assert!(pair[0] < pair[1], "in-order not increasing: {keys:?}");
    }
}

fn random_values(rng: &mut StdRng, n: usize) -> Vec<Key> {
    (0..n).map(|_| rng.gen_range(-50..50)).collect()
}

// ─── Round-trip ─────────────────────────────────────────────────────────

#[test]
fn build_then_in_order_is_sorted_dedupe() {
    let mut rng = StdRng::seed_from_u64(7);
    for n in [0, 1, 2, 3, 10, 64] {
        let values = random_values(&mut rng, n);
        let tree = Tree::from_values(&values);

        let unique: BTreeSet<Key> = values.iter().copied().collect();
        let expected: Vec<Key> = unique.into_iter().collect();
        assert_eq!(tree.in_order(), expected);
        assert_eq!(tree.len(), expected.len());
        assert!(tree.balanced());
    }
}

// ─── Mixed mutation sequences ───────────────────────────────────────────

#[test]
fn random_inserts_and_deletes_keep_invariant() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut tree = Tree::new();
    let mut model = BTreeSet::new();

    for _ in 0..2_000 {
        let key = rng.gen_range(0..60);
        if rng.gen_bool(0.6) {
            let inserted = tree.insert(key);
            assert_eq!(inserted, model.insert(key));
        } else {
            let deleted = tree.delete(key);
            assert_eq!(deleted, model.remove(&key));
        }

        let keys = tree.in_order();
        assert_strictly_increasing(&keys);
        assert_eq!(keys, model.iter().copied().collect::<Vec<_>>());
        assert_eq!(tree.len(), model.len());
    }
}

#[test]
fn insert_existing_key_changes_nothing() {
    let mut tree = Tree::from_values(&[10, 20, 30, 40]);
    let before = tree.pre_order();
    for k in [10, 20, 30, 40] {
        assert!(!tree.insert(k));
    }
    assert_eq!(tree.pre_order(), before);
    assert_eq!(tree.len(), 4);
}

#[test]
fn deleting_a_leaf_removes_exactly_one_key() {
    let mut tree = Tree::from_values(&[1, 2, 3, 4, 5, 6, 7]);
    let before = tree.in_order();
    assert!(tree.delete(7));
    let after = tree.in_order();
    assert_eq!(after.len(), before.len() - 1);
    assert!(!after.contains(&7));
}

#[test]
fn deleting_every_two_child_node_preserves_order() {
    let mut rng = StdRng::seed_from_u64(3);
    let values: Vec<Key> = (0..40).collect();
    let mut tree = Tree::from_values(&values);

    while let Some(root) = tree.root() {
        let victim = if tree.left(root).is_some() && tree.right(root).is_some() {
            tree.key(root)
        } else {
            let keys = tree.in_order();
            keys[rng.gen_range(0..keys.len())]
        };
        let len = tree.len();
        assert!(tree.delete(victim));
        assert_eq!(tree.len(), len - 1);
        assert_strictly_increasing(&tree.in_order());
    }
    assert!(tree.is_empty());
}

// ─── Balance ────────────────────────────────────────────────────────────

#[test]
fn sequential_inserts_unbalance_and_rebalance_fixes() {
    let mut tree = Tree::new();
    for k in 1..=5 {
        tree.insert(k);
    }
    assert!(!tree.balanced());
    assert_eq!(tree.height(), 4);

    let keys = tree.in_order();
    assert!(tree.rebalance());
    assert!(tree.balanced());
    assert_eq!(tree.in_order(), keys);
    assert_eq!(tree.height(), 2);
}

#[test]
fn balanced_matches_root_child_heights() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..50 {
        let mut tree = Tree::new();
        for _ in 0..rng.gen_range(0..30) {
            tree.insert(rng.gen_range(0..100));
        }
        let expected = match tree.root() {
            None => true,
            Some(root) => {
                let lh = tree.subtree_height(tree.left(root));
                let rh = tree.subtree_height(tree.right(root));
                (lh - rh).abs() <= 1
            }
        };
        assert_eq!(tree.balanced(), expected);
    }
}

// ─── Traversals ─────────────────────────────────────────────────────────

#[test]
fn traversals_visit_every_key_once() {
    let tree = Tree::from_values(&(1..=31).collect::<Vec<_>>());
    for kind in TraversalKind::ALL {
        let mut order = tree.order(kind);
        assert_eq!(order.len(), 31, "{kind} traversal length");
        order.sort_unstable();
        assert_eq!(order, (1..=31).collect::<Vec<_>>());
    }
}

// ─── Layout derived from shape ──────────────────────────────────────────

#[test]
fn draw_state_tracks_tree_statistics() {
    let settings = Settings::default();
    let mut tree = Tree::from_values(&[1, 2, 3, 4, 5, 6, 7]);
    tree.insert(8);
    tree.insert(9);
    let state = compute_draw_state(&tree, &settings);

    assert_eq!(state.length, tree.len());
    assert_eq!(state.height, tree.height());
    assert_eq!(state.balanced, tree.balanced());
    assert_eq!(state.edges.len(), tree.len() - 1);
    let keys: Vec<Key> = state.nodes.iter().map(|n| n.key).collect();
    assert_eq!(keys, tree.in_order());

    // No two nodes share an x coordinate.
    let mut xs: Vec<f32> = state.nodes.iter().map(|n| n.x).collect();
    xs.dedup();
    assert_eq!(xs.len(), state.nodes.len());
}
