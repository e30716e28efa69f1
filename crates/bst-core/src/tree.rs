//! The binary search tree engine.
//!
//! Nodes live in a `petgraph` arena; each parent → child link is an edge
//! labelled with the `Side` it hangs from. No parent pointers are kept: every
//! operation descends from the root and remembers the path itself.
//!
//! Mutations and explicit traversals append the keys they visit to a `Trace`,
//! which the animation controller later replays.

use crate::model::{Key, Side, TraversalKind, TreeNode};
use crate::trace::Trace;
use petgraph::Direction;
use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableDiGraph;
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::collections::VecDeque;

/// Explicit traversal stack. Balanced trees stay well inside the inline size.
type NodeStack = SmallVec<[NodeIndex; 32]>;

/// Summary of a single node, shown by the stats overlay after a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeInfo {
    pub key: Key,
    /// Height of the subtree rooted at this node (a leaf is `0`).
    pub height: i32,
    /// Distance from the root (the root is `0`).
    pub depth: i32,
}

/// A binary search tree over unique `Key`s.
#[derive(Debug, Clone)]
pub struct Tree {
    graph: StableDiGraph<TreeNode, Side>,
    root: Option<NodeIndex>,
    trace: Trace,
}

impl Tree {
    /// Create an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self {
            graph: StableDiGraph::new(),
            root: None,
            trace: Trace::new(),
        }
    }

    /// Create a balanced tree from arbitrary (possibly duplicated) values.
    pub fn from_values(values: &[Key]) -> Self {
        let mut tree = Self::new();
        tree.build(values);
        tree
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn root(&self) -> Option<NodeIndex> {
        self.root
    }

    pub fn key(&self, idx: NodeIndex) -> Key {
        self.graph[idx].key
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Child of `idx` on the given side.
    pub fn child(&self, idx: NodeIndex, side: Side) -> Option<NodeIndex> {
        self.graph
            .edges_directed(idx, Direction::Outgoing)
            .find(|e| *e.weight() == side)
            .map(|e| e.target())
    }

    pub fn left(&self, idx: NodeIndex) -> Option<NodeIndex> {
        self.child(idx, Side::Left)
    }

    pub fn right(&self, idx: NodeIndex) -> Option<NodeIndex> {
        self.child(idx, Side::Right)
    }

    /// Keys visited by the most recent mutation or traversal.
    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    /// Hand the recorded trace off, leaving an empty one behind.
    pub fn take_trace(&mut self) -> Trace {
        std::mem::take(&mut self.trace)
    }

    /// Replace the link on `side` of `parent` with `child`.
    fn set_child(&mut self, parent: NodeIndex, side: Side, child: Option<NodeIndex>) {
        let existing = self
            .graph
            .edges_directed(parent, Direction::Outgoing)
            .find(|e| *e.weight() == side)
            .map(|e| e.id());
        if let Some(edge) = existing {
            self.graph.remove_edge(edge);
        }
        if let Some(child) = child {
            self.graph.add_edge(parent, child, side);
        }
    }

    // ─── Build ───────────────────────────────────────────────────────────

    /// Replace the tree with a height-balanced one built from `values`.
    ///
    /// Input is deduplicated and sorted; the root of every range is the
    /// element at `floor((lo + hi) / 2)`.
    pub fn build(&mut self, values: &[Key]) {
        let mut keys = values.to_vec();
        keys.sort_unstable();
        keys.dedup();

        self.graph.clear();
        self.trace.clear();
        self.root = self.build_range(&keys);
        log::debug!("built tree with {} keys", keys.len());
    }

    fn build_range(&mut self, keys: &[Key]) -> Option<NodeIndex> {
        if keys.is_empty() {
            return None;
        }
        let mid = (keys.len() - 1) / 2;
        let idx = self.graph.add_node(TreeNode::new(keys[mid]));

        let left = self.build_range(&keys[..mid]);
        let right = self.build_range(&keys[mid + 1..]);
        self.set_child(idx, Side::Left, left);
        self.set_child(idx, Side::Right, right);
        Some(idx)
    }

    // ─── Insert / find / delete ──────────────────────────────────────────

    /// Insert `key`. Returns `false` (and records no trace) if it already exists.
    ///
    /// Every node passed on the way down is recorded before the leaf is attached.
    pub fn insert(&mut self, key: Key) -> bool {
        self.trace.clear();
        let Some(mut current) = self.root else {
            self.build(&[key]);
            return true;
        };

        loop {
            let current_key = self.key(current);
            self.trace.push(current_key);
            let side = match key.cmp(&current_key) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => {
                    self.trace.clear();
                    log::debug!("insert {key}: already present");
                    return false;
                }
            };

            match self.child(current, side) {
                Some(next) => current = next,
                None => {
                    let leaf = self.graph.add_node(TreeNode::new(key));
                    self.graph.add_edge(current, leaf, side);
                    log::debug!("inserted {key} ({} nodes)", self.len());
                    return true;
                }
            }
        }
    }

    /// Locate the node holding `key`.
    pub fn find(&self, key: Key) -> Option<NodeIndex> {
        let mut current = self.root;
        while let Some(idx) = current {
            current = match key.cmp(&self.key(idx)) {
                Ordering::Less => self.left(idx),
                Ordering::Greater => self.right(idx),
                Ordering::Equal => return Some(idx),
            };
        }
        None
    }

    pub fn contains(&self, key: Key) -> bool {
        self.find(key).is_some()
    }

    /// Remove `key`. Returns `false` (and records no trace) if it is absent.
    ///
    /// A node with two children takes its in-order successor's key, and the
    /// successor's original position is unlinked instead. The search path and
    /// the walk down to the successor are both recorded.
    pub fn delete(&mut self, key: Key) -> bool {
        self.trace.clear();

        let mut parent: Option<(NodeIndex, Side)> = None;
        let mut current = self.root;
        let target = loop {
            let Some(idx) = current else {
                self.trace.clear();
                log::debug!("delete {key}: not found");
                return false;
            };
            let current_key = self.key(idx);
            self.trace.push(current_key);
            match key.cmp(&current_key) {
                Ordering::Less => {
                    parent = Some((idx, Side::Left));
                    current = self.left(idx);
                }
                Ordering::Greater => {
                    parent = Some((idx, Side::Right));
                    current = self.right(idx);
                }
                Ordering::Equal => break idx,
            }
        };

        match (self.left(target), self.right(target)) {
            (Some(_), Some(right)) => {
                // Successor search starts at the target's own right child.
                let mut succ_parent = target;
                let mut succ = right;
                self.trace.push(self.key(succ));
                while let Some(next) = self.left(succ) {
                    succ_parent = succ;
                    succ = next;
                    self.trace.push(self.key(succ));
                }

                let succ_key = self.key(succ);
                let succ_right = self.right(succ);
                self.graph[target].key = succ_key;
                self.graph.remove_node(succ);

                let side = if succ_parent == target {
                    Side::Right
                } else {
                    Side::Left
                };
                self.set_child(succ_parent, side, succ_right);
            }
            (left, right) => {
                let child = left.or(right);
                self.graph.remove_node(target);
                match parent {
                    Some((p, side)) => self.set_child(p, side, child),
                    None => self.root = child,
                }
            }
        }

        if self.graph.node_count() == 0 {
            self.graph.clear();
            self.root = None;
        }
        log::debug!("deleted {key} ({} nodes)", self.len());
        true
    }

    /// Reset to the empty tree.
    pub fn clear(&mut self) {
        self.graph.clear();
        self.root = None;
        self.trace.clear();
    }

    // ─── Traversals ──────────────────────────────────────────────────────

    /// Compute a traversal and record it as the trace.
    pub fn traverse(&mut self, kind: TraversalKind) -> Vec<Key> {
        let order = self.order(kind);
        self.trace = order.iter().copied().collect();
        order
    }

    /// Compute a traversal without touching the trace.
    pub fn order(&self, kind: TraversalKind) -> Vec<Key> {
        match kind {
            TraversalKind::Level => self.level_order(),
            TraversalKind::In => self.in_order(),
            TraversalKind::Pre => self.pre_order(),
            TraversalKind::Post => self.post_order(),
        }
    }

    pub fn in_order(&self) -> Vec<Key> {
        let mut out = Vec::with_capacity(self.len());
        let mut stack = NodeStack::new();
        let mut current = self.root;

        while current.is_some() || !stack.is_empty() {
            while let Some(idx) = current {
                stack.push(idx);
                current = self.left(idx);
            }
            if let Some(idx) = stack.pop() {
                out.push(self.key(idx));
                current = self.right(idx);
            }
        }
        out
    }

    pub fn pre_order(&self) -> Vec<Key> {
        let mut out = Vec::with_capacity(self.len());
        let mut stack: NodeStack = self.root.into_iter().collect();

        while let Some(idx) = stack.pop() {
            out.push(self.key(idx));
            stack.extend(self.right(idx));
            stack.extend(self.left(idx));
        }
        out
    }

    pub fn post_order(&self) -> Vec<Key> {
        // Root-right-left pre-order, reversed.
        let mut out = Vec::with_capacity(self.len());
        let mut stack: NodeStack = self.root.into_iter().collect();

        while let Some(idx) = stack.pop() {
            out.push(self.key(idx));
            stack.extend(self.left(idx));
            stack.extend(self.right(idx));
        }
        out.reverse();
        out
    }

    pub fn level_order(&self) -> Vec<Key> {
        let mut out = Vec::with_capacity(self.len());
        let mut queue: VecDeque<NodeIndex> = self.root.into_iter().collect();

        while let Some(idx) = queue.pop_front() {
            out.push(self.key(idx));
            queue.extend(self.left(idx));
            queue.extend(self.right(idx));
        }
        out
    }

    // ─── Shape queries ───────────────────────────────────────────────────

    /// Height of the whole tree; `-1` when empty.
    pub fn height(&self) -> i32 {
        self.subtree_height(self.root)
    }

    /// Height of the subtree rooted at `node`; `-1` for `None`.
    pub fn subtree_height(&self, node: Option<NodeIndex>) -> i32 {
        let mut height = -1;
        let mut level: Vec<NodeIndex> = node.into_iter().collect();
        while !level.is_empty() {
            height += 1;
            level = level
                .iter()
                .flat_map(|&idx| [self.left(idx), self.right(idx)])
                .flatten()
                .collect();
        }
        height
    }

    /// Distance from the root to `key`; `-1` if absent.
    pub fn depth(&self, key: Key) -> i32 {
        let mut depth = 0;
        let mut current = self.root;
        while let Some(idx) = current {
            current = match key.cmp(&self.key(idx)) {
                Ordering::Less => self.left(idx),
                Ordering::Greater => self.right(idx),
                Ordering::Equal => return depth,
            };
            depth += 1;
        }
        -1
    }

    /// Whether the root's two subtrees differ in height by at most one.
    ///
    /// Only the root is checked, not every subtree.
    pub fn balanced(&self) -> bool {
        let Some(root) = self.root else {
            return true;
        };
        let lh = self.subtree_height(self.left(root));
        let rh = self.subtree_height(self.right(root));
        (lh - rh).abs() <= 1
    }

    /// Rebuild from the in-order sequence unless already `balanced()`.
    ///
    /// Returns `true` if the tree was rebuilt; the trace then holds the
    /// in-order keys that were collected.
    pub fn rebalance(&mut self) -> bool {
        if self.balanced() {
            self.trace.clear();
            return false;
        }
        let keys = self.in_order();
        self.build(&keys);
        self.trace = keys.into_iter().collect();
        log::debug!("rebalanced to height {}", self.height());
        true
    }

    /// Key, subtree height, and depth of the node holding `key`.
    pub fn inspect(&self, key: Key) -> Option<NodeInfo> {
        let idx = self.find(key)?;
        Some(NodeInfo {
            key,
            height: self.subtree_height(Some(idx)),
            depth: self.depth(key),
        })
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn seven() -> Tree {
        Tree::from_values(&[1, 2, 3, 4, 5, 6, 7])
    }

    fn sequential(keys: &[Key]) -> Tree {
        let mut tree = Tree::new();
        for &k in keys {
            tree.insert(k);
        }
        tree
    }

    #[test]
    fn build_picks_midpoint_root() {
        let tree = seven();
        assert_eq!(tree.root().map(|r| tree.key(r)), Some(4));
        assert_eq!(tree.len(), 7);
        assert_eq!(tree.height(), 2);
    }

    #[test]
    fn build_even_length_uses_floor_midpoint() {
        let tree = Tree::from_values(&[1, 2, 3, 4]);
        // floor((0 + 3) / 2) = 1 → key 2
        assert_eq!(tree.root().map(|r| tree.key(r)), Some(2));
        assert_eq!(tree.pre_order(), vec![2, 1, 3, 4]);
    }

    #[test]
    fn build_dedupes_and_sorts() {
        let tree = Tree::from_values(&[5, 3, 5, 1, 3, 9]);
        assert_eq!(tree.in_order(), vec![1, 3, 5, 9]);
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn traversal_orders() {
        let tree = seven();
        assert_eq!(tree.in_order(), vec![1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(tree.pre_order(), vec![4, 2, 1, 3, 6, 5, 7]);
        assert_eq!(tree.post_order(), vec![1, 3, 2, 5, 7, 6, 4]);
        assert_eq!(tree.level_order(), vec![4, 2, 6, 1, 3, 5, 7]);
    }

    #[test]
    fn traverse_records_full_order_as_trace() {
        let mut tree = seven();
        let order = tree.traverse(TraversalKind::Pre);
        assert_eq!(tree.trace().to_vec(), order);
    }

    #[test]
    fn insert_records_descent_path() {
        let mut tree = seven();
        assert!(tree.insert(8));
        assert_eq!(tree.trace().to_vec(), vec![4, 6, 7]);
        assert_eq!(tree.depth(8), 3);
    }

    #[test]
    fn insert_into_empty_tree_builds() {
        let mut tree = Tree::new();
        assert!(tree.insert(10));
        assert_eq!(tree.in_order(), vec![10]);
        assert!(tree.trace().is_empty());
    }

    #[test]
    fn insert_duplicate_is_noop() {
        let mut tree = seven();
        assert!(!tree.insert(3));
        assert_eq!(tree.len(), 7);
        assert_eq!(tree.in_order(), vec![1, 2, 3, 4, 5, 6, 7]);
        assert!(tree.trace().is_empty());
    }

    #[test]
    fn delete_leaf() {
        let mut tree = seven();
        assert!(tree.delete(1));
        assert_eq!(tree.in_order(), vec![2, 3, 4, 5, 6, 7]);
        assert_eq!(tree.trace().to_vec(), vec![4, 2, 1]);
    }

    #[test]
    fn delete_node_with_one_child() {
        let mut tree = sequential(&[5, 3, 2]);
        assert!(tree.delete(3));
        assert_eq!(tree.in_order(), vec![2, 5]);
        assert_eq!(tree.depth(2), 1);
    }

    #[test]
    fn delete_two_children_uses_right_subtree_successor() {
        let mut tree = seven();
        assert!(tree.delete(4));
        assert_eq!(tree.root().map(|r| tree.key(r)), Some(5));
        assert_eq!(tree.in_order(), vec![1, 2, 3, 5, 6, 7]);
        // Path to target, then right child and its leftmost descendant.
        assert_eq!(tree.trace().to_vec(), vec![4, 6, 5]);
    }

    #[test]
    fn delete_two_children_successor_is_right_child() {
        let mut tree = sequential(&[4, 2, 6, 7]);
        assert!(tree.delete(4));
        assert_eq!(tree.root().map(|r| tree.key(r)), Some(6));
        assert_eq!(tree.in_order(), vec![2, 6, 7]);
        assert_eq!(tree.depth(7), 1);
    }

    #[test]
    fn delete_successor_with_right_child_reattaches_it() {
        let mut tree = sequential(&[10, 5, 20, 15, 17]);
        assert!(tree.delete(10));
        assert_eq!(tree.in_order(), vec![5, 15, 17, 20]);
        assert_eq!(tree.depth(17), 2);
    }

    #[test]
    fn delete_root_of_single_node_tree_empties() {
        let mut tree = Tree::from_values(&[42]);
        assert!(tree.delete(42));
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.height(), -1);
    }

    #[test]
    fn delete_absent_key_is_noop() {
        let mut tree = seven();
        assert!(!tree.delete(99));
        assert_eq!(tree.len(), 7);
        assert!(tree.trace().is_empty());

        let mut empty = Tree::new();
        assert!(!empty.delete(1));
    }

    #[test]
    fn find_and_depth() {
        let tree = seven();
        assert!(tree.find(5).is_some());
        assert!(tree.find(50).is_none());
        assert_eq!(tree.depth(4), 0);
        assert_eq!(tree.depth(6), 1);
        assert_eq!(tree.depth(7), 2);
        assert_eq!(tree.depth(70), -1);
    }

    #[test]
    fn height_sentinels() {
        assert_eq!(Tree::new().height(), -1);
        assert_eq!(Tree::from_values(&[1]).height(), 0);
    }

    #[test]
    fn balance_checks_root_children_only() {
        assert!(seven().balanced());
        assert!(!sequential(&[1, 2, 3, 4, 5]).balanced());
        assert!(Tree::new().balanced());

        // Root children have equal height, but each is itself a chain.
        let lopsided = sequential(&[10, 5, 20, 4, 3, 21, 22]);
        assert!(lopsided.balanced());
    }

    #[test]
    fn rebalance_preserves_keys() {
        let mut tree = sequential(&[1, 2, 3, 4, 5]);
        let before = tree.in_order();
        assert!(tree.rebalance());
        assert!(tree.balanced());
        assert_eq!(tree.in_order(), before);
        assert_eq!(tree.trace().to_vec(), before);
    }

    #[test]
    fn rebalance_of_balanced_tree_is_noop() {
        let mut tree = seven();
        assert!(!tree.rebalance());
        assert!(tree.trace().is_empty());
        assert_eq!(tree.pre_order(), vec![4, 2, 1, 3, 6, 5, 7]);
    }

    #[test]
    fn inspect_reports_height_and_depth() {
        let tree = seven();
        assert_eq!(
            tree.inspect(2),
            Some(NodeInfo {
                key: 2,
                height: 1,
                depth: 1
            })
        );
        assert_eq!(tree.inspect(8), None);
    }

    #[test]
    fn clear_resets_everything() {
        let mut tree = seven();
        tree.traverse(TraversalKind::Level);
        tree.clear();
        assert!(tree.is_empty());
        assert!(tree.trace().is_empty());
        assert!(tree.in_order().is_empty());
    }

    #[test]
    fn take_trace_drains() {
        let mut tree = seven();
        tree.insert(0);
        let trace = tree.take_trace();
        assert_eq!(trace.to_vec(), vec![4, 2, 1]);
        assert!(tree.trace().is_empty());
    }
}
