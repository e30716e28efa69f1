//! Tree layout solver.
//!
//! Converts the tree shape into a `DrawState`: x from the in-order index,
//! y from the depth. A full rebuild runs after every structural mutation;
//! node counts are capped, so there is no incremental relayout.

use crate::model::*;
use crate::settings::Settings;
use crate::tree::Tree;
use petgraph::graph::NodeIndex;

/// Compute the paintable state of `tree`.
pub fn compute_draw_state(tree: &Tree, settings: &Settings) -> DrawState {
    let Some(root) = tree.root() else {
        return DrawState::empty();
    };

    let mut pass = LayoutPass {
        tree,
        scale_x: settings.scale_x,
        scale_y: settings.scale_y,
        counter: 0,
        nodes: Vec::with_capacity(tree.len()),
        edges: Vec::with_capacity(tree.len().saturating_sub(1)),
        max_depth: 0,
    };
    let root_position = pass.place(root, 0);

    let r = settings.node_radius;
    let (leftmost, rightmost) = match (pass.nodes.first(), pass.nodes.last()) {
        (Some(first), Some(last)) => (first.x, last.x),
        _ => (root_position.x, root_position.x),
    };
    let deepest_y = pass.max_depth as f32 * settings.scale_y;

    let bounding_box = BoundingBox {
        x: leftmost - r,
        y: root_position.y - r,
        w: rightmost + r,
        h: deepest_y + r,
    };

    let height = tree.height();
    debug_assert_eq!(height, pass.max_depth as i32);

    DrawState {
        length: pass.nodes.len(),
        nodes: pass.nodes,
        edges: pass.edges,
        bounding_box,
        root_position,
        height,
        balanced: tree.balanced(),
    }
}

struct LayoutPass<'a> {
    tree: &'a Tree,
    scale_x: f32,
    scale_y: f32,
    /// In-order index of the next node to place.
    counter: usize,
    nodes: Vec<DrawNode>,
    edges: Vec<DrawEdge>,
    max_depth: usize,
}

impl LayoutPass<'_> {
    /// Place the subtree at `idx` and return the position of `idx` itself.
    /// Edges to the children are emitted once the parent's x is known.
    fn place(&mut self, idx: NodeIndex, depth: usize) -> Point {
        self.max_depth = self.max_depth.max(depth);

        let left = self.tree.left(idx).map(|l| self.place(l, depth + 1));

        let pos = Point::new(
            self.counter as f32 * self.scale_x,
            depth as f32 * self.scale_y,
        );
        self.counter += 1;
        self.nodes.push(DrawNode {
            key: self.tree.key(idx),
            x: pos.x,
            y: pos.y,
            highlighted: false,
            deleted: false,
        });

        let right = self.tree.right(idx).map(|r| self.place(r, depth + 1));

        for child in [left, right].into_iter().flatten() {
            self.edges.push(DrawEdge {
                x1: pos.x,
                y1: pos.y,
                x2: child.x,
                y2: child.y,
            });
        }
        pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        Settings::default()
    }

    #[test]
    fn empty_tree_gives_sentinel() {
        let state = compute_draw_state(&Tree::new(), &settings());
        assert_eq!(state, DrawState::empty());
    }

    #[test]
    fn single_node() {
        let state = compute_draw_state(&Tree::from_values(&[7]), &settings());
        assert_eq!(state.length, 1);
        assert_eq!(state.height, 0);
        assert!(state.edges.is_empty());
        assert_eq!(state.root_position, Point::new(0.0, 0.0));
        assert_eq!(
            state.bounding_box,
            BoundingBox {
                x: -25.0,
                y: -25.0,
                w: 25.0,
                h: 25.0
            }
        );
    }

    #[test]
    fn x_follows_in_order_and_y_follows_depth() {
        let s = settings();
        let tree = Tree::from_values(&[1, 2, 3, 4, 5, 6, 7]);
        let state = compute_draw_state(&tree, &s);

        for (i, node) in state.nodes.iter().enumerate() {
            assert_eq!(node.key, i as i64 + 1);
            assert_eq!(node.x, i as f32 * s.scale_x);
            assert_eq!(node.y, tree.depth(node.key) as f32 * s.scale_y);
        }
        assert_eq!(state.root_position, Point::new(3.0 * s.scale_x, 0.0));
        assert_eq!(state.edges.len(), 6);
        assert!(state.balanced);
    }

    #[test]
    fn edges_connect_parent_to_child() {
        let s = settings();
        let tree = Tree::from_values(&[1, 2, 3]);
        let state = compute_draw_state(&tree, &s);
        let root = state.node(2).unwrap();
        for edge in &state.edges {
            assert_eq!((edge.x1, edge.y1), (root.x, root.y));
            assert_eq!(edge.y2, s.scale_y);
        }
    }

    #[test]
    fn bounding_box_spans_extremes() {
        let s = settings();
        let mut tree = Tree::new();
        for k in [1, 2, 3, 4] {
            tree.insert(k);
        }
        let state = compute_draw_state(&tree, &s);
        assert_eq!(state.height, 3);
        assert!(!state.balanced);
        assert_eq!(state.bounding_box.x, -s.node_radius);
        assert_eq!(state.bounding_box.w, 3.0 * s.scale_x + s.node_radius);
        assert_eq!(state.bounding_box.y, -s.node_radius);
        assert_eq!(state.bounding_box.h, 3.0 * s.scale_y + s.node_radius);
    }
}
