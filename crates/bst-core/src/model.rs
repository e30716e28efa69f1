//! Core data model for the BST visualizer.
//!
//! The tree itself is an arena of `TreeNode` values linked by `Side`-labelled
//! edges (see `tree.rs`). Everything the painter needs is flattened into a
//! `DrawState`, which is always derived from the tree shape and never edited
//! independently, apart from the ephemeral `highlighted` / `deleted` marks the
//! animation controller applies during playback.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Key type stored in the tree. Totally ordered, unique per tree.
pub type Key = i64;

// ─── Tree arena ──────────────────────────────────────────────────────────

/// Which child link an edge represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

/// A single node in the tree arena. Links live on the graph edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    pub key: Key,
}

impl TreeNode {
    pub const fn new(key: Key) -> Self {
        Self { key }
    }
}

// ─── Traversal ───────────────────────────────────────────────────────────

/// The four traversal orders the visualizer can animate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TraversalKind {
    /// Breadth-first, FIFO discovery order.
    Level,
    In,
    Pre,
    Post,
}

impl TraversalKind {
    pub const ALL: [Self; 4] = [Self::Level, Self::In, Self::Pre, Self::Post];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Level => "level",
            Self::In => "in",
            Self::Pre => "pre",
            Self::Post => "post",
        }
    }
}

impl fmt::Display for TraversalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TraversalKind {
    type Err = String;

    /// Accepts `level`, `in`, `pre`, `post`, with or without an `order`
    /// suffix (`inOrder`, `pre-order`, `post_order`), case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let name = lower
            .trim_end_matches("order")
            .trim_end_matches(['-', '_', ' ']);
        match name {
            "level" => Ok(Self::Level),
            "in" => Ok(Self::In),
            "pre" => Ok(Self::Pre),
            "post" => Ok(Self::Post),
            _ => Err(format!("Unknown traversal kind: {s}")),
        }
    }
}

// ─── Draw state (output of layout solver) ────────────────────────────────

/// A 2-D point in layout or world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A positioned node, ready to paint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawNode {
    pub key: Key,
    pub x: f32,
    pub y: f32,
    pub highlighted: bool,
    pub deleted: bool,
}

impl DrawNode {
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// A parent → child connector. `(x1, y1)` is the parent, `(x2, y2)` the child.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawEdge {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

/// Extent of the laid-out tree.
///
/// `x`/`y` are the left/top edges; `w`/`h` are the right/bottom edges
/// (leftmost and deepest node centres padded by the node radius), not a
/// width and height.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// Flattened, paintable snapshot of the tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawState {
    /// Nodes in in-order (ascending key) order.
    pub nodes: Vec<DrawNode>,
    pub edges: Vec<DrawEdge>,
    pub bounding_box: BoundingBox,
    pub root_position: Point,
    pub length: usize,
    /// Height of the root; `-1` for the empty tree.
    pub height: i32,
    pub balanced: bool,
}

impl DrawState {
    /// The empty-tree sentinel.
    pub fn empty() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            bounding_box: BoundingBox::default(),
            root_position: Point::default(),
            length: 0,
            height: -1,
            balanced: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, key: Key) -> Option<&DrawNode> {
        self.nodes.iter().find(|n| n.key == key)
    }

    pub fn node_mut(&mut self, key: Key) -> Option<&mut DrawNode> {
        self.nodes.iter_mut().find(|n| n.key == key)
    }

    /// Drop every `highlighted` / `deleted` mark.
    pub fn clear_marks(&mut self) {
        for node in &mut self.nodes {
            node.highlighted = false;
            node.deleted = false;
        }
    }

    /// Offset that maps layout coordinates to world coordinates: the root is
    /// centred horizontally on a canvas of `canvas_width`, and everything is
    /// pushed down by `offset_y`.
    pub fn world_offset(&self, canvas_width: f32, offset_y: f32) -> Point {
        Point::new(canvas_width / 2.0 - self.root_position.x, offset_y)
    }

    /// Map a layout point to world coordinates (see [`DrawState::world_offset`]).
    pub fn to_world(&self, p: Point, canvas_width: f32, offset_y: f32) -> Point {
        let off = self.world_offset(canvas_width, offset_y);
        Point::new(p.x + off.x, p.y + off.y)
    }
}

impl Default for DrawState {
    fn default() -> Self {
        Self::empty()
    }
}
