//! Stats overlay: tree statistics, the last lookup, and the skip hint.
//!
//! Produced as positioned text lines in screen space so every painter draws
//! the same thing. Not affected by the camera.

use bst_core::{DrawState, NodeInfo, Settings};

/// Left edge of the stats column.
const STAT_X: f32 = 50.0;
/// Vertical distance between stat rows.
const STAT_ROW: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatKind {
    /// Tree statistics.
    Stat,
    /// Details of the node found by the last lookup.
    Found,
    /// Shown while an animation can be skipped.
    Hint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Left,
    Center,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatLine {
    pub text: String,
    pub kind: StatKind,
    pub x: f32,
    pub y: f32,
    pub anchor: TextAnchor,
}

/// Build the overlay for one frame. Nothing is shown for an empty tree.
pub fn stat_lines(
    state: &DrawState,
    found: Option<&NodeInfo>,
    animating: bool,
    settings: &Settings,
) -> Vec<StatLine> {
    if state.is_empty() {
        return Vec::new();
    }

    let mut rows = vec![
        (format!("Number of elements: {}", state.length), StatKind::Stat),
        (format!("Height: {}", state.height), StatKind::Stat),
        (format!("Balanced: {}", state.balanced), StatKind::Stat),
    ];
    if let Some(info) = found {
        rows.push((format!("Found Node: {}", info.key), StatKind::Found));
        rows.push((format!("Node Height: {}", info.height), StatKind::Found));
        rows.push((format!("Node Depth: {}", info.depth), StatKind::Found));
    }

    let mut lines: Vec<StatLine> = rows
        .into_iter()
        .enumerate()
        .map(|(i, (text, kind))| StatLine {
            text,
            kind,
            x: STAT_X,
            y: settings.offset_y + i as f32 * STAT_ROW,
            anchor: TextAnchor::Left,
        })
        .collect();

    if animating {
        lines.push(StatLine {
            text: "Click anywhere in the canvas to skip the animation".to_string(),
            kind: StatKind::Hint,
            x: settings.canvas_width / 2.0,
            y: settings.canvas_height - 10.0,
            anchor: TextAnchor::Center,
        });
    }
    lines
}
