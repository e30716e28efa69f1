//! Fixed configuration constants.
//!
//! Nothing here is user-settable at runtime. The host only chooses the canvas
//! extent when it constructs the visualizer.

use serde::{Deserialize, Serialize};

/// Maximum number of nodes a tree may hold.
pub const MAX_NODES: usize = 100;

/// Ceiling (inclusive) for randomly generated keys.
pub const MAX_N: i64 = 999;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub max_nodes: usize,
    pub max_n: i64,

    pub canvas_width: f32,
    pub canvas_height: f32,

    pub node_radius: f32,
    /// Horizontal spacing per in-order index.
    pub scale_x: f32,
    /// Vertical spacing per depth level.
    pub scale_y: f32,
    /// Distance from the top of the canvas to the root's centre.
    pub offset_y: f32,
    /// Margin added around the world bounds.
    pub world_padding: f32,

    /// Wall-clock period of one animation tick.
    pub tick_interval_ms: f64,
    /// Camera pan speed as a fraction of the world extent, per frame.
    pub camera_speed: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_nodes: MAX_NODES,
            max_n: MAX_N,
            canvas_width: 1280.0,
            canvas_height: 700.0,
            node_radius: 25.0,
            scale_x: 30.0,
            scale_y: 100.0,
            offset_y: 50.0,
            world_padding: 50.0,
            tick_interval_ms: 500.0,
            camera_speed: 0.01,
        }
    }
}

impl Settings {
    /// Defaults with the host's canvas extent.
    pub fn with_canvas(width: f32, height: f32) -> Self {
        Self {
            canvas_width: width,
            canvas_height: height,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_canvas_keeps_other_defaults() {
        let s = Settings::with_canvas(640.0, 480.0);
        assert_eq!(s.canvas_width, 640.0);
        assert_eq!(s.canvas_height, 480.0);
        assert_eq!(s.node_radius, Settings::default().node_radius);
        assert_eq!(s.max_nodes, MAX_NODES);
    }
}
