//! Pannable camera over a world that may be larger than the canvas.
//!
//! The camera keeps a target point (the world point that should sit at the
//! canvas centre) and derives the viewport origin `(x, y)` from it, clamped so
//! the viewport never leaves the world bounds. Inputs are clamped, never
//! rejected.

use crate::model::{DrawState, Point};
use crate::settings::Settings;
use serde::{Deserialize, Serialize};

/// The pannable world rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl WorldBounds {
    /// Bounds that exactly cover a canvas.
    pub fn canvas(width: f32, height: f32) -> Self {
        Self {
            min_x: 0.0,
            max_x: width,
            min_y: 0.0,
            max_y: height,
        }
    }
}

/// Which arrow directions are held this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirectionalKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl DirectionalKeys {
    pub fn any(&self) -> bool {
        self.up || self.down || self.left || self.right
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub target_x: f32,
    pub target_y: f32,
    pub x: f32,
    pub y: f32,
    world_bounds: WorldBounds,
    enabled: bool,
    speed_x: f32,
    speed_y: f32,
    canvas_width: f32,
    canvas_height: f32,
    has_moved: bool,
}

impl Camera {
    /// A camera looking at the centre of the canvas, with no room to pan.
    pub fn new(settings: &Settings) -> Self {
        let (w, h) = (settings.canvas_width, settings.canvas_height);
        let mut camera = Self {
            target_x: w / 2.0,
            target_y: h / 2.0,
            x: 0.0,
            y: 0.0,
            world_bounds: WorldBounds::canvas(w, h),
            enabled: false,
            speed_x: 0.0,
            speed_y: 0.0,
            canvas_width: w,
            canvas_height: h,
            has_moved: false,
        };
        camera.set_world_bounds(WorldBounds::canvas(w, h), settings.camera_speed);
        camera
    }

    pub fn world_bounds(&self) -> WorldBounds {
        self.world_bounds
    }

    /// True iff the world is larger than the canvas in some direction.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Whether the last `update` changed the viewport origin.
    pub fn has_moved(&self) -> bool {
        self.has_moved
    }

    /// Translation to apply before painting world coordinates.
    pub fn translation(&self) -> Point {
        Point::new(-self.x, -self.y)
    }

    /// Re-derive the world bounds from a freshly laid-out tree.
    ///
    /// The root is centred horizontally on the canvas; the world always
    /// covers at least the canvas, plus `world_padding` on every side except
    /// the top.
    pub fn update_bounds(&mut self, state: &DrawState, settings: &Settings) {
        let (w, h) = (self.canvas_width, self.canvas_height);
        if state.is_empty() {
            self.set_world_bounds(WorldBounds::canvas(w, h), settings.camera_speed);
            return;
        }

        let bbox = state.bounding_box;
        let shift_x = w / 2.0 - state.root_position.x;
        let pad = settings.world_padding;

        let bounds = WorldBounds {
            min_x: (bbox.x + shift_x).min(0.0) - pad,
            max_x: (bbox.w + shift_x).max(w) + pad,
            min_y: 0.0,
            max_y: (bbox.h + h / 2.0).max(h) + pad,
        };
        self.set_world_bounds(bounds, settings.camera_speed);
        log::trace!(
            "camera bounds {:?} enabled={}",
            self.world_bounds,
            self.enabled
        );
    }

    fn set_world_bounds(&mut self, bounds: WorldBounds, speed: f32) {
        self.world_bounds = bounds;
        self.enabled = bounds.min_x < 0.0
            || bounds.max_x > self.canvas_width
            || bounds.min_y < 0.0
            || bounds.max_y > self.canvas_height;
        self.speed_x = speed * bounds.max_x;
        self.speed_y = speed * bounds.max_y;
        self.clamp_target();
        self.calibrate();
    }

    /// Pan by the held directions, then re-clamp.
    pub fn update(&mut self, keys: DirectionalKeys) {
        if keys.right {
            self.target_x += self.speed_x;
        }
        if keys.left {
            self.target_x -= self.speed_x;
        }
        if keys.up {
            self.target_y -= self.speed_y;
        }
        if keys.down {
            self.target_y += self.speed_y;
        }

        let (old_x, old_y) = (self.x, self.y);
        self.clamp_target();
        self.calibrate();
        self.has_moved = old_x != self.x || old_y != self.y;
    }

    /// Aim at a world point (e.g. the node being animated).
    pub fn center_on(&mut self, point: Point) {
        self.target_x = point.x;
        self.target_y = point.y;
        let (old_x, old_y) = (self.x, self.y);
        self.clamp_target();
        self.calibrate();
        self.has_moved = old_x != self.x || old_y != self.y;
    }

    /// Aim back at the centre of the canvas.
    pub fn center(&mut self) {
        self.center_on(Point::new(self.canvas_width / 2.0, self.canvas_height / 2.0));
    }

    fn clamp_target(&mut self) {
        let b = self.world_bounds;
        let (half_w, half_h) = (self.canvas_width / 2.0, self.canvas_height / 2.0);
        self.target_x = clamp(self.target_x, b.min_x + half_w, b.max_x - half_w);
        self.target_y = clamp(self.target_y, b.min_y + half_h, b.max_y - half_h);
    }

    fn calibrate(&mut self) {
        let b = self.world_bounds;
        self.x = clamp(
            self.target_x - self.canvas_width / 2.0,
            b.min_x,
            b.max_x - self.canvas_width,
        );
        self.y = clamp(
            self.target_y - self.canvas_height / 2.0,
            b.min_y,
            b.max_y - self.canvas_height,
        );
    }
}

/// Restrict `value` to `[min, max]`. Unlike `f32::clamp`, never panics when
/// `min > max`; the lower bound wins.
fn clamp(value: f32, min: f32, max: f32) -> f32 {
    if value > max {
        max.max(min)
    } else if value < min {
        min
    } else {
        value
    }
}
