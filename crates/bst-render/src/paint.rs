//! Draw state → Vello drawing commands.
//!
//! Stateless: takes an already-positioned `DrawState` plus the camera and
//! emits edges first, then node discs on top. Presenting the scene is up to
//! the caller; the browser build paints through Canvas2D instead.

use crate::theme::{Rgba, Theme};
use bst_core::{Camera, DrawState, Settings};
use kurbo::{Affine, Circle, Line, Point, Rect, Stroke, Vec2};
use peniko::{Color, Fill};
use vello::Scene;

/// Paint one frame to a Vello scene.
///
/// Call once per frame with a freshly-cleared `Scene`.
pub fn paint_frame(
    scene: &mut Scene,
    state: &DrawState,
    camera: &Camera,
    settings: &Settings,
    theme: &Theme,
) {
    let canvas = Rect::new(
        0.0,
        0.0,
        settings.canvas_width as f64,
        settings.canvas_height as f64,
    );
    scene.fill(
        Fill::NonZero,
        Affine::IDENTITY,
        to_color(theme.background),
        None,
        &canvas,
    );

    if state.is_empty() {
        return;
    }

    let transform = frame_transform(state, camera, settings);
    let stroke = Stroke::new(theme.line_width);
    let border = to_color(theme.border);

    for edge in &state.edges {
        let line = Line::new(
            (edge.x1 as f64, edge.y1 as f64),
            (edge.x2 as f64, edge.y2 as f64),
        );
        scene.stroke(&stroke, transform, border, None, &line);
    }

    let radius = settings.node_radius as f64;
    for node in &state.nodes {
        let disc = Circle::new((node.x as f64, node.y as f64), radius);
        scene.fill(
            Fill::NonZero,
            transform,
            to_color(theme.node_fill(node)),
            None,
            &disc,
        );
        scene.stroke(&stroke, transform, border, None, &disc);
        // Glyph runs need a font context; labels are drawn by the Canvas2D painter.
        log::trace!("PAINT node {} at ({}, {})", node.key, node.x, node.y);
    }
}

/// Layout → screen transform: centre the root, push down by `offset_y`, then
/// move by the camera when it is active.
pub fn frame_transform(state: &DrawState, camera: &Camera, settings: &Settings) -> Affine {
    let offset = state.world_offset(settings.canvas_width, settings.offset_y);
    let world = Affine::translate(Vec2::new(offset.x as f64, offset.y as f64));
    if camera.enabled() {
        let t = camera.translation();
        Affine::translate(Vec2::new(t.x as f64, t.y as f64)) * world
    } else {
        world
    }
}

/// Screen position of a layout point under `transform`.
pub fn to_screen(transform: Affine, x: f32, y: f32) -> Point {
    transform * Point::new(x as f64, y as f64)
}

fn to_color(c: Rgba) -> Color {
    Color::from_rgba8(c.r, c.g, c.b, c.a)
}
