//! Canvas2D renderer.
//!
//! Paints the visualizer's current frame to an HTML `<canvas>` via
//! `CanvasRenderingContext2d`: edges, then node discs with their keys, then
//! the screen-space stats overlay on top.

use bst_core::DrawState;
use bst_editor::Visualizer;
use bst_render::paint::frame_transform;
use bst_render::{StatKind, StatLine, TextAnchor, Theme};
use web_sys::CanvasRenderingContext2d;

/// Render one full frame.
pub fn render_frame(ctx: &CanvasRenderingContext2d, app: &Visualizer, theme: &Theme) {
    let settings = app.settings();

    // Clear canvas
    let _ = ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
    ctx.set_fill_style_str(&theme.background.css());
    ctx.fill_rect(
        0.0,
        0.0,
        settings.canvas_width as f64,
        settings.canvas_height as f64,
    );

    let state = app.current_state();
    if !state.is_empty() {
        ctx.save();
        let [a, b, c, d, e, f] = frame_transform(state, app.camera(), settings).as_coeffs();
        let _ = ctx.set_transform(a, b, c, d, e, f);
        draw_edges(ctx, state, theme);
        draw_nodes(ctx, state, settings.node_radius as f64, theme);
        ctx.restore();
    }

    for line in app.stat_lines() {
        draw_stat_line(ctx, &line, theme);
    }
}

fn draw_edges(ctx: &CanvasRenderingContext2d, state: &DrawState, theme: &Theme) {
    ctx.set_stroke_style_str(&theme.border.css());
    ctx.set_line_width(theme.line_width);
    ctx.begin_path();
    for edge in &state.edges {
        ctx.move_to(edge.x1 as f64, edge.y1 as f64);
        ctx.line_to(edge.x2 as f64, edge.y2 as f64);
    }
    ctx.stroke();
}

fn draw_nodes(ctx: &CanvasRenderingContext2d, state: &DrawState, radius: f64, theme: &Theme) {
    let border = theme.border.css();
    let data = theme.data.css();
    ctx.set_line_width(theme.line_width);
    ctx.set_font(theme.data_font);
    ctx.set_text_align("center");

    for node in &state.nodes {
        let (x, y) = (node.x as f64, node.y as f64);

        ctx.begin_path();
        let _ = ctx.arc(x, y, radius, 0.0, std::f64::consts::TAU);
        ctx.set_fill_style_str(&theme.node_fill(node).css());
        ctx.fill();
        ctx.set_stroke_style_str(&border);
        ctx.stroke();

        ctx.set_fill_style_str(&data);
        let _ = ctx.fill_text(&node.key.to_string(), x, y + theme.text_offset);
    }
}

fn draw_stat_line(ctx: &CanvasRenderingContext2d, line: &StatLine, theme: &Theme) {
    let color = match line.kind {
        StatKind::Stat | StatKind::Hint => theme.stats,
        StatKind::Found => theme.found,
    };
    ctx.set_font(theme.stat_font);
    ctx.set_fill_style_str(&color.css());
    ctx.set_text_align(match line.anchor {
        TextAnchor::Left => "left",
        TextAnchor::Center => "center",
    });
    let _ = ctx.fill_text(&line.text, line.x as f64, line.y as f64);
}
