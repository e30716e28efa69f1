//! WASM bridge for BST Viz: exposes the visualizer to JavaScript.
//!
//! Compiled via `wasm-pack build --target web`. The page owns the DOM: it
//! forwards the typed text, key events, and `requestAnimationFrame`
//! timestamps, and shows an alert when a command returns `"ok":false`.

mod render2d;

use bst_core::{Key, Settings, TraversalKind};
use bst_editor::parse::{key_from_f64, parse_number, parse_values};
use bst_editor::{CommandError, KeyState, Visualizer};
use bst_render::Theme;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

/// The main WASM-facing controller. One per `<canvas>`.
#[wasm_bindgen]
pub struct BstCanvas {
    app: Visualizer,
    keys: KeyState,
    theme: Theme,
}

#[wasm_bindgen]
impl BstCanvas {
    /// Create a visualizer for a canvas of the given size.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64) -> Self {
        // Set up panic hook for better error messages in console
        console_error_panic_hook_setup();

        let settings = Settings::with_canvas(width as f32, height as f32);
        Self {
            app: Visualizer::new(settings),
            keys: KeyState::new(),
            theme: Theme::dark(),
        }
    }

    // ─── Commands ────────────────────────────────────────────────────────
    //
    // Each returns JSON: `{"ok":true,"value":...}` or `{"ok":false,"error":"..."}`.

    /// Build from a typed list such as `"5, 3 8"`.
    pub fn build_from_text(&mut self, text: &str) -> String {
        let result = parse_values(text).and_then(|values| self.app.build(&values));
        command_result(result)
    }

    /// Build from numbers already held by the page.
    pub fn build_from_values(&mut self, values: &[f64]) -> String {
        let result = values
            .iter()
            .map(|&n| key_from_f64(n))
            .collect::<Result<Vec<Key>, _>>()
            .and_then(|keys| self.app.build(&keys));
        command_result(result)
    }

    /// `value` is `false` when the key was already present.
    pub fn insert_number(&mut self, text: &str) -> String {
        let result = parse_number(text).and_then(|key| self.app.insert_number(key));
        command_result(result)
    }

    /// `value` is `false` when the tree was empty.
    pub fn delete_number(&mut self, text: &str) -> String {
        let result = parse_number(text).and_then(|key| self.app.delete_number(key));
        command_result(result)
    }

    /// `value` is `{"key":..,"height":..,"depth":..}`.
    pub fn find_number(&mut self, text: &str) -> String {
        let result = parse_number(text).and_then(|key| self.app.find_number(key));
        command_result(result)
    }

    pub fn create_random(&mut self, count: u32) -> String {
        command_result(self.app.create_random(count as usize))
    }

    /// `value` is `false` when the tree was already balanced.
    pub fn balance(&mut self) -> String {
        command_result(self.app.balance())
    }

    pub fn clear(&mut self) -> String {
        command_result(self.app.clear())
    }

    /// `kind` is one of `level`, `in`, `pre`, `post`. `value` is the visiting order.
    pub fn traverse(&mut self, kind: &str) -> String {
        match kind.parse::<TraversalKind>() {
            Ok(kind) => command_result(self.app.traverse(kind)),
            Err(e) => error_json(&e),
        }
    }

    /// Bound to a click anywhere on the canvas.
    pub fn skip_animation(&mut self) -> bool {
        self.app.skip_animation()
    }

    pub fn is_animating(&self) -> bool {
        self.app.is_animating()
    }

    // ─── Input ───────────────────────────────────────────────────────────

    pub fn key_down(&mut self, key: &str) {
        self.keys.key_down(key);
    }

    pub fn key_up(&mut self, key: &str) {
        self.keys.key_up(key);
    }

    /// Call on blur so no arrow stays stuck.
    pub fn release_keys(&mut self) {
        self.keys.release_all();
    }

    // ─── Frame loop ──────────────────────────────────────────────────────

    /// Advance playback and camera to `now_ms`. Returns `true` if the frame
    /// needs repainting.
    pub fn update(&mut self, now_ms: f64) -> bool {
        self.app.update(now_ms, self.keys.directional())
    }

    /// Render the current frame to a Canvas2D context.
    pub fn render(&self, ctx: &CanvasRenderingContext2d) {
        render2d::render_frame(ctx, &self.app, &self.theme);
    }

    /// The frame being shown, as JSON.
    pub fn get_state_json(&self) -> String {
        serde_json::to_string(self.app.current_state()).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn get_settings_json(&self) -> String {
        serde_json::to_string(self.app.settings()).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Set up a panic hook that logs to the browser console.
fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("BST WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

fn command_result<T: Serialize>(result: Result<T, CommandError>) -> String {
    match result {
        Ok(value) => serde_json::json!({ "ok": true, "value": value }).to_string(),
        Err(e) => error_json(&e.to_string()),
    }
}

fn error_json(message: &str) -> String {
    log::warn!("bridge command failed: {message}");
    serde_json::json!({ "ok": false, "error": message }).to_string()
}

// ─── Standalone validation (no canvas needed) ────────────────────────────

/// Check a typed list before submitting it. Returns JSON:
/// `{"ok":true,"value":[...]}` or `{"ok":false,"error":"..."}`.
#[wasm_bindgen]
pub fn validate_values(text: &str) -> String {
    command_result(parse_values(text))
}
