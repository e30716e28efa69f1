//! Trace playback.
//!
//! After a mutation the tree has already changed; what the user sees is the
//! `before` snapshot with the recorded path lit up one node per tick, then a
//! snap to the `after` snapshot.
//!
//! ```text
//! Idle ──begin──▶ Playing ──trace empty──▶ Draining ──tick──▶ Idle
//!                    │                                         ▲
//!                    └──skip (delete)──▶ Skipped ──tick────────┘
//! ```
//!
//! Time is injected by the host (`advance(now_ms)`) or driven directly with
//! `step()`, so playback is testable without a clock.

use bst_core::{Camera, DrawState, Key, Settings, Trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationPhase {
    #[default]
    Idle,
    /// Trace entries remain.
    Playing,
    /// Trace exhausted; the next tick shows the `after` snapshot.
    Draining,
    /// Skipped mid-delete; the next tick shows the `after` snapshot.
    Skipped,
}

#[derive(Debug, Clone)]
pub struct Animator {
    phase: AnimationPhase,
    trace: Trace,
    current: DrawState,
    after: Option<DrawState>,
    /// Key removed by the mutation being played, marked instead of lit.
    highlight_key: Option<Key>,
    next_tick_at: Option<f64>,
    tick_interval_ms: f64,
    canvas_width: f32,
    offset_y: f32,
}

impl Animator {
    pub fn new(settings: &Settings) -> Self {
        Self {
            phase: AnimationPhase::Idle,
            trace: Trace::new(),
            current: DrawState::empty(),
            after: None,
            highlight_key: None,
            next_tick_at: None,
            tick_interval_ms: settings.tick_interval_ms,
            canvas_width: settings.canvas_width,
            offset_y: settings.offset_y,
        }
    }

    pub fn phase(&self) -> AnimationPhase {
        self.phase
    }

    pub fn is_animating(&self) -> bool {
        self.phase != AnimationPhase::Idle
    }

    /// The snapshot to paint this frame.
    pub fn current(&self) -> &DrawState {
        &self.current
    }

    /// Trace entries not yet shown.
    pub fn remaining(&self) -> usize {
        self.trace.len()
    }

    /// Show `state` without animation, abandoning any playback.
    pub fn present(&mut self, state: DrawState) {
        self.reset();
        self.current = state;
    }

    /// Start playing `trace` over `before`, ending on `after`.
    ///
    /// The first entry is lit immediately, so a trace of `n` keys takes
    /// exactly `n` ticks to finish. An empty trace finishes at once.
    pub fn begin(
        &mut self,
        trace: Trace,
        mut before: DrawState,
        after: DrawState,
        highlight_key: Option<Key>,
        camera: &mut Camera,
    ) {
        before.clear_marks();
        self.current = before;
        self.after = Some(after);
        self.trace = trace;
        self.highlight_key = highlight_key;
        self.next_tick_at = None;

        log::debug!(
            "animation begin: {} steps, highlight {:?}",
            self.trace.len(),
            highlight_key
        );

        if self.trace.is_empty() {
            self.finish();
            return;
        }
        self.phase = AnimationPhase::Playing;
        self.show_next(camera);
    }

    /// One tick. Returns `true` if the frame changed.
    pub fn step(&mut self, camera: &mut Camera) -> bool {
        match self.phase {
            AnimationPhase::Idle => false,
            AnimationPhase::Playing => {
                self.show_next(camera);
                true
            }
            AnimationPhase::Draining | AnimationPhase::Skipped => {
                self.finish();
                true
            }
        }
    }

    /// Run a tick if one is due at `now_ms`. At most one tick per call.
    pub fn advance(&mut self, now_ms: f64, camera: &mut Camera) -> bool {
        if !self.is_animating() {
            return false;
        }
        let due = *self
            .next_tick_at
            .get_or_insert(now_ms + self.tick_interval_ms);
        if now_ms < due {
            return false;
        }
        self.next_tick_at = Some(now_ms + self.tick_interval_ms);
        self.step(camera)
    }

    /// Drop the remaining trace. A delete still marks the removed node
    /// for one more tick; anything else jumps straight to `after`.
    ///
    /// Returns `false` when there was nothing to skip.
    pub fn skip(&mut self, camera: &mut Camera) -> bool {
        match self.phase {
            AnimationPhase::Idle | AnimationPhase::Skipped => false,
            AnimationPhase::Playing | AnimationPhase::Draining => {
                self.trace.clear();
                let marked = match self.highlight_key {
                    Some(key) => self.mark(key, camera),
                    None => false,
                };
                if marked {
                    self.phase = AnimationPhase::Skipped;
                    log::debug!("animation skipped, marking {:?}", self.highlight_key);
                } else {
                    self.finish();
                    log::debug!("animation skipped");
                }
                true
            }
        }
    }

    fn show_next(&mut self, camera: &mut Camera) {
        if let Some(key) = self.trace.pop() {
            self.mark(key, camera);
            log::trace!("animation step {key}, {} left", self.trace.len());
        }
        if self.trace.is_empty() {
            self.phase = AnimationPhase::Draining;
        }
    }

    /// Light (or, for the removed key, flag) a node and aim the camera at it.
    fn mark(&mut self, key: Key, camera: &mut Camera) -> bool {
        let deleted = self.highlight_key == Some(key);
        let Some(node) = self.current.node_mut(key) else {
            return false;
        };
        if deleted {
            node.deleted = true;
        } else {
            node.highlighted = true;
        }
        let pos = node.position();
        camera.center_on(self.current.to_world(pos, self.canvas_width, self.offset_y));
        true
    }

    fn finish(&mut self) {
        if let Some(after) = self.after.take() {
            self.current = after;
        }
        self.current.clear_marks();
        self.reset();
        log::debug!("animation done");
    }

    fn reset(&mut self) {
        self.phase = AnimationPhase::Idle;
        self.trace.clear();
        self.after = None;
        self.highlight_key = None;
        self.next_tick_at = None;
    }
}
