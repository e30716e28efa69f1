//! The visualizer context: one object owning the tree, camera, and playback.
//!
//! Every structural command runs the same pipeline, strictly in order:
//! validate → mutate → relayout → derive camera bounds → start playback.
//! Commands are refused with [`CommandError::Busy`] while an animation is
//! running; nothing is queued.

use crate::animation::Animator;
use crate::error::CommandError;
use bst_core::{
    Camera, DirectionalKeys, DrawState, Key, NodeInfo, Settings, TraversalKind, Tree,
    compute_draw_state,
};
use bst_render::StatLine;
use rand::Rng;

#[derive(Debug, Clone)]
pub struct Visualizer {
    settings: Settings,
    tree: Tree,
    /// Layout of the tree as it is now (the `after` side of any playback).
    layout: DrawState,
    camera: Camera,
    animator: Animator,
    /// Result of the last successful `find_number`, until the next mutation.
    found: Option<NodeInfo>,
}

impl Visualizer {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            tree: Tree::new(),
            layout: DrawState::empty(),
            camera: Camera::new(&settings),
            animator: Animator::new(&settings),
            found: None,
        }
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// What should be on screen right now.
    pub fn current_state(&self) -> &DrawState {
        self.animator.current()
    }

    pub fn found(&self) -> Option<&NodeInfo> {
        self.found.as_ref()
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    /// Overlay text for the current frame.
    pub fn stat_lines(&self) -> Vec<StatLine> {
        bst_render::stat_lines(
            self.animator.current(),
            self.found.as_ref(),
            self.is_animating(),
            &self.settings,
        )
    }

    // ─── Commands ────────────────────────────────────────────────────────

    /// Replace the tree with a balanced one built from `values`. Not animated.
    pub fn build(&mut self, values: &[Key]) -> Result<(), CommandError> {
        self.ensure_idle()?;
        if values.is_empty() {
            return Err(self.reject(CommandError::EmptyInput));
        }
        if values.len() >= self.settings.max_nodes {
            return Err(self.reject(CommandError::CapacityExceeded {
                max: self.settings.max_nodes,
            }));
        }
        self.rebuild(values);
        Ok(())
    }

    /// Insert `key` and animate the descent. A duplicate is a silent no-op
    /// and returns `Ok(false)`.
    pub fn insert_number(&mut self, key: Key) -> Result<bool, CommandError> {
        self.ensure_idle()?;
        if self.tree.len() >= self.settings.max_nodes {
            return Err(self.reject(CommandError::CapacityExceeded {
                max: self.settings.max_nodes,
            }));
        }

        let before = self.layout.clone();
        if !self.tree.insert(key) {
            return Ok(false);
        }
        self.found = None;
        self.relayout();
        self.animate(before, None);
        Ok(true)
    }

    /// Delete `key` and animate the search (and successor walk). Deleting
    /// from an empty tree is a silent no-op.
    pub fn delete_number(&mut self, key: Key) -> Result<bool, CommandError> {
        self.ensure_idle()?;
        if self.tree.is_empty() {
            return Ok(false);
        }
        if !self.tree.contains(key) {
            return Err(self.reject(CommandError::NotFound(key)));
        }

        let before = self.layout.clone();
        self.tree.delete(key);
        self.found = None;
        self.relayout();
        self.animate(before, Some(key));
        Ok(true)
    }

    /// Build from `count` unique random keys in `1..=max_n`.
    pub fn create_random(&mut self, count: usize) -> Result<(), CommandError> {
        self.create_random_with(&mut rand::thread_rng(), count)
    }

    pub fn create_random_with<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        count: usize,
    ) -> Result<(), CommandError> {
        self.ensure_idle()?;
        if count == 0 {
            return Err(self.reject(CommandError::EmptyInput));
        }
        if count > self.settings.max_nodes {
            return Err(self.reject(CommandError::CapacityExceeded {
                max: self.settings.max_nodes,
            }));
        }
        let available = self.settings.max_n;
        if available < 1 || count as i64 > available {
            return Err(self.reject(CommandError::TooManyRandomValues {
                requested: count,
                available,
            }));
        }

        let values: Vec<Key> = rand::seq::index::sample(rng, available as usize, count)
            .into_iter()
            .map(|i| i as Key + 1)
            .collect();
        self.rebuild(&values);
        Ok(())
    }

    /// Rebuild into a balanced tree, animating the collected keys. An
    /// already balanced tree is left alone and returns `Ok(false)`.
    pub fn balance(&mut self) -> Result<bool, CommandError> {
        self.ensure_idle()?;
        let before = self.layout.clone();
        if !self.tree.rebalance() {
            return Ok(false);
        }
        self.found = None;
        self.relayout();
        self.animate(before, None);
        Ok(true)
    }

    /// Empty the tree. Not animated.
    pub fn clear(&mut self) -> Result<(), CommandError> {
        self.ensure_idle()?;
        self.tree.clear();
        self.found = None;
        self.relayout();
        self.animator.present(self.layout.clone());
        log::debug!("cleared");
        Ok(())
    }

    /// Animate a full traversal and return the visiting order.
    pub fn traverse(&mut self, kind: TraversalKind) -> Result<Vec<Key>, CommandError> {
        self.ensure_idle()?;
        let order = self.tree.traverse(kind);
        log::debug!("{kind} traversal: {order:?}");
        self.animate(self.layout.clone(), None);
        Ok(order)
    }

    /// Look up `key` and show its height and depth in the overlay.
    pub fn find_number(&mut self, key: Key) -> Result<NodeInfo, CommandError> {
        match self.tree.inspect(key) {
            Some(info) => {
                self.found = Some(info);
                Ok(info)
            }
            None => {
                self.found = None;
                Err(self.reject(CommandError::NotFound(key)))
            }
        }
    }

    /// End the running animation early. `false` if nothing was running.
    pub fn skip_animation(&mut self) -> bool {
        self.animator.skip(&mut self.camera)
    }

    // ─── Frame driver ────────────────────────────────────────────────────

    /// Called once per host frame. Returns `true` when a repaint is needed.
    pub fn update(&mut self, now_ms: f64, keys: DirectionalKeys) -> bool {
        let mut repaint = self.animator.advance(now_ms, &mut self.camera);
        if keys.any() && self.camera.enabled() {
            self.camera.update(keys);
            repaint |= self.camera.has_moved();
        }
        repaint
    }

    /// Force one animation tick, bypassing the clock.
    pub fn tick(&mut self) -> bool {
        self.animator.step(&mut self.camera)
    }

    // ─── Internals ───────────────────────────────────────────────────────

    fn ensure_idle(&self) -> Result<(), CommandError> {
        if self.is_animating() {
            return Err(self.reject(CommandError::Busy));
        }
        Ok(())
    }

    fn reject(&self, err: CommandError) -> CommandError {
        log::warn!("command rejected: {err}");
        err
    }

    fn rebuild(&mut self, values: &[Key]) {
        self.tree.build(values);
        self.found = None;
        self.relayout();
        self.camera.center();
        self.animator.present(self.layout.clone());
    }

    /// Layout must be complete before the camera derives bounds from it.
    fn relayout(&mut self) {
        self.layout = compute_draw_state(&self.tree, &self.settings);
        self.camera.update_bounds(&self.layout, &self.settings);
        log::debug!(
            "layout: {} nodes, height {}, balanced {}",
            self.layout.length,
            self.layout.height,
            self.layout.balanced
        );
    }

    fn animate(&mut self, before: DrawState, highlight_key: Option<Key>) {
        let trace = self.tree.take_trace();
        self.animator.begin(
            trace,
            before,
            self.layout.clone(),
            highlight_key,
            &mut self.camera,
        );
    }
}

impl Default for Visualizer {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn build_is_not_animated() {
        let mut app = Visualizer::default();
        app.build(&[3, 1, 2]).unwrap();
        assert!(!app.is_animating());
        assert_eq!(app.current_state().length, 3);
    }

    #[test]
    fn commands_are_refused_while_animating() {
        let mut app = Visualizer::default();
        app.build(&[1, 2, 3]).unwrap();
        assert_eq!(app.insert_number(4), Ok(true));
        assert!(app.is_animating());

        assert_eq!(app.insert_number(5), Err(CommandError::Busy));
        assert_eq!(app.delete_number(1), Err(CommandError::Busy));
        assert_eq!(app.build(&[9]), Err(CommandError::Busy));
        assert_eq!(app.balance(), Err(CommandError::Busy));
        assert_eq!(app.clear(), Err(CommandError::Busy));
        assert_eq!(app.traverse(TraversalKind::In), Err(CommandError::Busy));
        assert_eq!(app.tree().len(), 4);
    }

    #[test]
    fn find_sets_and_mutation_clears_found() {
        let mut app = Visualizer::default();
        app.build(&[1, 2, 3]).unwrap();
        let info = app.find_number(1).unwrap();
        assert_eq!((info.key, info.height, info.depth), (1, 0, 1));
        assert_eq!(app.found(), Some(&info));

        app.clear().unwrap();
        assert_eq!(app.found(), None);
    }
}
