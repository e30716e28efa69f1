//! Keyboard state.
//!
//! The host forwards raw `KeyboardEvent.key` names on key-down / key-up; the
//! render loop polls the held arrows once per frame.

use bst_core::DirectionalKeys;
use smallvec::SmallVec;

/// Keys currently held down, in press order.
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    pressed: SmallVec<[String; 4]>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a press. Auto-repeat presses are ignored.
    pub fn key_down(&mut self, key: &str) {
        if !self.is_pressed(key) {
            self.pressed.push(key.to_string());
        }
    }

    pub fn key_up(&mut self, key: &str) {
        self.pressed.retain(|k| k != key);
    }

    /// Forget everything (e.g. when the canvas loses focus).
    pub fn release_all(&mut self) {
        self.pressed.clear();
    }

    pub fn is_pressed(&self, key: &str) -> bool {
        self.pressed.iter().any(|k| k == key)
    }

    /// Arrow keys projected onto pan directions.
    pub fn directional(&self) -> DirectionalKeys {
        DirectionalKeys {
            up: self.is_pressed("ArrowUp"),
            down: self.is_pressed("ArrowDown"),
            left: self.is_pressed("ArrowLeft"),
            right: self.is_pressed("ArrowRight"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_and_release() {
        let mut keys = KeyState::new();
        keys.key_down("ArrowLeft");
        keys.key_down("ArrowLeft");
        keys.key_down("a");
        assert!(keys.is_pressed("ArrowLeft"));

        let dir = keys.directional();
        assert!(dir.left && !dir.right && !dir.up && !dir.down);

        keys.key_up("ArrowLeft");
        assert!(!keys.directional().any());
        assert!(keys.is_pressed("a"));

        keys.release_all();
        assert!(!keys.is_pressed("a"));
    }
}
