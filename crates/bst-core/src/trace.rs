//! Visit trace recorded by tree operations.

use crate::model::Key;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Ordered record of the keys visited by the most recent operation.
///
/// Filled by the tree, then handed off to (and drained by) the animation
/// controller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    keys: VecDeque<Key>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: Key) {
        self.keys.push_back(key);
    }

    /// Remove and return the next key to play.
    pub fn pop(&mut self) -> Option<Key> {
        self.keys.pop_front()
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn to_vec(&self) -> Vec<Key> {
        self.keys.iter().copied().collect()
    }
}

impl FromIterator<Key> for Trace {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}
