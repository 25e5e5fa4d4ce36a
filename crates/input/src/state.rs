use crate::event::{Key, KeyTransition};
use glam::Vec2;
use std::collections::BTreeSet;

/// Which keys are currently down, as seen by the simulation thread.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeldKeys {
    held: BTreeSet<Key>,
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply transitions in order, so the last transition per key decides
    /// its final state.
    pub fn apply(&mut self, transitions: &[KeyTransition]) {
        for transition in transitions {
            if transition.pressed {
                self.held.insert(transition.key);
            } else {
                self.held.remove(&transition.key);
            }
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn iter(&self) -> impl Iterator<Item = Key> + '_ {
        self.held.iter().copied()
    }
}

/// Turns a stream of absolute cursor positions into per-pass deltas.
#[derive(Debug, Clone, Copy, Default)]
pub struct CursorTracker {
    last: Option<Vec2>,
}

impl CursorTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Movement since the previous call that saw a position. The first
    /// position ever seen only seeds the tracker and yields zero.
    pub fn advance(&mut self, latest: Option<Vec2>) -> Vec2 {
        let Some(latest) = latest else {
            return Vec2::ZERO;
        };
        let delta = self.last.map_or(Vec2::ZERO, |last| latest - last);
        self.last = Some(latest);
        delta
    }
}
