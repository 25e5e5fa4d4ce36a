use crate::event::Key;
use crate::state::HeldKeys;
use glam::{Vec2, Vec3};
use std::collections::BTreeMap;

/// What a bound key does. The simulation consumes actions, never raw keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveForward,
    MoveBackward,
    StrafeLeft,
    StrafeRight,
    Ascend,
    Descend,
    /// Multiplies movement speed while held.
    Sprint,
    /// Close the window. Handled by the platform thread.
    Quit,
}

/// Key to action table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    bindings: BTreeMap<Key, Action>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::from_pairs([
            (Key::W, Action::MoveForward),
            (Key::S, Action::MoveBackward),
            (Key::A, Action::StrafeLeft),
            (Key::D, Action::StrafeRight),
            (Key::Space, Action::Ascend),
            (Key::LeftShift, Action::Descend),
            (Key::LeftControl, Action::Sprint),
            (Key::Escape, Action::Quit),
        ])
    }
}

impl KeyBindings {
    pub fn from_pairs(pairs: impl IntoIterator<Item = (Key, Action)>) -> Self {
        Self {
            bindings: pairs.into_iter().collect(),
        }
    }

    pub fn action(&self, key: Key) -> Option<Action> {
        self.bindings.get(&key).copied()
    }

    fn is_active(&self, held: &HeldKeys, action: Action) -> bool {
        held.iter().any(|key| self.action(key) == Some(action))
    }

    /// Camera-local movement for one tick: `x` strafe, `y` vertical, `z`
    /// backwards.
    pub fn movement(&self, held: &HeldKeys, speed: f32, fast_multiplier: f32) -> Vec3 {
        let speed = if self.is_active(held, Action::Sprint) {
            speed * fast_multiplier
        } else {
            speed
        };

        let mut delta = Vec3::ZERO;
        for key in held.iter() {
            match self.action(key) {
                Some(Action::MoveForward) => delta.z -= speed,
                Some(Action::MoveBackward) => delta.z += speed,
                Some(Action::StrafeLeft) => delta.x -= speed,
                Some(Action::StrafeRight) => delta.x += speed,
                Some(Action::Ascend) => delta.y += speed,
                Some(Action::Descend) => delta.y -= speed,
                Some(Action::Sprint | Action::Quit) | None => {}
            }
        }
        delta
    }
}

/// Yaw/pitch for a cursor movement: right turns right, up looks up.
pub fn look_delta(cursor_delta: Vec2, sensitivity: f32) -> Vec2 {
    -sensitivity * cursor_delta
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::KeyTransition;

    fn held(keys: &[Key]) -> HeldKeys {
        let mut held = HeldKeys::new();
        let transitions: Vec<_> = keys.iter().copied().map(KeyTransition::press).collect();
        held.apply(&transitions);
        held
    }

    #[test]
    fn default_bindings() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.action(Key::W), Some(Action::MoveForward));
        assert_eq!(bindings.action(Key::Escape), Some(Action::Quit));
        assert_eq!(bindings.action(Key::LeftControl), Some(Action::Sprint));
    }

    #[test]
    fn forward_is_negative_z() {
        let bindings = KeyBindings::default();
        let delta = bindings.movement(&held(&[Key::W]), 0.1, 5.0);
        assert_eq!(delta, Vec3::new(0.0, 0.0, -0.1));
    }

    #[test]
    fn opposite_keys_cancel() {
        let bindings = KeyBindings::default();
        let delta = bindings.movement(&held(&[Key::A, Key::D, Key::Space]), 0.1, 5.0);
        assert_eq!(delta, Vec3::new(0.0, 0.1, 0.0));
    }

    #[test]
    fn sprint_multiplies_speed() {
        let bindings = KeyBindings::default();
        let delta = bindings.movement(&held(&[Key::S, Key::LeftControl]), 0.1, 5.0);
        assert!((delta.z - 0.5).abs() < 1e-6);
    }

    #[test]
    fn unbound_keys_do_nothing() {
        let bindings = KeyBindings::from_pairs([(Key::W, Action::MoveForward)]);
        assert_eq!(bindings.action(Key::S), None);
        assert_eq!(bindings.movement(&held(&[Key::S]), 1.0, 1.0), Vec3::ZERO);
    }

    #[test]
    fn cursor_right_and_up_turn_right_and_look_up() {
        let look = look_delta(Vec2::new(10.0, -4.0), 0.01);
        assert!(look.x < 0.0);
        assert!(look.y > 0.0);
        assert!((look - Vec2::new(-0.1, 0.04)).length() < 1e-6);
    }
}
