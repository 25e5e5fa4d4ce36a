use glam::Vec2;
use spheremap_common::Extent;

/// Keys the simulation understands. Platform layers map their own key codes
/// onto these and drop everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    W,
    A,
    S,
    D,
    Space,
    LeftShift,
    LeftControl,
    Escape,
}

impl Key {
    pub const ALL: [Key; 8] = [
        Key::W,
        Key::A,
        Key::S,
        Key::D,
        Key::Space,
        Key::LeftShift,
        Key::LeftControl,
        Key::Escape,
    ];
}

/// A key going down or up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyTransition {
    pub key: Key,
    pub pressed: bool,
}

impl KeyTransition {
    pub fn press(key: Key) -> Self {
        Self { key, pressed: true }
    }

    pub fn release(key: Key) -> Self {
        Self {
            key,
            pressed: false,
        }
    }
}

/// One event as delivered by the platform thread.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawInputEvent {
    Key(KeyTransition),
    /// Absolute cursor position.
    CursorMoved(Vec2),
    Resized(Extent),
}

impl From<KeyTransition> for RawInputEvent {
    fn from(transition: KeyTransition) -> Self {
        Self::Key(transition)
    }
}
