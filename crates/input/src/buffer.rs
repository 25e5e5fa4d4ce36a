use crate::event::{Key, KeyTransition, RawInputEvent};
use glam::Vec2;
use spheremap_common::Extent;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Input gathered between two drains.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSnapshot {
    /// Key transitions in arrival order.
    pub keys: Vec<KeyTransition>,
    /// Latest absolute cursor position, if the cursor moved.
    pub cursor: Option<Vec2>,
    /// New framebuffer size, if the window was resized.
    pub resize: Option<Extent>,
}

impl InputSnapshot {
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty() && self.cursor.is_none() && self.resize.is_none()
    }
}

/// Mailbox between the platform thread (single producer) and the simulation
/// thread (single consumer).
///
/// One mutex guards all pending state and is held only while appending or
/// while swapping the pending state out, never across simulation or
/// rendering work.
#[derive(Debug, Default)]
pub struct InputBuffer {
    pending: Mutex<InputSnapshot>,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one platform event. Key transitions queue up; cursor positions
    /// and resizes overwrite the previous value.
    pub fn push(&self, event: RawInputEvent) {
        let mut pending = self.lock();
        match event {
            RawInputEvent::Key(transition) => pending.keys.push(transition),
            RawInputEvent::CursorMoved(position) => pending.cursor = Some(position),
            RawInputEvent::Resized(extent) => pending.resize = Some(extent),
        }
    }

    pub fn push_key(&self, key: Key, pressed: bool) {
        self.push(RawInputEvent::Key(KeyTransition { key, pressed }));
    }

    pub fn push_cursor(&self, x: f32, y: f32) {
        self.push(RawInputEvent::CursorMoved(Vec2::new(x, y)));
    }

    pub fn push_resize(&self, width: u32, height: u32) {
        self.push(RawInputEvent::Resized(Extent::new(width, height)));
    }

    /// Take everything pushed since the previous drain and leave the buffer
    /// empty.
    pub fn drain(&self) -> InputSnapshot {
        let snapshot = std::mem::take(&mut *self.lock());
        if !snapshot.keys.is_empty() {
            tracing::trace!(keys = snapshot.keys.len(), "drained key transitions");
        }
        snapshot
    }

    // Pending state is plain data and every write leaves it consistent, so a
    // panic on the other thread cannot corrupt it.
    fn lock(&self) -> MutexGuard<'_, InputSnapshot> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[test]
    fn drain_of_empty_buffer_is_empty() {
        let buffer = InputBuffer::new();
        assert!(buffer.drain().is_empty());
    }

    #[test]
    fn keys_keep_order_and_drain_resets() {
        let buffer = InputBuffer::new();
        buffer.push_key(Key::W, true);
        buffer.push_key(Key::W, false);
        buffer.push_key(Key::W, true);

        let snapshot = buffer.drain();
        assert_eq!(
            snapshot.keys,
            vec![
                KeyTransition::press(Key::W),
                KeyTransition::release(Key::W),
                KeyTransition::press(Key::W),
            ]
        );
        assert!(buffer.drain().is_empty());
    }

    #[test]
    fn cursor_is_coalesced_to_latest() {
        let buffer = InputBuffer::new();
        buffer.push_cursor(1.0, 1.0);
        buffer.push_cursor(2.0, 5.0);
        buffer.push_cursor(3.0, 9.0);

        let snapshot = buffer.drain();
        assert_eq!(snapshot.cursor, Some(Vec2::new(3.0, 9.0)));
        assert!(snapshot.keys.is_empty());
        assert_eq!(buffer.drain().cursor, None);
    }

    #[test]
    fn latest_resize_wins() {
        let buffer = InputBuffer::new();
        buffer.push_resize(640, 480);
        buffer.push_resize(1280, 720);
        assert_eq!(buffer.drain().resize, Some(Extent::new(1280, 720)));
    }

    #[test]
    fn concurrent_push_and_drain_lose_nothing() {
        const COUNT: usize = 20_000;
        let expected: Vec<KeyTransition> = (0..COUNT)
            .map(|i| KeyTransition {
                key: Key::ALL[i % Key::ALL.len()],
                pressed: (i / Key::ALL.len()) % 2 == 0,
            })
            .collect();

        let buffer = InputBuffer::new();
        let done = AtomicBool::new(false);
        let mut received = Vec::with_capacity(COUNT);

        std::thread::scope(|scope| {
            scope.spawn(|| {
                for (i, transition) in expected.iter().enumerate() {
                    buffer.push(RawInputEvent::Key(*transition));
                    buffer.push_cursor(i as f32, 0.0);
                }
                done.store(true, Ordering::Release);
            });

            loop {
                let finished = done.load(Ordering::Acquire);
                received.extend(buffer.drain().keys);
                if finished {
                    break;
                }
            }
        });

        assert_eq!(received, expected);
    }
}
