//! Fixed tuning constants.

use glam::Vec3;
use std::time::Duration;

/// Simulation ticks per wall-clock second.
pub const TICKS_PER_SECOND: u32 = 60;

/// Length of one simulation tick, truncated to whole nanoseconds.
pub const TICK_PERIOD: Duration = Duration::from_nanos(1_000_000_000 / TICKS_PER_SECOND as u64);

/// Angle kept between the clamped pitch limit and true vertical.
pub const PITCH_MARGIN_DEGREES: f32 = 25.0;

/// Camera travel per tick, in world units.
pub const MOVE_SPEED: f32 = 0.1;

/// Speed factor while the sprint key is held.
pub const FAST_MULTIPLIER: f32 = 5.0;

/// Radians of yaw/pitch per unit of cursor travel.
pub const MOUSE_SENSITIVITY: f32 = 0.01;

pub const FIELD_OF_VIEW_DEGREES: f32 = 70.0;
pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 100.0;

pub const WORLD_UP: Vec3 = Vec3::Y;
pub const WORLD_FORWARD: Vec3 = Vec3::NEG_Z;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_period_matches_rate() {
        assert_eq!(TICK_PERIOD, Duration::from_nanos(16_666_666));
        assert!(TICK_PERIOD * TICKS_PER_SECOND <= Duration::from_secs(1));
    }

    #[test]
    fn world_axes_are_orthonormal() {
        assert_eq!(WORLD_UP.dot(WORLD_FORWARD), 0.0);
        assert_eq!(WORLD_UP.length(), 1.0);
        assert_eq!(WORLD_FORWARD.length(), 1.0);
    }
}
