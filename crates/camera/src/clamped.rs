use crate::{FreeOrientation, Orientation};
use glam::{Mat4, Vec2, Vec3};
use spheremap_common::tuning::{PITCH_MARGIN_DEGREES, WORLD_FORWARD};
use std::f32::consts::FRAC_PI_2;

/// Largest pitch magnitude a [`ClampedOrientation`] accepts, in radians.
pub fn pitch_limit() -> f32 {
    FRAC_PI_2 - PITCH_MARGIN_DEGREES.to_radians()
}

/// Look camera with pitch held inside `±pitch_limit()`.
///
/// Yaw and pitch are stored as scalars. Every rotation resets the wrapped
/// free camera to `WORLD_FORWARD` and reapplies the stored angles, so the
/// facing never drifts and the clamp is exact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClampedOrientation {
    free: FreeOrientation,
    yaw: f32,
    pitch: f32,
}

impl Default for ClampedOrientation {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec2::ZERO)
    }
}

impl ClampedOrientation {
    pub fn new(position: Vec3, yaw_pitch: Vec2) -> Self {
        let mut cam = Self {
            free: FreeOrientation::new(position, WORLD_FORWARD),
            yaw: yaw_pitch.x,
            pitch: yaw_pitch.y,
        };
        cam.rebuild();
        cam
    }

    /// Accumulated yaw in radians. Unbounded.
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Accumulated pitch in radians, always within `±pitch_limit()`.
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    fn rebuild(&mut self) {
        let limit = pitch_limit();
        self.pitch = self.pitch.clamp(-limit, limit);
        self.free.reset_facing(WORLD_FORWARD);
        self.free.rotate(Vec2::new(self.yaw, self.pitch));
    }
}

impl Orientation for ClampedOrientation {
    fn move_by(&mut self, delta: Vec3) {
        self.free.move_by(delta);
    }

    fn rotate(&mut self, yaw_pitch: Vec2) {
        self.yaw += yaw_pitch.x;
        self.pitch += yaw_pitch.y;
        self.rebuild();
    }

    fn view_matrix(&self) -> Mat4 {
        self.free.view_matrix()
    }

    fn position(&self) -> Vec3 {
        self.free.position()
    }

    fn forward(&self) -> Vec3 {
        self.free.forward()
    }

    fn right(&self) -> Vec3 {
        self.free.right()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spheremap_common::tuning::WORLD_UP;

    #[test]
    fn limit_keeps_margin_from_vertical() {
        let limit = pitch_limit();
        assert!((limit.to_degrees() - 65.0).abs() < 1e-4);
    }

    #[test]
    fn initial_pitch_is_clamped() {
        let cam = ClampedOrientation::new(Vec3::ZERO, Vec2::new(0.0, 10.0));
        assert_eq!(cam.pitch(), pitch_limit());
        let expected_y = pitch_limit().sin();
        assert!((cam.forward().y - expected_y).abs() < 1e-5);
    }

    #[test]
    fn pitch_clamp_is_exact_for_any_sequence() {
        let limit = pitch_limit();
        let mut cam = ClampedOrientation::default();
        let steps = [0.7, 0.7, 0.7, -0.01, 3.0, -10.0, -0.3, 0.05, 100.0, -0.9];
        for (i, step) in steps.iter().cycle().take(1_000).enumerate() {
            cam.rotate(Vec2::new(i as f32 * 0.01, *step));
            assert!(cam.pitch() >= -limit && cam.pitch() <= limit);
            let elevation = cam.forward().dot(WORLD_UP).asin();
            assert!(elevation.abs() <= limit + 1e-5);
        }
        cam.rotate(Vec2::new(0.0, 5.0));
        assert_eq!(cam.pitch(), limit);
        cam.rotate(Vec2::new(0.0, -50.0));
        assert_eq!(cam.pitch(), -limit);
    }

    #[test]
    fn yaw_is_unbounded() {
        let mut cam = ClampedOrientation::default();
        for _ in 0..100 {
            cam.rotate(Vec2::new(1.0, 0.0));
        }
        assert!((cam.yaw() - 100.0).abs() < 1e-3);
    }

    #[test]
    fn facing_is_rebuilt_not_accumulated() {
        let mut incremental = ClampedOrientation::default();
        for _ in 0..10_000 {
            incremental.rotate(Vec2::new(0.001, 0.00001));
        }
        let direct = ClampedOrientation::new(Vec3::ZERO, Vec2::new(incremental.yaw(), incremental.pitch()));
        assert!((incremental.forward() - direct.forward()).length() < 1e-6);
        assert!((incremental.forward().length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn movement_follows_yaw() {
        let mut cam = ClampedOrientation::default();
        cam.rotate(Vec2::new(std::f32::consts::FRAC_PI_2, 0.0));
        cam.move_by(Vec3::new(0.0, 0.0, -1.0));
        assert!((cam.position() - Vec3::NEG_X).length() < 1e-5);
    }
}
