//! Camera orientation: turns accumulated move/look deltas into a view matrix.
//!
//! Two navigation modes share one capability set ([`Orientation`]):
//! - [`FreeOrientation`] composes rotations and may point straight up or down.
//! - [`ClampedOrientation`] wraps a free orientation and rebuilds its facing
//!   from stored yaw/pitch every rotation, keeping pitch inside
//!   `±(90° - PITCH_MARGIN_DEGREES)`.
//!
//! # Invariants
//! - `forward` is unit length; `right == normalize(forward × WORLD_UP)`
//!   after every rotation.
//! - Clamped pitch never leaves its range, not even by one rotation step.
//! - Camera state is only mutated by the simulation thread.

mod clamped;
mod free;

pub use clamped::{ClampedOrientation, pitch_limit};
pub use free::FreeOrientation;

use glam::{Mat4, Vec2, Vec3};
use spheremap_common::tuning::WORLD_FORWARD;
use std::fmt;
use std::str::FromStr;

/// Capabilities shared by every navigation mode.
pub trait Orientation {
    /// Move in camera-local axes: `x` strafes along `right`, `y` rises along
    /// world up, `z` moves backwards along `forward`.
    fn move_by(&mut self, delta: Vec3);

    /// Apply a yaw (about world up) then a pitch (about the camera's right
    /// axis), both in radians.
    fn rotate(&mut self, yaw_pitch: Vec2);

    /// Right-handed look-at transform for the current pose.
    fn view_matrix(&self) -> Mat4;

    fn position(&self) -> Vec3;

    fn forward(&self) -> Vec3;

    fn right(&self) -> Vec3;
}

/// Navigation mode picked at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraMode {
    Free,
    #[default]
    Clamped,
}

impl fmt::Display for CameraMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Free => f.write_str("free"),
            Self::Clamped => f.write_str("clamped"),
        }
    }
}

impl FromStr for CameraMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "free" => Ok(Self::Free),
            "clamped" => Ok(Self::Clamped),
            other => Err(format!("unknown camera mode `{other}` (expected free or clamped)")),
        }
    }
}

/// The camera the simulation owns, in either navigation mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrientationState {
    Free(FreeOrientation),
    Clamped(ClampedOrientation),
}

impl OrientationState {
    /// Free-flight camera at `position` facing `facing`.
    pub fn free(position: Vec3, facing: Vec3) -> Self {
        Self::Free(FreeOrientation::new(position, facing))
    }

    /// Pitch-clamped camera at `position` with initial yaw/pitch in radians.
    pub fn clamped(position: Vec3, yaw_pitch: Vec2) -> Self {
        Self::Clamped(ClampedOrientation::new(position, yaw_pitch))
    }

    /// Camera at `position` looking along `WORLD_FORWARD` in the given mode.
    pub fn for_mode(mode: CameraMode, position: Vec3) -> Self {
        match mode {
            CameraMode::Free => Self::free(position, WORLD_FORWARD),
            CameraMode::Clamped => Self::clamped(position, Vec2::ZERO),
        }
    }

    fn as_dyn(&self) -> &dyn Orientation {
        match self {
            Self::Free(free) => free,
            Self::Clamped(clamped) => clamped,
        }
    }

    fn as_dyn_mut(&mut self) -> &mut dyn Orientation {
        match self {
            Self::Free(free) => free,
            Self::Clamped(clamped) => clamped,
        }
    }
}

impl Default for OrientationState {
    fn default() -> Self {
        Self::Clamped(ClampedOrientation::default())
    }
}

impl Orientation for OrientationState {
    fn move_by(&mut self, delta: Vec3) {
        self.as_dyn_mut().move_by(delta);
    }

    fn rotate(&mut self, yaw_pitch: Vec2) {
        self.as_dyn_mut().rotate(yaw_pitch);
    }

    fn view_matrix(&self) -> Mat4 {
        self.as_dyn().view_matrix()
    }

    fn position(&self) -> Vec3 {
        self.as_dyn().position()
    }

    fn forward(&self) -> Vec3 {
        self.as_dyn().forward()
    }

    fn right(&self) -> Vec3 {
        self.as_dyn().right()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_clamped_at_origin() {
        let state = OrientationState::default();
        assert!(matches!(state, OrientationState::Clamped(_)));
        assert_eq!(state.position(), Vec3::ZERO);
        assert!((state.forward() - WORLD_FORWARD).length() < 1e-6);
    }

    #[test]
    fn both_modes_agree_on_small_rotations() {
        let mut free = OrientationState::free(Vec3::ZERO, WORLD_FORWARD);
        let mut clamped = OrientationState::clamped(Vec3::ZERO, Vec2::ZERO);
        free.rotate(Vec2::new(0.3, 0.2));
        clamped.rotate(Vec2::new(0.3, 0.2));
        assert!((free.forward() - clamped.forward()).length() < 1e-5);
        assert!(free.view_matrix().abs_diff_eq(clamped.view_matrix(), 1e-5));
    }

    #[test]
    fn camera_mode_parses_and_prints() {
        assert_eq!("free".parse::<CameraMode>(), Ok(CameraMode::Free));
        assert_eq!("Clamped".parse::<CameraMode>(), Ok(CameraMode::Clamped));
        assert!("orbit".parse::<CameraMode>().is_err());
        assert_eq!(CameraMode::Free.to_string(), "free");
    }

    #[test]
    fn for_mode_picks_variant() {
        let free = OrientationState::for_mode(CameraMode::Free, Vec3::Z);
        assert!(matches!(free, OrientationState::Free(_)));
        assert_eq!(free.position(), Vec3::Z);
        let clamped = OrientationState::for_mode(CameraMode::Clamped, Vec3::Z);
        assert!(matches!(clamped, OrientationState::Clamped(_)));
        assert!((clamped.forward() - WORLD_FORWARD).length() < 1e-6);
    }

    #[test]
    fn dispatch_moves_the_wrapped_camera() {
        let mut state = OrientationState::free(Vec3::ZERO, WORLD_FORWARD);
        state.move_by(Vec3::new(0.0, 0.0, -1.0));
        assert!((state.position() - Vec3::NEG_Z).length() < 1e-6);
    }
}
