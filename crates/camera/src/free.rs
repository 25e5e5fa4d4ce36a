use crate::Orientation;
use glam::{Mat4, Quat, Vec2, Vec3};
use spheremap_common::tuning::{WORLD_FORWARD, WORLD_UP};

/// Unconstrained flight camera.
///
/// Yaw turns `forward` about world up, then pitch turns it about the freshly
/// recomputed `right` axis, so no roll accumulates. Pointing straight up or
/// down is allowed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FreeOrientation {
    position: Vec3,
    forward: Vec3,
    right: Vec3,
}

impl Default for FreeOrientation {
    fn default() -> Self {
        Self::new(Vec3::ZERO, WORLD_FORWARD)
    }
}

impl FreeOrientation {
    /// Camera at `position` facing `facing`. A zero (or non-finite) facing
    /// vector is replaced by `WORLD_FORWARD` with a warning.
    pub fn new(position: Vec3, facing: Vec3) -> Self {
        let forward = facing.try_normalize().unwrap_or_else(|| {
            tracing::warn!(?facing, "facing vector is zero, using {WORLD_FORWARD}");
            WORLD_FORWARD
        });
        Self {
            position,
            forward,
            right: right_axis(forward, Vec3::X),
        }
    }

    /// Point the camera along `facing` without moving it.
    pub(crate) fn reset_facing(&mut self, facing: Vec3) {
        self.forward = facing.normalize();
        self.right = right_axis(self.forward, self.right);
    }
}

impl Orientation for FreeOrientation {
    fn move_by(&mut self, delta: Vec3) {
        self.position += delta.x * self.right + delta.y * WORLD_UP - delta.z * self.forward;
    }

    fn rotate(&mut self, yaw_pitch: Vec2) {
        let yawed = (Quat::from_axis_angle(WORLD_UP, yaw_pitch.x) * self.forward).normalize();
        let axis = right_axis(yawed, self.right);
        self.forward = (Quat::from_axis_angle(axis, yaw_pitch.y) * yawed).normalize();
        // A pitch over the pole flips which side is right.
        self.right = right_axis(self.forward, axis);
    }

    fn view_matrix(&self) -> Mat4 {
        // Camera up is world up projected off `forward`, so this equals
        // look_at(position, position + forward, WORLD_UP) and stays defined
        // when `forward` is vertical.
        let up = self.right.cross(self.forward);
        Mat4::look_to_rh(self.position, self.forward, up)
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn forward(&self) -> Vec3 {
        self.forward
    }

    fn right(&self) -> Vec3 {
        self.right
    }
}

/// `normalize(forward × WORLD_UP)`, or `fallback` when `forward` is vertical.
fn right_axis(forward: Vec3, fallback: Vec3) -> Vec3 {
    forward.cross(WORLD_UP).try_normalize().unwrap_or(fallback)
}
