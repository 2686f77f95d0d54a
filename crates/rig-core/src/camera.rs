//! Camera pose and the per-tick controller that eases it toward a target.
//!
//! Orientation is never interpolated as a rotation. The controller recovers
//! an implied gaze point one unit in front of the camera, lerps that point
//! toward the target gaze, and hands the result back as the new `look_at`.
//! When position and gaze targets move at different rates this drifts a
//! little; that is accepted.

use crate::config::{CameraLerpConfig, TargetConfig};
use crate::smoothing::{advance, SmoothedState};
use glam::{Mat4, Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub look_at: Vec3,
}

impl CameraPose {
    pub fn new(position: Vec3, look_at: Vec3) -> Self {
        Self { position, look_at }
    }

    /// Unit view-space Z axis in world space. The camera looks down -Z, so
    /// this points from the gaze point back toward the camera. Falls back to
    /// +Z when position and gaze coincide.
    pub fn forward_axis(&self) -> Vec3 {
        let axis = (self.position - self.look_at).normalize_or_zero();
        if axis == Vec3::ZERO {
            Vec3::Z
        } else {
            axis
        }
    }

    /// Right-handed world-to-view matrix for this pose.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position - self.forward_axis(), Vec3::Y)
    }

    /// `[px, py, pz, lx, ly, lz]`, the layout handed to renderers.
    pub fn to_array(&self) -> [f32; 6] {
        let p = self.position;
        let l = self.look_at;
        [p.x, p.y, p.z, l.x, l.y, l.z]
    }
}

#[inline]
fn advance_vec3(prev: Vec3, target: Vec3, factor: f32) -> Vec3 {
    Vec3::new(
        advance(prev.x, target.x, factor),
        advance(prev.y, target.y, factor),
        advance(prev.z, target.z, factor),
    )
}

/// One controller step. Pure: the caller owns the pose.
pub fn update(
    current: &CameraPose,
    target_position: Vec3,
    target_look_at: Vec3,
    cfg: &CameraLerpConfig,
) -> CameraPose {
    let position = advance_vec3(current.position, target_position, cfg.position_factor);

    let implied_look_at = current.position - current.forward_axis();
    let look_at = advance_vec3(implied_look_at, target_look_at, cfg.orientation_factor);

    let next = CameraPose { position, look_at };
    if next.position.is_finite() && next.look_at.is_finite() {
        next
    } else {
        *current
    }
}

/// Maps the smoothed pointer onto a target pose: the rest position is
/// offset in the view plane, the gaze stays put.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraTarget {
    pub base_position: Vec3,
    pub base_look_at: Vec3,
}

impl CameraTarget {
    pub fn new(cfg: &TargetConfig) -> Self {
        Self {
            base_position: cfg.base_position,
            base_look_at: cfg.base_look_at,
        }
    }

    pub fn resolve(&self, smoothed: SmoothedState) -> (Vec3, Vec3) {
        (
            self.base_position + Vec3::new(smoothed.x, smoothed.y, 0.0),
            self.base_look_at,
        )
    }

    pub fn rest_pose(&self) -> CameraPose {
        CameraPose::new(self.base_position, self.base_look_at)
    }
}

#[derive(Clone, Debug)]
pub struct CameraController {
    cfg: CameraLerpConfig,
    pose: CameraPose,
}

impl CameraController {
    pub fn new(cfg: CameraLerpConfig, initial: CameraPose) -> Self {
        Self { cfg, pose: initial }
    }

    pub fn pose(&self) -> CameraPose {
        self.pose
    }

    pub fn tick(&mut self, target_position: Vec3, target_look_at: Vec3) -> CameraPose {
        self.pose = update(&self.pose, target_position, target_look_at, &self.cfg);
        self.pose
    }
}
