//! Per-node data consumed from the scene graph.

use glam::{Mat3, Mat4, Quat, Vec3};
use umbra_core::transform::ModelTransform;

/// A renderable instance as seen by the matrix contexts.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InstanceData {
    pub transform: ModelTransform,
    /// Texture-coordinate transform applied in the vertex stage.
    pub uv: Mat3,
}

impl InstanceData {
    /// Instance with an identity UV transform.
    #[must_use]
    pub fn new(transform: impl Into<ModelTransform>) -> Self {
        Self {
            transform: transform.into(),
            uv: Mat3::IDENTITY,
        }
    }

    #[must_use]
    pub fn with_uv(mut self, uv: Mat3) -> Self {
        self.uv = uv;
        self
    }
}

/// Placement and projection of a projective light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectiveLight {
    pub position: Vec3,
    pub orientation: Quat,
    pub projection: Mat4,
}

impl ProjectiveLight {
    /// A light with a right-handed perspective frustum. `fov_y` is in radians.
    #[must_use]
    pub fn perspective(
        position: Vec3,
        orientation: Quat,
        fov_y: f32,
        aspect: f32,
        near: f32,
        far: f32,
    ) -> Self {
        Self {
            position,
            orientation,
            projection: Mat4::perspective_rh(fov_y, aspect, near, far),
        }
    }

    /// A light at `position` looking at `target`.
    #[must_use]
    pub fn looking_at(position: Vec3, target: Vec3, up: Vec3, projection: Mat4) -> Self {
        let view = Mat4::look_at_rh(position, target, up);
        let (_, rotation, _) = view.inverse().to_scale_rotation_translation();
        Self {
            position,
            orientation: rotation,
            projection,
        }
    }
}
