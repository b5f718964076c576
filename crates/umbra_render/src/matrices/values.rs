//! Plain matrix bundles computed on scope entry.
//!
//! All composition uses the column-vector convention: `a * b` applies `b`
//! first.

use glam::{Mat3, Mat4};
use umbra_core::transform::{normal_matrix, view_from_placement};

use crate::matrices::inputs::{InstanceData, ProjectiveLight};

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ObserverValues {
    pub view: Mat4,
    pub view_inverse: Mat4,
    pub projection: Mat4,
    pub view_projection: Mat4,
}

impl ObserverValues {
    /// A singular view has no inverse. `view_inverse` is then non-finite, as
    /// is every matrix derived from it (`eye_to_light_clip`); a warning is
    /// logged once per observer scope.
    pub fn derive(view: Mat4, projection: Mat4) -> Self {
        let view_inverse = view.inverse();
        if view.determinant() == 0.0 || !view_inverse.is_finite() {
            log::warn!("singular view matrix, view inverse is not finite");
        }
        Self {
            view,
            view_inverse,
            projection,
            view_projection: projection * view,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct InstanceValues {
    pub model: Mat4,
    pub model_view: Mat4,
    pub normal: Mat3,
    pub uv: Mat3,
}

impl InstanceValues {
    pub fn derive(observer: &ObserverValues, data: &InstanceData) -> Self {
        let model = data.transform.to_matrix();
        let model_view = observer.view * model;
        Self {
            model,
            model_view,
            normal: normal_matrix(&model_view),
            uv: data.uv,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct LightValues {
    pub view: Mat4,
    pub projection: Mat4,
    /// Maps observer eye space to the light's clip space.
    pub eye_to_light_clip: Mat4,
}

impl LightValues {
    pub fn derive(observer: &ObserverValues, light: &ProjectiveLight) -> Self {
        let view = view_from_placement(light.position, light.orientation);
        Self {
            view,
            projection: light.projection,
            eye_to_light_clip: light.projection * view * observer.view_inverse,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec3, Vec4};

    #[test]
    fn observer_inverse_of_invertible_view() {
        let view = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        let values = ObserverValues::derive(view, Mat4::IDENTITY);
        assert!((values.view * values.view_inverse).abs_diff_eq(Mat4::IDENTITY, 1e-5));
    }

    #[test]
    fn singular_view_keeps_inputs_and_yields_non_finite_inverse() {
        let view = Mat4::from_diagonal(Vec4::new(1.0, 0.0, 1.0, 1.0));
        let values = ObserverValues::derive(view, Mat4::IDENTITY);
        assert_eq!(values.view, view);
        assert_eq!(values.projection, Mat4::IDENTITY);
        assert!(!values.view_inverse.is_finite());
    }
}
