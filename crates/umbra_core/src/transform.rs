//! Local transforms supplied by the scene graph, and the small amount of
//! matrix math shared by every derived matrix context.

use glam::{Affine3A, Mat3, Mat4, Quat, Vec3};

/// Local transform of a scene node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModelTransform {
    /// Applied to the object as scale, then rotation by `orientation`,
    /// then translation.
    Trs {
        orientation: Quat,
        scale: Vec3,
        translation: Vec3,
    },
    /// An arbitrary object-to-world matrix.
    Matrix(Mat4),
}

impl ModelTransform {
    pub const IDENTITY: Self = Self::Trs {
        orientation: Quat::IDENTITY,
        scale: Vec3::ONE,
        translation: Vec3::ZERO,
    };

    #[must_use]
    pub fn from_translation(translation: Vec3) -> Self {
        Self::Trs {
            orientation: Quat::IDENTITY,
            scale: Vec3::ONE,
            translation,
        }
    }

    /// The object-to-world matrix.
    #[must_use]
    pub fn to_matrix(&self) -> Mat4 {
        match *self {
            Self::Trs {
                orientation,
                scale,
                translation,
            } => Mat4::from(Affine3A::from_scale_rotation_translation(
                scale,
                orientation,
                translation,
            )),
            Self::Matrix(m) => m,
        }
    }
}

impl Default for ModelTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<Mat4> for ModelTransform {
    fn from(m: Mat4) -> Self {
        Self::Matrix(m)
    }
}

/// Normal matrix of a model-view matrix: the inverse transpose of its upper
/// 3×3 block.
///
/// Small determinants are fine: millimetre-scale scenes invert exactly like
/// metre-scale ones. Only an exactly singular block (zero scale on some axis),
/// or one whose inverse overflows, falls back to the transpose of the block so
/// shading degrades rather than producing NaNs.
#[must_use]
pub fn normal_matrix(model_view: &Mat4) -> Mat3 {
    let upper = Mat3::from_mat4(*model_view);
    if upper.determinant() != 0.0 {
        let inverse = upper.inverse();
        if inverse.is_finite() {
            return inverse.transpose();
        }
    }
    log::warn!("singular model-view matrix, normal matrix is not invertible");
    upper.transpose()
}

/// View matrix of an object placed at `position` with `orientation`: the
/// inverse of its placement.
#[must_use]
pub fn view_from_placement(position: Vec3, orientation: Quat) -> Mat4 {
    Mat4::from_quat(orientation.conjugate()) * Mat4::from_translation(-position)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn trs_matches_composed_matrices() {
        let t = ModelTransform::Trs {
            orientation: Quat::from_rotation_y(0.5),
            scale: Vec3::new(1.0, 2.0, 3.0),
            translation: Vec3::new(4.0, 5.0, 6.0),
        };
        let expected = Mat4::from_translation(Vec3::new(4.0, 5.0, 6.0))
            * Mat4::from_quat(Quat::from_rotation_y(0.5))
            * Mat4::from_scale(Vec3::new(1.0, 2.0, 3.0));
        assert!(t.to_matrix().abs_diff_eq(expected, EPSILON));
    }

    #[test]
    fn normal_matrix_of_uniform_scale_is_rescaled_rotation() {
        let mv = Mat4::from_scale(Vec3::splat(2.0));
        let n = normal_matrix(&mv);
        assert!(n.abs_diff_eq(Mat3::from_diagonal(Vec3::splat(0.5)), EPSILON));
    }

    #[test]
    fn normal_matrix_of_singular_matrix_is_finite() {
        let mv = Mat4::from_scale(Vec3::new(1.0, 0.0, 1.0));
        let n = normal_matrix(&mv);
        assert!(n.is_finite());
    }

    #[test]
    fn normal_matrix_of_small_non_uniform_scale_is_inverse_transpose() {
        let model_view = Mat4::from(Affine3A::from_scale_rotation_translation(
            Vec3::new(0.001, 0.004, 0.002),
            Quat::from_rotation_z(0.6),
            Vec3::new(0.01, 0.0, -0.02),
        ));
        let upper = Mat3::from_mat4(model_view);
        assert!(upper.determinant().abs() < f32::EPSILON);

        let n = normal_matrix(&model_view);
        assert!(n.is_finite());
        assert_eq!(n, upper.inverse().transpose());

        // The shading normal follows the inverse transpose; the transpose
        // fallback would tilt it towards the other axis.
        let surface = Vec3::new(1.0, 1.0, 0.0);
        let normal = (n * surface).normalize();
        let transposed = (upper.transpose() * surface).normalize();
        let expected = (Quat::from_rotation_z(0.6) * Vec3::new(1000.0, 250.0, 0.0)).normalize();
        assert!(normal.abs_diff_eq(expected, 1e-4));
        assert!(!normal.abs_diff_eq(transposed, 1e-2));
    }

    #[test]
    fn view_from_placement_inverts_placement() {
        let position = Vec3::new(1.0, 2.0, 3.0);
        let orientation = Quat::from_rotation_x(0.3);
        let placement = Mat4::from_rotation_translation(orientation, position);
        let view = view_from_placement(position, orientation);
        assert!((view * placement).abs_diff_eq(Mat4::IDENTITY, EPSILON));
    }
}
