use glam::{Mat3, Mat4};
use umbra_core::scope::ScopeToken;

use crate::matrices::values::{InstanceValues, ObserverValues};

/// Matrices of one instance under the current observer.
#[derive(Debug, Clone)]
pub struct MatricesInstance {
    pub(crate) scope: ScopeToken,
    pub(crate) observer: ObserverValues,
    pub(crate) values: InstanceValues,
}

checked_getters!(MatricesInstance {
    /// Object to world space.
    model: Mat4 => values.model;
    /// `view * model`.
    model_view: Mat4 => values.model_view;
    /// Inverse transpose of the upper 3×3 of the model-view matrix.
    normal: Mat3 => values.normal;
    uv: Mat3 => values.uv;
    view: Mat4 => observer.view;
    view_inverse: Mat4 => observer.view_inverse;
    projection: Mat4 => observer.projection;
});

impl MatricesInstance {
    /// Returns `true` while the issuing `with_instance` call is running.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.scope.is_active()
    }
}
