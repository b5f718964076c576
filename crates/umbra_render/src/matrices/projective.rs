use glam::{Mat3, Mat4};
use umbra_core::scope::ScopeToken;

use crate::matrices::inputs::InstanceData;
use crate::matrices::values::{InstanceValues, LightValues, ObserverValues};

/// Matrices of a projective light under the current observer.
#[derive(Debug, Clone)]
pub struct MatricesProjectiveLight {
    scope: ScopeToken,
    observer: ObserverValues,
    light: LightValues,
}

checked_getters!(MatricesProjectiveLight {
    view: Mat4 => observer.view;
    view_inverse: Mat4 => observer.view_inverse;
    projection: Mat4 => observer.projection;
    /// World to light eye space.
    projective_view: Mat4 => light.view;
    projective_projection: Mat4 => light.projection;
    /// Observer eye space to light clip space, for projecting from
    /// reconstructed eye-space positions.
    eye_to_light_clip: Mat4 => light.eye_to_light_clip;
});

impl MatricesProjectiveLight {
    pub(crate) fn new(scope: ScopeToken, observer: ObserverValues, light: LightValues) -> Self {
        Self {
            scope,
            observer,
            light,
        }
    }

    /// Opens a scope for an instance lit by this light.
    #[track_caller]
    pub fn with_instance<R>(
        &self,
        instance: &InstanceData,
        f: impl FnOnce(&MatricesInstanceWithProjective) -> R,
    ) -> R {
        self.scope.enter("with_instance", |scope| {
            let values = InstanceValues::derive(&self.observer, instance);
            let token = MatricesInstanceWithProjective {
                scope,
                observer: self.observer,
                light: self.light,
                projective_model_view: self.light.view * values.model,
                values,
            };
            f(&token)
        })
    }

    /// Returns `true` while the issuing `with_projective_light` call is running.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.scope.is_active()
    }
}

/// Instance matrices plus the light-space matrices of the enclosing
/// projective light.
#[derive(Debug, Clone)]
pub struct MatricesInstanceWithProjective {
    scope: ScopeToken,
    observer: ObserverValues,
    light: LightValues,
    values: InstanceValues,
    projective_model_view: Mat4,
}

checked_getters!(MatricesInstanceWithProjective {
    model: Mat4 => values.model;
    model_view: Mat4 => values.model_view;
    normal: Mat3 => values.normal;
    uv: Mat3 => values.uv;
    view: Mat4 => observer.view;
    view_inverse: Mat4 => observer.view_inverse;
    projection: Mat4 => observer.projection;
    /// `projective_view * model`.
    projective_model_view: Mat4 => projective_model_view;
    projective_projection: Mat4 => light.projection;
});

impl MatricesInstanceWithProjective {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.scope.is_active()
    }
}
