use glam::Mat4;
use umbra_core::scope::{ScopeStack, ScopeToken};
use umbra_core::transform::ModelTransform;

use crate::matrices::inputs::{InstanceData, ProjectiveLight};
use crate::matrices::instance::MatricesInstance;
use crate::matrices::projective::MatricesProjectiveLight;
use crate::matrices::values::{InstanceValues, LightValues, ObserverValues};

/// Entry point for matrix derivation during scene traversal.
///
/// Holds no matrices itself; each [`with_observer`](Self::with_observer) call
/// starts from a clean slate.
#[derive(Debug)]
pub struct MatrixContext {
    scopes: ScopeStack,
}

impl MatrixContext {
    #[must_use]
    pub fn new() -> Self {
        Self {
            scopes: ScopeStack::new("matrices"),
        }
    }

    /// Opens an observer (camera) scope.
    ///
    /// Only one observer may be open per context at a time.
    #[track_caller]
    pub fn with_observer<R>(
        &self,
        view: Mat4,
        projection: Mat4,
        f: impl FnOnce(&MatricesObserver) -> R,
    ) -> R {
        self.scopes.root().enter("with_observer", |scope| {
            let observer = MatricesObserver {
                scope,
                values: ObserverValues::derive(view, projection),
            };
            f(&observer)
        })
    }

    /// Returns `true` while an observer scope is open.
    #[must_use]
    pub fn is_observing(&self) -> bool {
        self.scopes.depth() > 0
    }
}

impl Default for MatrixContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Matrices of the current observer.
#[derive(Debug, Clone)]
pub struct MatricesObserver {
    scope: ScopeToken,
    values: ObserverValues,
}

checked_getters!(MatricesObserver {
    /// World to eye space.
    view: Mat4 => values.view;
    /// Eye to world space, computed once on entry.
    view_inverse: Mat4 => values.view_inverse;
    projection: Mat4 => values.projection;
    /// `projection * view`.
    view_projection: Mat4 => values.view_projection;
});

impl MatricesObserver {
    /// Opens a scope for one renderable instance.
    #[track_caller]
    pub fn with_instance<R>(
        &self,
        instance: &InstanceData,
        f: impl FnOnce(&MatricesInstance) -> R,
    ) -> R {
        self.scope.enter("with_instance", |scope| {
            let token = MatricesInstance {
                scope,
                observer: self.values,
                values: InstanceValues::derive(&self.values, instance),
            };
            f(&token)
        })
    }

    /// Opens a scope for geometry that is not an instance, such as a light
    /// volume. Only the model and model-view matrices are derived.
    #[track_caller]
    pub fn with_generic_transform<R>(
        &self,
        transform: &ModelTransform,
        f: impl FnOnce(&MatricesGenericTransform) -> R,
    ) -> R {
        self.scope.enter("with_generic_transform", |scope| {
            let model = transform.to_matrix();
            let token = MatricesGenericTransform {
                scope,
                observer: self.values,
                model,
                model_view: self.values.view * model,
            };
            f(&token)
        })
    }

    /// Opens a scope for a projective light seen by this observer.
    #[track_caller]
    pub fn with_projective_light<R>(
        &self,
        light: &ProjectiveLight,
        f: impl FnOnce(&MatricesProjectiveLight) -> R,
    ) -> R {
        self.scope.enter("with_projective_light", |scope| {
            let light = LightValues::derive(&self.values, light);
            let token = MatricesProjectiveLight::new(scope, self.values, light);
            f(&token)
        })
    }

    /// Returns `true` while the issuing `with_observer` call is running.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.scope.is_active()
    }
}

/// Matrices for an arbitrary transform under the current observer.
#[derive(Debug, Clone)]
pub struct MatricesGenericTransform {
    scope: ScopeToken,
    observer: ObserverValues,
    model: Mat4,
    model_view: Mat4,
}

checked_getters!(MatricesGenericTransform {
    model: Mat4 => model;
    model_view: Mat4 => model_view;
    view: Mat4 => observer.view;
    projection: Mat4 => observer.projection;
});

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn observer_scope_is_reported() {
        let ctx = MatrixContext::new();
        assert!(!ctx.is_observing());
        ctx.with_observer(Mat4::IDENTITY, Mat4::IDENTITY, |o| {
            assert!(ctx.is_observing());
            assert!(o.is_active());
        });
        assert!(!ctx.is_observing());
    }

    #[test]
    fn generic_transform_composes_with_view() {
        let ctx = MatrixContext::new();
        let view = Mat4::from_translation(Vec3::new(0.0, 0.0, -5.0));
        let t = ModelTransform::from_translation(Vec3::X);
        ctx.with_observer(view, Mat4::IDENTITY, |o| {
            o.with_generic_transform(&t, |g| {
                assert_eq!(g.model(), Mat4::from_translation(Vec3::X));
                assert_eq!(g.model_view(), view * Mat4::from_translation(Vec3::X));
                assert_eq!(g.view(), view);
            });
        });
    }

    #[test]
    #[should_panic(expected = "use after scope")]
    fn generic_transform_faults_after_scope() {
        let ctx = MatrixContext::new();
        ctx.with_observer(Mat4::IDENTITY, Mat4::IDENTITY, |o| {
            let leaked = o.with_generic_transform(&ModelTransform::IDENTITY, MatricesGenericTransform::clone);
            let _ = leaked.model_view();
        });
    }
}
