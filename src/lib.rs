//! # Umbra
//!
//! Scoped capability contexts for a real-time renderer: texture-unit
//! allocation and derived matrix sets, both handed out to nested callbacks
//! during scene traversal.
//!
//! ```rust,ignore
//! use umbra::prelude::*;
//!
//! let matrices = MatrixContext::new();
//! let textures = TextureUnitAllocator::new(16, binder);
//!
//! matrices.with_observer(view, projection, |observer| {
//!     observer.with_instance(&InstanceData::new(transform), |instance| {
//!         textures.with_context(|units| {
//!             let albedo = units.with_texture_2d(&albedo_tex)?;
//!             draw(instance.model_view(), instance.normal(), albedo);
//!             Ok(())
//!         })
//!     })
//! })?;
//! ```

pub use glam;
pub use umbra_core;
pub use umbra_render as render;

pub use umbra_core::{ModelTransform, Result, ScopeFault, UmbraError};
pub use umbra_render::{
    AllocatorSettings, InstanceData, MatricesGenericTransform, MatricesInstance,
    MatricesInstanceWithProjective, MatricesObserver, MatricesProjectiveLight, MatrixContext,
    ProjectiveLight, TextureBinder, TextureKind, TextureUnit, TextureUnitAllocator,
    TextureUnitContext,
};

pub mod prelude {
    pub use crate::{
        InstanceData, MatrixContext, ModelTransform, ProjectiveLight, Result, TextureBinder,
        TextureUnitAllocator, UmbraError,
    };
}
