//! Scoped render-resource contexts for the Umbra engine.
//!
//! - [`textures`]: texture-unit allocation for nested render passes.
//! - [`matrices`]: observer, projective-light and instance matrix derivation.
//! - [`settings`]: budget configuration derived from adapter limits.
//!
//! Both allocators hand out capability tokens that are only valid inside the
//! callback receiving them. Misuse is a programmer error and panics; running
//! out of texture units is an ordinary [`UmbraError`](umbra_core::UmbraError).

pub mod matrices;
pub mod settings;
pub mod textures;

pub use matrices::{
    InstanceData, MatricesGenericTransform, MatricesInstance, MatricesInstanceWithProjective,
    MatricesObserver, MatricesProjectiveLight, MatrixContext, ProjectiveLight,
};
pub use settings::AllocatorSettings;
pub use textures::{
    TextureBinder, TextureKind, TextureUnit, TextureUnitAllocator, TextureUnitContext,
};
