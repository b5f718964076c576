//! Texture-unit allocation.

pub mod allocator;
pub mod binder;

pub use allocator::{TextureUnitAllocator, TextureUnitContext};
pub use binder::{TextureBinder, TextureKind, TextureUnit};
