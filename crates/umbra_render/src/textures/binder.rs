//! Graphics-side collaborator of the texture-unit allocator.

use std::fmt;

/// Index of a hardware texture unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureUnit(u32);

impl TextureUnit {
    #[inline]
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for TextureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unit {}", self.0)
    }
}

/// Binding target of a texture unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureKind {
    Texture2D,
    TextureCube,
}

/// Performs the actual binding of textures to units.
///
/// The allocator decides *which* unit a texture goes to; the binder talks to
/// the graphics API. Units reclaimed when a context closes are simply reused
/// by the next bind, so a binder never receives an unbind call.
pub trait TextureBinder {
    type Texture2D: ?Sized;
    type TextureCube: ?Sized;

    fn bind_texture_2d(&self, unit: TextureUnit, texture: &Self::Texture2D);

    fn bind_texture_cube(&self, unit: TextureUnit, texture: &Self::TextureCube);
}
