//! Texture Unit Allocator
//!
//! Hands out hardware texture units to nested render operations.
//!
//! Units are allocated like a bump arena with savepoints: each bind takes the
//! next unit after everything currently bound, and closing a context truncates
//! the arena back to where it stood when the context opened. Sibling contexts
//! therefore reuse the same physical units, in the same order.
//!
//! ```rust,ignore
//! let allocator = TextureUnitAllocator::new(16, binder);
//! allocator.with_context(|material| {
//!     let albedo = material.with_texture_2d(&albedo_tex)?;      // unit 0
//!     material.with_context(|shadow| {
//!         let depth = shadow.with_texture_2d(&shadow_map)?;     // unit 1
//!         Ok(())
//!     })?;
//!     let env = material.with_texture_cube(&environment)?;      // unit 1 again
//!     Ok(())
//! })?;
//! ```
//!
//! Contexts must only be used inside the callback that received them, and a
//! context must not bind or open children while one of its own children is
//! open. Both are faults (panics), see [`ScopeFault`](umbra_core::ScopeFault).

use std::cell::RefCell;

use umbra_core::errors::{Result, UmbraError};
use umbra_core::scope::{ScopeStack, ScopeToken};

use crate::settings::AllocatorSettings;
use crate::textures::binder::{TextureBinder, TextureKind, TextureUnit};

/// Upper bound on the arena pre-allocation; the budget itself may be larger.
const INITIAL_UNIT_CAPACITY: u32 = 64;

#[derive(Debug, Clone, Copy)]
struct Binding {
    kind: TextureKind,
    /// Scope depth of the context that made the binding.
    depth: usize,
}

/// Owner of the texture-unit budget. Acts as the root context.
pub struct TextureUnitAllocator<B: TextureBinder> {
    binder: B,
    unit_count: u32,
    scopes: ScopeStack,
    /// Units currently in use, in unit order. `len()` is the bump cursor.
    bound: RefCell<Vec<Binding>>,
}

impl<B: TextureBinder> TextureUnitAllocator<B> {
    /// Creates an allocator for `unit_count` hardware units.
    #[must_use]
    pub fn new(unit_count: u32, binder: B) -> Self {
        log::debug!("Texture unit allocator created with {unit_count} units");
        Self {
            binder,
            unit_count,
            scopes: ScopeStack::new("texture-units"),
            bound: RefCell::new(Vec::with_capacity(
                unit_count.min(INITIAL_UNIT_CAPACITY) as usize,
            )),
        }
    }

    /// Creates an allocator sized from the limits reported by the adapter.
    pub fn from_limits(
        limits: &wgpu::Limits,
        settings: &AllocatorSettings,
        binder: B,
    ) -> Result<Self> {
        let unit_count = settings.unit_count(limits)?;
        Ok(Self::new(unit_count, binder))
    }

    #[inline]
    #[must_use]
    pub fn unit_count(&self) -> u32 {
        self.unit_count
    }

    /// Returns `true` if `count` simultaneous bindings fit the hardware.
    #[inline]
    #[must_use]
    pub fn has_enough_units(&self, count: u32) -> bool {
        count <= self.unit_count
    }

    #[inline]
    pub fn binder(&self) -> &B {
        &self.binder
    }

    /// Opens a top-level context.
    #[track_caller]
    pub fn with_context<'s, R>(&'s self, f: impl FnOnce(&TextureUnitContext<'s, B>) -> R) -> R {
        self.root().with_context(f)
    }

    /// Units bound directly by the root. Always 0: the root only opens
    /// contexts.
    #[must_use]
    pub fn texture_count_for_context(&self) -> u32 {
        self.root().texture_count_for_context()
    }

    /// Units bound by every currently-open context.
    #[must_use]
    pub fn texture_count_total(&self) -> u32 {
        self.cursor()
    }

    /// Units currently bound, in unit order.
    #[must_use]
    pub fn bound_units(&self) -> Vec<(TextureUnit, TextureKind)> {
        self.bound
            .borrow()
            .iter()
            .enumerate()
            .map(|(i, b)| (TextureUnit::new(i as u32), b.kind))
            .collect()
    }

    fn root(&self) -> TextureUnitContext<'_, B> {
        TextureUnitContext {
            allocator: self,
            scope: self.scopes.root(),
            start: 0,
        }
    }

    fn cursor(&self) -> u32 {
        self.bound.borrow().len() as u32
    }
}

/// Capability to bind textures, valid for one `with_context` callback.
pub struct TextureUnitContext<'a, B: TextureBinder> {
    allocator: &'a TextureUnitAllocator<B>,
    scope: ScopeToken,
    /// Cursor at the moment this context opened.
    start: u32,
}

impl<B: TextureBinder> Clone for TextureUnitContext<'_, B> {
    fn clone(&self) -> Self {
        Self {
            allocator: self.allocator,
            scope: self.scope.clone(),
            start: self.start,
        }
    }
}

impl<'a, B: TextureBinder> TextureUnitContext<'a, B> {
    /// Binds a 2D texture to the next free unit.
    #[track_caller]
    pub fn with_texture_2d(&self, texture: &B::Texture2D) -> Result<TextureUnit> {
        let unit = self.allocate(TextureKind::Texture2D, "with_texture_2d")?;
        self.allocator.binder.bind_texture_2d(unit, texture);
        Ok(unit)
    }

    /// Binds a cube texture to the next free unit.
    #[track_caller]
    pub fn with_texture_cube(&self, texture: &B::TextureCube) -> Result<TextureUnit> {
        let unit = self.allocate(TextureKind::TextureCube, "with_texture_cube")?;
        self.allocator.binder.bind_texture_cube(unit, texture);
        Ok(unit)
    }

    /// Opens a child context. Everything the child binds is reclaimed when
    /// `f` returns.
    #[track_caller]
    pub fn with_context<R>(&self, f: impl FnOnce(&TextureUnitContext<'a, B>) -> R) -> R {
        self.scope.enter("with_context", |scope| {
            let start = self.allocator.cursor();
            let _savepoint = Savepoint {
                bound: &self.allocator.bound,
                start,
            };
            let child = TextureUnitContext {
                allocator: self.allocator,
                scope,
                start,
            };
            f(&child)
        })
    }

    /// Units bound by this context itself.
    #[track_caller]
    #[must_use]
    pub fn texture_count_for_context(&self) -> u32 {
        self.scope.check_alive("texture_count_for_context");
        let depth = self.scope.depth();
        self.allocator.bound.borrow()[self.start as usize..]
            .iter()
            .filter(|b| b.depth == depth)
            .count() as u32
    }

    /// Units bound by this context, its ancestors and any open descendants.
    #[track_caller]
    #[must_use]
    pub fn texture_count_total(&self) -> u32 {
        self.scope.check_alive("texture_count_total");
        self.allocator.cursor()
    }

    /// See [`TextureUnitAllocator::has_enough_units`].
    #[track_caller]
    #[must_use]
    pub fn has_enough_units(&self, count: u32) -> bool {
        self.scope.check_alive("has_enough_units");
        self.allocator.has_enough_units(count)
    }

    /// Returns `true` while the issuing `with_context` call is running.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.scope.is_active()
    }

    #[track_caller]
    fn allocate(&self, kind: TextureKind, operation: &'static str) -> Result<TextureUnit> {
        self.scope.check_innermost(operation);

        let mut bound = self.allocator.bound.borrow_mut();
        let index = bound.len() as u32;
        if index >= self.allocator.unit_count {
            log::warn!(
                "Texture unit budget exhausted: {} units in use, bind of {kind:?} rejected",
                self.allocator.unit_count
            );
            return Err(UmbraError::TextureUnitsExhausted {
                requested: index + 1,
                available: self.allocator.unit_count,
            });
        }

        bound.push(Binding {
            kind,
            depth: self.scope.depth(),
        });
        log::trace!("Bound {kind:?} to unit {index} at depth {}", self.scope.depth());
        Ok(TextureUnit::new(index))
    }
}

/// Restores the bump cursor when a context closes.
struct Savepoint<'a> {
    bound: &'a RefCell<Vec<Binding>>,
    start: u32,
}

impl Drop for Savepoint<'_> {
    fn drop(&mut self) {
        self.bound.borrow_mut().truncate(self.start as usize);
    }
}
