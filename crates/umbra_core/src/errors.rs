//! Error Types
//!
//! This module defines the error taxonomy used throughout the engine.
//!
//! # Overview
//!
//! Two disjoint classes of failure exist:
//!
//! - **Resource errors** ([`UmbraError`]): legitimate runtime conditions such as
//!   a scene requesting more simultaneous textures than the hardware provides.
//!   These are returned as [`Result`] and the caller may react to them
//!   (batch reduction, fallback shader, ...).
//! - **Scope faults** ([`ScopeFault`]): contract violations such as using a
//!   context outside its callback. These are raised as panics and are never
//!   returned through [`Result`].
//!
//! ```rust,ignore
//! use umbra_core::errors::{UmbraError, Result};
//!
//! fn bind_all(ctx: &TextureUnitContext<'_, B>) -> Result<()> {
//!     ctx.with_texture_2d(&albedo)?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// The main error type for the Umbra engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UmbraError {
    // ========================================================================
    // Resource Budget Errors
    // ========================================================================
    /// A bind would require more texture units than the hardware provides.
    #[error("Texture units exhausted: {requested} units requested, {available} available")]
    TextureUnitsExhausted {
        /// Units that would be in use after the rejected bind
        requested: u32,
        /// Hardware unit count of the allocator
        available: u32,
    },

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Allocator settings are inconsistent with the reported hardware limits.
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
}

impl UmbraError {
    /// Returns `true` for errors caused by exceeding a hardware budget.
    #[inline]
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        matches!(self, UmbraError::TextureUnitsExhausted { .. })
    }
}

/// Programmer-error faults raised by the scope discipline.
///
/// These values are only ever used as panic messages. A correct caller never
/// observes them.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeFault {
    /// A token was used after the callback that received it returned.
    #[error("use after scope: `{operation}` called on a retired context")]
    UseAfterScope {
        /// Name of the rejected operation
        operation: &'static str,
    },

    /// A token was used while one of its child scopes is still open.
    #[error("scope reentry: `{operation}` called on a context that already has an open child")]
    ScopeReentry {
        /// Name of the rejected operation
        operation: &'static str,
    },
}

impl ScopeFault {
    /// Raises the fault.
    #[track_caller]
    pub fn raise(self) -> ! {
        log::error!("{self}");
        panic!("{self}")
    }
}

/// Alias for `Result<T, UmbraError>`.
pub type Result<T> = std::result::Result<T, UmbraError>;
