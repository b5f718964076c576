//! Core types shared by every Umbra crate: the error taxonomy, the scope
//! primitive behind all capability tokens, and transform math.

pub mod errors;
pub mod scope;
pub mod transform;

pub use errors::{Result, ScopeFault, UmbraError};
pub use scope::{ScopeStack, ScopeToken};
pub use transform::{ModelTransform, normal_matrix, view_from_placement};
