//! Derived Matrix Contexts
//!
//! Scene traversal opens nested matrix scopes:
//!
//! ```text
//! MatrixContext
//! └── with_observer            MatricesObserver
//!     ├── with_instance        MatricesInstance
//!     ├── with_generic_transform
//!     │                        MatricesGenericTransform
//!     └── with_projective_light
//!                              MatricesProjectiveLight
//!         └── with_instance    MatricesInstanceWithProjective
//! ```
//!
//! Every token computes its matrices once on entry. Getters fault with
//! "use after scope" once the callback that received the token has returned,
//! and opening a second child beside an open one faults with "scope reentry".

/// Generates getters that check the token is still in scope before reading
/// a cached matrix.
macro_rules! checked_getters {
    ($ty:ident { $( $(#[$meta:meta])* $name:ident: $ret:ty => $($field:ident).+; )* }) => {
        impl $ty {
            $(
                $(#[$meta])*
                #[track_caller]
                #[must_use]
                pub fn $name(&self) -> $ret {
                    self.scope
                        .check_alive(concat!(stringify!($ty), "::", stringify!($name)));
                    self.$($field).+
                }
            )*
        }
    };
}

pub mod inputs;
pub mod instance;
pub mod observer;
pub mod projective;
mod values;

pub use inputs::{InstanceData, ProjectiveLight};
pub use instance::MatricesInstance;
pub use observer::{MatricesGenericTransform, MatricesObserver, MatrixContext};
pub use projective::{MatricesInstanceWithProjective, MatricesProjectiveLight};
