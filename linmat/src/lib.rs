//! # linmat
//!
//! Dense matrix algebra in pure Rust: matrices and zero-copy views, naive,
//! parallel and Strassen multiplication, and Householder QR.
//!
//! ## Feature Flags
//!
//! | Feature | Enables |
//! |---------|---------|
//! | `core` *(default)* | Matrices, views, multiplication, QR |

#[cfg(feature = "core")]
pub use linmat_core as core;

/// Glob-import convenience: `use linmat::prelude::*;`
pub mod prelude {
    #[cfg(feature = "core")]
    pub use linmat_core::prelude::*;
}
