//! Linear algebra operations.
//!
//! All kernels are implemented from scratch over the [`Matrix`] trait, so
//! owned matrices and zero-copy views are accepted alike. There are no
//! BLAS/LAPACK bindings.
//!
//! | Area           | Items                                              |
//! |----------------|----------------------------------------------------|
//! | multiplication | [`multiply`], [`multiply_with`], [`mul_strassen`]  |
//! | decomposition  | [`QrDecomposition`], [`lstsq`]                     |
//!
//! [`Matrix`]: crate::matrix::Matrix

pub mod decomp;
pub mod mul;

pub use decomp::{QrDecomposition, lstsq};
pub use mul::{
    MulStrategy, StrassenConfig, mul_ijk, mul_ikj, mul_parallel, mul_strassen, multiply,
    multiply_with,
};
