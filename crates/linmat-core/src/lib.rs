//! `linmat-core`: dense `f64` matrices, multiplication kernels and QR.
//!
//! Provides an owned [`DenseMatrix`], zero-copy [`TransposeView`] and
//! [`RangeView`] adapters, several multiplication strategies and a
//! Householder QR decomposition with least-squares solving.
//!
//! # Design
//!
//! - Every algorithm is written against the [`Matrix`] / [`MatrixMut`]
//!   traits; views and owned matrices are interchangeable.
//! - Views borrow their parent, so aliasing a mutable view with another
//!   live view is a compile error rather than a runtime hazard.
//! - Fallible operations return [`Result`]; nothing panics on bad shapes
//!   except the operator sugar on [`DenseMatrix`].
//! - Threads come from the ambient rayon pool and are requested through
//!   [`Parallelism`].
//!
//! ```
//! use linmat_core::prelude::*;
//!
//! let a = DenseMatrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
//! let c = multiply(&a, &a.t()).unwrap();
//! assert_eq!(c.as_slice(), &[5.0, 11.0, 11.0, 25.0]);
//! ```

pub mod error;
pub mod linalg;
pub mod matrix;
pub mod parallel;

// Re-export key types at crate root for convenience.
pub use error::{CoreError, Result};
pub use matrix::{
    DenseMatrix, Matrix, MatrixMut, Order, RangeView, TabularSource, TransposeView,
};
pub use parallel::Parallelism;

/// Items intended for glob-import: `use linmat_core::prelude::*;`
pub mod prelude {
    pub use crate::error::{CoreError, Result};
    pub use crate::linalg::{MulStrategy, QrDecomposition, StrassenConfig, lstsq, multiply};
    pub use crate::matrix::{DenseMatrix, Matrix, MatrixMut, Order, TabularSource};
    pub use crate::parallel::Parallelism;
}
