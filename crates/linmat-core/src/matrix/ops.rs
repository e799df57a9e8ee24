//! Element-wise arithmetic over any [`Matrix`].
//!
//! The free functions validate shapes and return [`Result`]; the operator
//! impls on `&DenseMatrix` are shorthands that panic on mismatch.

use core::ops::{Add, Mul, Neg, Sub};

use crate::error::{CoreError, Result};

use super::{DenseMatrix, Matrix};

fn check_same_shape<A, B>(a: &A, b: &B) -> Result<()>
where
    A: Matrix + ?Sized,
    B: Matrix + ?Sized,
{
    if a.shape() != b.shape() {
        return Err(CoreError::DimensionMismatch {
            expected: a.shape(),
            got: b.shape(),
        });
    }
    Ok(())
}

/// `a + b` into a new matrix.
pub fn add<A, B>(a: &A, b: &B) -> Result<DenseMatrix>
where
    A: Matrix + ?Sized,
    B: Matrix + ?Sized,
{
    check_same_shape(a, b)?;
    DenseMatrix::from_fn(a.rows(), a.cols(), |i, j| a.at(i, j) + b.at(i, j))
}

/// `a - b` into a new matrix.
pub fn sub<A, B>(a: &A, b: &B) -> Result<DenseMatrix>
where
    A: Matrix + ?Sized,
    B: Matrix + ?Sized,
{
    check_same_shape(a, b)?;
    DenseMatrix::from_fn(a.rows(), a.cols(), |i, j| a.at(i, j) - b.at(i, j))
}

/// `alpha * a` into a new matrix.
pub fn scale<A: Matrix + ?Sized>(alpha: f64, a: &A) -> Result<DenseMatrix> {
    DenseMatrix::from_fn(a.rows(), a.cols(), |i, j| alpha * a.at(i, j))
}

/// Frobenius norm, accumulated with `hypot` so that neither very large nor
/// very small entries over/underflow.
pub fn norm_frobenius<A: Matrix + ?Sized>(a: &A) -> f64 {
    let mut norm = 0.0_f64;
    for i in 0..a.rows() {
        for j in 0..a.cols() {
            norm = norm.hypot(a.at(i, j));
        }
    }
    norm
}

/// Largest absolute element-wise difference.
pub fn max_abs_diff<A, B>(a: &A, b: &B) -> Result<f64>
where
    A: Matrix + ?Sized,
    B: Matrix + ?Sized,
{
    check_same_shape(a, b)?;
    let mut max = 0.0_f64;
    for i in 0..a.rows() {
        for j in 0..a.cols() {
            max = max.max((a.at(i, j) - b.at(i, j)).abs());
        }
    }
    Ok(max)
}

/// Same shape and every element within `tol`.
pub fn approx_eq<A, B>(a: &A, b: &B, tol: f64) -> bool
where
    A: Matrix + ?Sized,
    B: Matrix + ?Sized,
{
    max_abs_diff(a, b).is_ok_and(|d| d <= tol)
}

macro_rules! impl_dense_binop {
    ($trait:ident, $method:ident, $func:ident) => {
        impl $trait for &DenseMatrix {
            type Output = DenseMatrix;

            /// # Panics
            ///
            /// Panics if the shapes differ.
            fn $method(self, rhs: &DenseMatrix) -> DenseMatrix {
                match $func(self, rhs) {
                    Ok(m) => m,
                    Err(e) => panic!("element-wise {}: {e}", stringify!($method)),
                }
            }
        }
    };
}

impl_dense_binop!(Add, add, add);
impl_dense_binop!(Sub, sub, sub);

impl Mul<f64> for &DenseMatrix {
    type Output = DenseMatrix;

    fn mul(self, rhs: f64) -> DenseMatrix {
        let mut out = self.clone();
        out.apply(|x| x * rhs);
        out
    }
}

impl Neg for &DenseMatrix {
    type Output = DenseMatrix;

    fn neg(self) -> DenseMatrix {
        let mut out = self.clone();
        out.apply(|x| -x);
        out
    }
}
