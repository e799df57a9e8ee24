//! Textbook triple-loop multiplication in two loop orders.

use crate::error::Result;
use crate::matrix::{DenseMatrix, Matrix, MatrixMut};

use super::check_mul_shapes;

/// `a * b` with the `i-j-k` loop order: each output cell is a full dot
/// product of a row of `a` and a column of `b`.
///
/// ```
/// # use linmat_core::{DenseMatrix, Matrix};
/// # use linmat_core::linalg::mul_ijk;
/// let a = DenseMatrix::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
/// let b = DenseMatrix::from_vec(3, 1, vec![1.0, 0.0, -1.0]).unwrap();
/// let c = mul_ijk(&a, &b).unwrap();
/// assert_eq!(c.as_slice(), &[-2.0, -2.0]);
/// ```
#[allow(clippy::many_single_char_names)]
pub fn mul_ijk<A, B>(a: &A, b: &B) -> Result<DenseMatrix>
where
    A: Matrix + ?Sized,
    B: Matrix + ?Sized,
{
    check_mul_shapes(a, b)?;
    let (m, k, n) = (a.rows(), a.cols(), b.cols());
    let mut c = DenseMatrix::zeros(m, n)?;
    for i in 0..m {
        for j in 0..n {
            let mut sum = 0.0;
            for p in 0..k {
                sum += a.at(i, p) * b.at(p, j);
            }
            *c.at_mut(i, j) = sum;
        }
    }
    Ok(c)
}

/// `a * b` with the `i-k-j` loop order: each `a[i][p]` is broadcast along
/// row `p` of `b` and accumulated into row `i` of the output, which walks
/// both `b` and the output row-wise.
#[allow(clippy::many_single_char_names)]
pub fn mul_ikj<A, B>(a: &A, b: &B) -> Result<DenseMatrix>
where
    A: Matrix + ?Sized,
    B: Matrix + ?Sized,
{
    check_mul_shapes(a, b)?;
    let (m, k, n) = (a.rows(), a.cols(), b.cols());
    let mut c = DenseMatrix::zeros(m, n)?;
    for i in 0..m {
        for p in 0..k {
            let aip = a.at(i, p);
            for j in 0..n {
                *c.at_mut(i, j) += aip * b.at(p, j);
            }
        }
    }
    Ok(c)
}
