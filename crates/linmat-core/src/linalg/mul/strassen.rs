//! Strassen divide-and-conquer multiplication.
//!
//! Both operands are zero-padded to a common square edge that is a power of
//! two, multiplied recursively on quadrant views, and the product is trimmed
//! back to `a.rows() x b.cols()`. Only this square-pad-then-trim scheme is
//! supported; there is no rectangular Strassen.
//!
//! Strassen trades one of eight block products for eighteen block
//! additions. The extra additions and subtractions cancel more, so results
//! typically differ from [`mul_ikj`] by a few more ulps per level of
//! recursion. That is the accuracy cost of the O(n^2.807) operation count.

use crate::error::{CoreError, Result};
use crate::matrix::{DenseMatrix, Matrix, MatrixMut, RangeView, add, sub};
use crate::parallel::{self, Parallelism};

use super::{StrassenConfig, check_mul_shapes, mul_ikj};

/// A shareable, type-erased operand. Quadrant views of quadrant views would
/// otherwise produce a new type at every recursion level.
type Operand<'a> = &'a (dyn Matrix + Sync + 'a);

/// `a * b` via Strassen's algorithm.
///
/// Returns [`CoreError::InvalidArgument`] if `config.leaf_size` is zero.
///
/// ```
/// # use linmat_core::{DenseMatrix, Matrix};
/// # use linmat_core::linalg::{StrassenConfig, mul_ikj, mul_strassen};
/// let a = DenseMatrix::from_fn(3, 3, |i, j| (i * 3 + j) as f64).unwrap();
/// let config = StrassenConfig::default().with_leaf_size(1);
/// let c = mul_strassen(&a, &a, config).unwrap();
/// let expected = mul_ikj(&a, &a).unwrap();
/// assert!(linmat_core::matrix::approx_eq(&c, &expected, 1e-9));
/// ```
pub fn mul_strassen<A, B>(a: &A, b: &B, config: StrassenConfig) -> Result<DenseMatrix>
where
    A: Matrix + Sync + ?Sized,
    B: Matrix + Sync + ?Sized,
{
    check_mul_shapes(a, b)?;
    if config.leaf_size == 0 {
        return Err(CoreError::InvalidArgument {
            reason: "Strassen leaf size must be at least 1",
        });
    }

    let needed = a.rows().max(a.cols()).max(b.cols());
    if needed == 0 || a.cols() == 0 {
        return DenseMatrix::zeros(a.rows(), b.cols());
    }
    let edge = needed.next_power_of_two();
    log::debug!(
        "strassen: ({}, {}) x ({}, {}) padded to edge {edge}",
        a.rows(),
        a.cols(),
        b.rows(),
        b.cols()
    );
    if edge > needed + needed / 2 {
        log::warn!(
            target: "linmat_perf",
            "strassen pads edge {needed} to {edge}; the naive or parallel kernel is likely faster"
        );
    }

    let a_pad = pad(a, edge)?;
    let b_pad = pad(b, edge)?;
    let c_pad = recurse(&a_pad, &b_pad, config.leaf_size, config.parallelism)?;
    c_pad.block(0..a.rows(), 0..b.cols())?.to_dense()
}

/// Copy `m` into the top-left corner of an `edge x edge` zero matrix.
fn pad<M: Matrix + ?Sized>(m: &M, edge: usize) -> Result<DenseMatrix> {
    let mut out = DenseMatrix::zeros(edge, edge)?;
    out.block_mut(0..m.rows(), 0..m.cols())?.assign(m)?;
    Ok(out)
}

/// Multiply two square operands whose edge is a power of two.
fn recurse(
    a: Operand<'_>,
    b: Operand<'_>,
    leaf_size: usize,
    parallelism: Parallelism,
) -> Result<DenseMatrix> {
    let n = a.rows();
    if n <= leaf_size {
        return mul_ikj(a, b);
    }
    let h = n / 2;
    log::trace!("strassen level: edge {n}");

    let a11 = RangeView::new(a, 0..h, 0..h)?;
    let a12 = RangeView::new(a, 0..h, h..n)?;
    let a21 = RangeView::new(a, h..n, 0..h)?;
    let a22 = RangeView::new(a, h..n, h..n)?;
    let b11 = RangeView::new(b, 0..h, 0..h)?;
    let b12 = RangeView::new(b, 0..h, h..n)?;
    let b21 = RangeView::new(b, h..n, 0..h)?;
    let b22 = RangeView::new(b, h..n, h..n)?;

    // p1 = (a11 + a22)(b11 + b22)
    let p1 = |par| -> Result<DenseMatrix> {
        recurse(&add(&a11, &a22)?, &add(&b11, &b22)?, leaf_size, par)
    };
    // p2 = (a21 + a22) b11
    let p2 = |par| -> Result<DenseMatrix> {
        recurse(&add(&a21, &a22)?, &b11, leaf_size, par)
    };
    // p3 = a11 (b12 - b22)
    let p3 = |par| -> Result<DenseMatrix> {
        recurse(&a11, &sub(&b12, &b22)?, leaf_size, par)
    };
    // p4 = a22 (b21 - b11)
    let p4 = |par| -> Result<DenseMatrix> {
        recurse(&a22, &sub(&b21, &b11)?, leaf_size, par)
    };
    // p5 = (a11 + a12) b22
    let p5 = |par| -> Result<DenseMatrix> {
        recurse(&add(&a11, &a12)?, &b22, leaf_size, par)
    };
    // p6 = (a21 - a11)(b11 + b12)
    let p6 = |par| -> Result<DenseMatrix> {
        recurse(&sub(&a21, &a11)?, &add(&b11, &b12)?, leaf_size, par)
    };
    // p7 = (a12 - a22)(b21 + b22)
    let p7 = |par| -> Result<DenseMatrix> {
        recurse(&sub(&a12, &a22)?, &add(&b21, &b22)?, leaf_size, par)
    };

    let ((p1, p2), (p3, p4)) = parallel::join(
        |par| parallel::join(p1, p2, par),
        |par| parallel::join(p3, p4, par),
        parallelism,
    );
    let ((p5, p6), p7) = parallel::join(|par| parallel::join(p5, p6, par), p7, parallelism);
    let (p1, p2, p3, p4, p5, p6, p7) = (p1?, p2?, p3?, p4?, p5?, p6?, p7?);

    let mut c = DenseMatrix::zeros(n, n)?;
    for i in 0..h {
        for j in 0..h {
            let (v1, v2, v3, v4) = (p1.at(i, j), p2.at(i, j), p3.at(i, j), p4.at(i, j));
            let (v5, v6, v7) = (p5.at(i, j), p6.at(i, j), p7.at(i, j));
            *c.at_mut(i, j) = v1 + v4 - v5 + v7;
            *c.at_mut(i, j + h) = v3 + v5;
            *c.at_mut(i + h, j) = v2 + v4;
            *c.at_mut(i + h, j + h) = v1 + v3 - v2 + v6;
        }
    }
    Ok(c)
}
