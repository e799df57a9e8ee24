//! QR decomposition via Householder reflections.
//!
//! Decomposes a matrix `A` (m x n, m >= n) into `A = QR` where:
//! - `Q` is m x n with orthonormal columns (the economy-size factor)
//! - `R` is n x n upper triangular
//!
//! The decomposition always exists, even for rank-deficient input, so
//! building one never fails on shape grounds. Rank deficiency only shows up
//! through [`QrDecomposition::is_full_rank`] or a failed
//! [`QrDecomposition::solve`].

use crate::error::{CoreError, Result};
use crate::matrix::{DenseMatrix, Matrix, MatrixMut};

/// Result of a QR decomposition via Householder reflections.
///
/// Stores the factorization `A = QR` in compact form. `Q`, `R` and the
/// Householder vectors are rebuilt from it on every accessor call.
#[derive(Debug, Clone)]
pub struct QrDecomposition {
    /// Working matrix: the strict upper triangle holds R, the lower
    /// trapezoid (diagonal included) holds the Householder vectors.
    qr: DenseMatrix,
    /// Diagonal of R stored separately (the Householder vectors overwrite
    /// the diagonal of the working matrix).
    r_diag: Vec<f64>,
    /// Number of rows.
    m: usize,
    /// Number of columns.
    n: usize,
}

#[allow(clippy::many_single_char_names)]
impl QrDecomposition {
    /// Perform the QR decomposition of `a` (m x n, usually m >= n).
    ///
    /// Only fails if the working copy of `a` cannot be allocated. Wide input
    /// (m < n) is accepted; columns past the m-th are reported as rank
    /// deficient.
    ///
    /// ```
    /// # use linmat_core::{DenseMatrix, Matrix};
    /// # use linmat_core::linalg::{QrDecomposition, mul_ikj};
    /// let a = DenseMatrix::from_vec(3, 2, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    /// let qr = QrDecomposition::decompose(&a).unwrap();
    /// let q = qr.q().unwrap();
    /// // Q^T Q ≈ I
    /// let qtq = mul_ikj(&q.t(), &q).unwrap();
    /// let eye = DenseMatrix::identity(2).unwrap();
    /// assert!(linmat_core::matrix::approx_eq(&qtq, &eye, 1e-10));
    /// ```
    pub fn decompose<A: Matrix + ?Sized>(a: &A) -> Result<Self> {
        let (m, n) = a.shape();
        if m < n {
            log::warn!(
                target: "linmat_perf",
                "QR of a wide ({m}, {n}) matrix; it cannot have full column rank"
            );
        }

        let mut qr = a.to_dense()?;
        let mut r_diag = vec![0.0; n];

        for k in 0..n.min(m) {
            // 2-norm of the k-th column below the diagonal, without
            // under/overflow.
            let mut nrm = 0.0_f64;
            for i in k..m {
                nrm = nrm.hypot(qr.at(i, k));
            }

            if nrm != 0.0 {
                // Form the k-th Householder vector. Taking the sign of the
                // diagonal keeps `qr[k][k] + 1` away from cancellation.
                if qr.at(k, k) < 0.0 {
                    nrm = -nrm;
                }
                for i in k..m {
                    *qr.at_mut(i, k) /= nrm;
                }
                *qr.at_mut(k, k) += 1.0;

                // Apply the reflection to the remaining columns.
                for j in (k + 1)..n {
                    let mut s = 0.0;
                    for i in k..m {
                        s += qr.at(i, k) * qr.at(i, j);
                    }
                    s = -s / qr.at(k, k);
                    for i in k..m {
                        let v = qr.at(i, k);
                        *qr.at_mut(i, j) += s * v;
                    }
                }
            }
            r_diag[k] = -nrm;
        }

        Ok(Self { qr, r_diag, m, n })
    }

    /// `(rows, cols)` of the decomposed matrix.
    pub fn shape(&self) -> (usize, usize) {
        (self.m, self.n)
    }

    /// Whether no diagonal entry of R is exactly zero.
    ///
    /// Only exact zeros count. A column that is a linear combination of
    /// earlier ones usually leaves a diagonal entry of rounding size
    /// (around `1e-16` times the column norm) rather than zero, and is then
    /// reported as full rank; inspect [`r_diag`](Self::r_diag) against a
    /// tolerance of your own when that matters.
    pub fn is_full_rank(&self) -> bool {
        self.r_diag.iter().all(|&d| d != 0.0)
    }

    /// Number of diagonal entries of R that are not exactly zero.
    pub fn rank(&self) -> usize {
        self.r_diag.iter().filter(|&&d| d != 0.0).count()
    }

    /// Diagonal of R.
    pub fn r_diag(&self) -> &[f64] {
        &self.r_diag
    }

    /// Copy of the packed working matrix (R above the diagonal, Householder
    /// vectors on and below it).
    pub fn packed(&self) -> Result<DenseMatrix> {
        self.qr.to_dense()
    }

    /// The Householder vectors as an m x n lower trapezoidal matrix.
    pub fn h(&self) -> Result<DenseMatrix> {
        DenseMatrix::from_fn(self.m, self.n, |i, j| {
            if i >= j { self.qr.at(i, j) } else { 0.0 }
        })
    }

    /// The upper triangular factor R (n x n).
    pub fn r(&self) -> Result<DenseMatrix> {
        DenseMatrix::from_fn(self.n, self.n, |i, j| {
            if i == j {
                self.r_diag[i]
            } else if i < j && i < self.m {
                self.qr.at(i, j)
            } else {
                0.0
            }
        })
    }

    /// The economy-size orthogonal factor Q (m x n).
    ///
    /// Built by applying the stored reflections, last to first, to the
    /// columns of the identity; no m x m reflector is ever formed.
    pub fn q(&self) -> Result<DenseMatrix> {
        let (m, n) = (self.m, self.n);
        let mut q = DenseMatrix::zeros(m, n)?;
        for k in (0..n.min(m)).rev() {
            *q.at_mut(k, k) = 1.0;
            let vkk = self.qr.at(k, k);
            if vkk == 0.0 {
                continue;
            }
            for j in k..n {
                let mut s = 0.0;
                for i in k..m {
                    s += self.qr.at(i, k) * q.at(i, j);
                }
                s = -s / vkk;
                for i in k..m {
                    *q.at_mut(i, j) += s * self.qr.at(i, k);
                }
            }
        }
        Ok(q)
    }

    /// Least-squares solution of `A X = B`.
    ///
    /// Returns the n x nx matrix `X` minimizing `||A X - B||_2` column by
    /// column.
    ///
    /// # Errors
    ///
    /// - [`CoreError::DimensionMismatch`] if `b.rows() != m`.
    /// - [`CoreError::RankDeficient`] if the decomposition is not full rank.
    ///
    /// ```
    /// # use linmat_core::{DenseMatrix, Matrix};
    /// # use linmat_core::linalg::QrDecomposition;
    /// // 2x + y = 5, x + 4y = 6  =>  x = 2, y = 1
    /// let a = DenseMatrix::from_vec(2, 2, vec![2.0, 1.0, 1.0, 4.0]).unwrap();
    /// let b = DenseMatrix::column(vec![5.0, 6.0]).unwrap();
    /// let x = QrDecomposition::decompose(&a).unwrap().solve(&b).unwrap();
    /// assert!((x.at(0, 0) - 2.0).abs() < 1e-10);
    /// assert!((x.at(1, 0) - 1.0).abs() < 1e-10);
    /// ```
    pub fn solve<B: Matrix + ?Sized>(&self, b: &B) -> Result<DenseMatrix> {
        if b.rows() != self.m {
            return Err(CoreError::DimensionMismatch {
                expected: (self.m, b.cols()),
                got: b.shape(),
            });
        }
        if !self.is_full_rank() {
            return Err(CoreError::RankDeficient);
        }

        let (m, n) = (self.m, self.n);
        let nx = b.cols();
        let mut x = b.to_dense()?;

        // Y = Q^T B
        for k in 0..n {
            let vkk = self.qr.at(k, k);
            for j in 0..nx {
                let mut s = 0.0;
                for i in k..m {
                    s += self.qr.at(i, k) * x.at(i, j);
                }
                s = -s / vkk;
                for i in k..m {
                    *x.at_mut(i, j) += s * self.qr.at(i, k);
                }
            }
        }

        // R X = Y
        for k in (0..n).rev() {
            for j in 0..nx {
                *x.at_mut(k, j) /= self.r_diag[k];
            }
            for i in 0..k {
                let rik = self.qr.at(i, k);
                for j in 0..nx {
                    let xkj = x.at(k, j);
                    *x.at_mut(i, j) -= xkj * rik;
                }
            }
        }

        x.block(0..n, 0..nx)?.to_dense()
    }
}

/// Solve the least-squares problem `min ||A X - B||_2` via QR decomposition.
///
/// ```
/// # use linmat_core::{DenseMatrix, Matrix};
/// # use linmat_core::linalg::lstsq;
/// // Fit y = c0 + c1 x through (1, 6), (2, 5), (3, 7).
/// let a = DenseMatrix::from_vec(3, 2, vec![1.0, 1.0, 1.0, 2.0, 1.0, 3.0]).unwrap();
/// let b = DenseMatrix::column(vec![6.0, 5.0, 7.0]).unwrap();
/// let x = lstsq(&a, &b).unwrap();
/// assert_eq!(x.shape(), (2, 1));
/// ```
pub fn lstsq<A, B>(a: &A, b: &B) -> Result<DenseMatrix>
where
    A: Matrix + ?Sized,
    B: Matrix + ?Sized,
{
    QrDecomposition::decompose(a)?.solve(b)
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::linalg::mul_ikj;
    use crate::matrix::{approx_eq, max_abs_diff};

    fn mat(rows: usize, cols: usize, data: &[f64]) -> DenseMatrix {
        DenseMatrix::from_vec(rows, cols, data.to_vec()).unwrap()
    }

    fn assert_factors(a: &DenseMatrix, tol: f64) {
        let qr = QrDecomposition::decompose(a).unwrap();
        let q = qr.q().unwrap();
        let r = qr.r().unwrap();
        assert_eq!(q.shape(), a.shape());
        assert_eq!(r.shape(), (a.cols(), a.cols()));

        // A = QR
        let qr_prod = mul_ikj(&q, &r).unwrap();
        assert!(approx_eq(&qr_prod, a, tol), "QR != A:\n{qr_prod}");

        // Q^T Q = I
        let qtq = mul_ikj(&q.t(), &q).unwrap();
        let eye = DenseMatrix::identity(a.cols()).unwrap();
        assert!(approx_eq(&qtq, &eye, tol), "Q^T Q != I:\n{qtq}");
    }

    #[test]
    fn test_qr_3x3() {
        let a = mat(3, 3, &[12.0, -51.0, 4.0, 6.0, 167.0, -68.0, -4.0, 24.0, -41.0]);
        assert_factors(&a, 1e-10);
        // |R| diagonal of the classic example is (14, 175, 35).
        let qr = QrDecomposition::decompose(&a).unwrap();
        let d: Vec<f64> = qr.r_diag().iter().map(|x| x.abs()).collect();
        assert!((d[0] - 14.0).abs() < 1e-10);
        assert!((d[1] - 175.0).abs() < 1e-10);
        assert!((d[2] - 35.0).abs() < 1e-10);
    }

    #[test]
    fn test_qr_identity() {
        let eye = DenseMatrix::identity(4).unwrap();
        assert_factors(&eye, 1e-14);
    }

    #[test]
    fn test_qr_tall_matrix() {
        let a = mat(4, 2, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        assert_factors(&a, 1e-10);
    }

    #[test]
    fn test_r_diag_sign_opposes_diagonal() {
        let a = mat(2, 2, &[3.0, 1.0, 4.0, 2.0]);
        let qr = QrDecomposition::decompose(&a).unwrap();
        assert!((qr.r_diag()[0] + 5.0).abs() < 1e-14);
        let a = mat(2, 2, &[-3.0, 1.0, 4.0, 2.0]);
        let qr = QrDecomposition::decompose(&a).unwrap();
        assert!((qr.r_diag()[0] - 5.0).abs() < 1e-14);
    }

    #[test]
    fn test_triangular_shapes() {
        let a = mat(4, 3, &[2.0, 1.0, 0.0, 1.0, 3.0, 1.0, 0.0, 1.0, 4.0, 1.0, 0.0, 1.0]);
        let qr = QrDecomposition::decompose(&a).unwrap();
        let h = qr.h().unwrap();
        let r = qr.r().unwrap();
        assert_eq!(h.shape(), (4, 3));
        for i in 0..4 {
            for j in 0..3 {
                if j > i {
                    assert_eq!(h.at(i, j), 0.0);
                }
                if i < 3 && i > j {
                    assert_eq!(r.at(i, j), 0.0);
                }
            }
        }
    }

    #[test]
    fn test_packed_matches_parts() {
        let a = mat(3, 2, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let qr = QrDecomposition::decompose(&a).unwrap();
        let packed = qr.packed().unwrap();
        let h = qr.h().unwrap();
        let r = qr.r().unwrap();
        assert_eq!(packed.at(0, 1), r.at(0, 1));
        assert_eq!(packed.at(1, 1), h.at(1, 1));
        assert_eq!(packed.at(2, 0), h.at(2, 0));
    }

    #[test]
    fn test_accessors_recompute() {
        let a = mat(3, 2, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let qr = QrDecomposition::decompose(&a).unwrap();
        let mut q1 = qr.q().unwrap();
        q1.fill(0.0);
        // Mutating a returned factor does not affect later calls.
        let q2 = qr.q().unwrap();
        assert!(max_abs_diff(&q1, &q2).unwrap() > 0.1);
    }

    #[test]
    fn test_qr_solve_square() {
        let a = mat(2, 2, &[2.0, 1.0, 1.0, 4.0]);
        let b = mat(2, 1, &[5.0, 6.0]);
        let x = QrDecomposition::decompose(&a).unwrap().solve(&b).unwrap();
        assert!(approx_eq(&x, &mat(2, 1, &[2.0, 1.0]), 1e-10));
    }

    #[test]
    fn test_qr_solve_3x3() {
        // >>> A = np.array([[1,2,3],[4,5,6],[7,8,10]])
        // >>> b = np.array([1,2,3])
        // >>> np.linalg.solve(A, b)
        // array([-0.33333333,  0.66666667,  0.        ])
        let a = mat(3, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 10.0]);
        let b = mat(3, 1, &[1.0, 2.0, 3.0]);
        let x = lstsq(&a, &b).unwrap();
        assert!(approx_eq(&x, &mat(3, 1, &[-1.0 / 3.0, 2.0 / 3.0, 0.0]), 1e-10));
    }

    #[test]
    fn test_solve_multiple_right_hand_sides() {
        let a = mat(3, 3, &[4.0, 1.0, 0.0, 1.0, 3.0, 1.0, 0.0, 1.0, 2.0]);
        let b = DenseMatrix::identity(3).unwrap();
        // A X = I, so X is the inverse and A X reproduces I.
        let x = lstsq(&a, &b).unwrap();
        assert_eq!(x.shape(), (3, 3));
        assert!(approx_eq(&mul_ikj(&a, &x).unwrap(), &b, 1e-12));
    }

    #[test]
    fn test_lstsq_overdetermined() {
        // Fit y = a + b*x to (1,6), (2,5), (3,7); normal equations give [5, 0.5].
        let a = mat(3, 2, &[1.0, 1.0, 1.0, 2.0, 1.0, 3.0]);
        let b = mat(3, 1, &[6.0, 5.0, 7.0]);
        let x = lstsq(&a, &b).unwrap();
        assert!(approx_eq(&x, &mat(2, 1, &[5.0, 0.5]), 1e-10));
    }

    #[test]
    fn test_lstsq_4x3() {
        // Normal equations solution: x = [2.0, -0.5, 0.5]
        let a = mat(
            4,
            3,
            &[1.0, 1.0, 1.0, 1.0, 2.0, 4.0, 1.0, 3.0, 9.0, 1.0, 4.0, 16.0],
        );
        let b = mat(4, 1, &[2.0, 3.0, 5.0, 8.0]);
        let x = lstsq(&a, &b).unwrap();
        assert!(approx_eq(&x, &mat(3, 1, &[2.0, -0.5, 0.5]), 1e-10));
    }

    #[test]
    fn test_qr_not_full_rank() {
        let a = mat(3, 2, &[1.0, 2.0, 2.0, 4.0, 3.0, 6.0]);
        let qr = QrDecomposition::decompose(&a).unwrap();
        assert!(!qr.is_full_rank());
        assert_eq!(qr.rank(), 1);
        assert_eq!(qr.r_diag()[1], 0.0);
    }

    #[test]
    fn test_rank_counts_only_exact_zeros() {
        // Third column = first + 0.1 * second: dependent, but rounding
        // leaves a tiny r_diag[2].
        let a = DenseMatrix::from_fn(6, 3, |i, j| {
            let (x, y) = ((i + 1) as f64 * 0.3, ((i * i) % 5) as f64 * 0.7);
            match j {
                0 => x,
                1 => y,
                _ => x + 0.1 * y,
            }
        })
        .unwrap();
        let qr = QrDecomposition::decompose(&a).unwrap();
        let d = qr.r_diag();
        assert!(d[2].abs() < 1e-12 * d[0].abs());
        assert_eq!(qr.is_full_rank(), d[2] != 0.0);
        assert_eq!(qr.rank(), d.iter().filter(|&&x| x != 0.0).count());
    }

    #[test]
    fn test_qr_solve_not_full_rank() {
        let a = mat(3, 2, &[1.0, 1.0, 2.0, 2.0, 3.0, 3.0]);
        let b = mat(3, 1, &[1.0, 2.0, 3.0]);
        let qr = QrDecomposition::decompose(&a).unwrap();
        assert_eq!(qr.solve(&b).unwrap_err(), CoreError::RankDeficient);
    }

    #[test]
    fn test_qr_solve_dimension_mismatch() {
        let a = DenseMatrix::identity(2).unwrap();
        let b = mat(3, 1, &[1.0, 2.0, 3.0]);
        let qr = QrDecomposition::decompose(&a).unwrap();
        assert!(matches!(
            qr.solve(&b),
            Err(CoreError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_dimension_checked_before_rank() {
        let a = mat(2, 2, &[1.0, 1.0, 1.0, 1.0]);
        let b = mat(3, 1, &[1.0, 2.0, 3.0]);
        let qr = QrDecomposition::decompose(&a).unwrap();
        assert!(matches!(
            qr.solve(&b),
            Err(CoreError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_qr_wide_matrix_is_accepted() {
        let a = mat(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let qr = QrDecomposition::decompose(&a).unwrap();
        assert!(!qr.is_full_rank());
        assert_eq!(qr.rank(), 2);
        assert_eq!(qr.q().unwrap().shape(), (2, 3));
        assert_eq!(qr.r().unwrap().shape(), (3, 3));
        assert_eq!(qr.h().unwrap().shape(), (2, 3));
        // The first two columns are still reproduced.
        let qr_prod = mul_ikj(&qr.q().unwrap(), &qr.r().unwrap()).unwrap();
        let lhs = qr_prod.range_cols(0, 2).unwrap();
        let rhs = a.range_cols(0, 2).unwrap();
        assert!(approx_eq(&lhs, &rhs, 1e-12));
        assert_eq!(
            qr.solve(&mat(2, 1, &[1.0, 1.0])).unwrap_err(),
            CoreError::RankDeficient
        );
    }

    #[test]
    fn test_decompose_view() {
        let big = mat(3, 3, &[1.0, 2.0, 0.0, 3.0, 4.0, 0.0, 5.0, 6.0, 0.0]);
        let a = big.range_cols(0, 2).unwrap();
        assert_factors(&a.to_dense().unwrap(), 1e-10);
        let qr = QrDecomposition::decompose(&a).unwrap();
        assert!(qr.is_full_rank());
        // A transposed view decomposes like its materialized transpose.
        let t = QrDecomposition::decompose(&big.t()).unwrap();
        let t_dense = QrDecomposition::decompose(&big.t().to_dense().unwrap()).unwrap();
        assert_eq!(t.r_diag(), t_dense.r_diag());
    }
}
