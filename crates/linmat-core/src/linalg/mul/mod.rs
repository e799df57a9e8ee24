//! Matrix-matrix multiplication strategies.
//!
//! | Strategy                 | Function          | Threads | Cost         |
//! |--------------------------|-------------------|---------|--------------|
//! | naive, `i-j-k` order     | [`mul_ijk`]       | 1       | O(m·k·n)     |
//! | naive, `i-k-j` order     | [`mul_ikj`]       | 1       | O(m·k·n)     |
//! | row partition            | [`mul_parallel`]  | pool    | O(m·k·n)     |
//! | Strassen (pad to 2^p)    | [`mul_strassen`]  | 1 / pool| O(p^2.807)   |
//!
//! Every strategy checks `a.cols() == b.rows()` before touching any cell and
//! returns a new `a.rows() x b.cols()` [`DenseMatrix`]. [`multiply`] picks a
//! strategy from the operand sizes; [`multiply_with`] takes an explicit one.

mod naive;
mod rows;
mod strassen;

pub use naive::{mul_ijk, mul_ikj};
pub use rows::mul_parallel;
pub use strassen::mul_strassen;

use crate::error::{CoreError, Result};
use crate::matrix::{DenseMatrix, Matrix};
use crate::parallel::Parallelism;

/// Below this edge every operand is small enough for the naive kernel.
const NAIVE_MAX_EDGE: usize = 64;

/// Smallest edge at which Strassen is chosen for square-ish products.
const STRASSEN_MIN_EDGE: usize = 512;

/// Tuning for [`mul_strassen`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrassenConfig {
    /// Block edge at or below which the recursion switches to [`mul_ikj`].
    pub leaf_size: usize,
    /// Whether the seven sub-products of each level may run concurrently.
    pub parallelism: Parallelism,
}

impl StrassenConfig {
    pub const DEFAULT_LEAF_SIZE: usize = 256;

    #[must_use]
    pub fn with_leaf_size(mut self, leaf_size: usize) -> Self {
        self.leaf_size = leaf_size;
        self
    }

    #[must_use]
    pub fn with_parallelism(mut self, parallelism: Parallelism) -> Self {
        self.parallelism = parallelism;
        self
    }
}

impl Default for StrassenConfig {
    fn default() -> Self {
        Self {
            leaf_size: Self::DEFAULT_LEAF_SIZE,
            parallelism: Parallelism::None,
        }
    }
}

/// An explicit multiplication strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MulStrategy {
    NaiveIjk,
    NaiveIkj,
    Parallel(Parallelism),
    Strassen(StrassenConfig),
}

impl MulStrategy {
    /// Pick a strategy for an `(rows x inner) * (inner x cols)` product.
    ///
    /// - every edge below 64: naive `i-k-j`;
    /// - every edge at least 512 and no edge more than twice another:
    ///   Strassen, since padding to a power of two wastes little;
    /// - otherwise: row partition over the whole rayon pool.
    pub fn choose(rows: usize, inner: usize, cols: usize) -> Self {
        let largest = rows.max(inner).max(cols);
        let smallest = rows.min(inner).min(cols);
        if largest < NAIVE_MAX_EDGE {
            MulStrategy::NaiveIkj
        } else if smallest >= STRASSEN_MIN_EDGE && largest <= 2 * smallest {
            MulStrategy::Strassen(StrassenConfig::default())
        } else {
            MulStrategy::Parallel(Parallelism::Rayon(0))
        }
    }
}

/// Multiply with a strategy chosen by [`MulStrategy::choose`].
///
/// ```
/// # use linmat_core::{DenseMatrix, Matrix};
/// # use linmat_core::linalg::multiply;
/// let a = DenseMatrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
/// let b = DenseMatrix::from_vec(2, 2, vec![5.0, 6.0, 7.0, 8.0]).unwrap();
/// let c = multiply(&a, &b).unwrap();
/// assert_eq!(c.as_slice(), &[19.0, 22.0, 43.0, 50.0]);
/// ```
pub fn multiply<A, B>(a: &A, b: &B) -> Result<DenseMatrix>
where
    A: Matrix + Sync + ?Sized,
    B: Matrix + Sync + ?Sized,
{
    let strategy = MulStrategy::choose(a.rows(), a.cols(), b.cols());
    log::debug!(
        "multiply ({}, {}) x ({}, {}) with {strategy:?}",
        a.rows(),
        a.cols(),
        b.rows(),
        b.cols()
    );
    multiply_with(a, b, strategy)
}

/// Multiply with an explicit strategy.
pub fn multiply_with<A, B>(a: &A, b: &B, strategy: MulStrategy) -> Result<DenseMatrix>
where
    A: Matrix + Sync + ?Sized,
    B: Matrix + Sync + ?Sized,
{
    match strategy {
        MulStrategy::NaiveIjk => mul_ijk(a, b),
        MulStrategy::NaiveIkj => mul_ikj(a, b),
        MulStrategy::Parallel(parallelism) => mul_parallel(a, b, parallelism),
        MulStrategy::Strassen(config) => mul_strassen(a, b, config),
    }
}

/// Reject `a * b` unless `a.cols() == b.rows()`.
///
/// `b` is reported as the offending operand: `expected` is the
/// `(a.cols(), b.cols())` shape it must have to multiply `a`.
pub(crate) fn check_mul_shapes<A, B>(a: &A, b: &B) -> Result<()>
where
    A: Matrix + ?Sized,
    B: Matrix + ?Sized,
{
    if a.cols() != b.rows() {
        return Err(CoreError::DimensionMismatch {
            expected: (a.cols(), b.cols()),
            got: b.shape(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{approx_eq, max_abs_diff};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random(rows: usize, cols: usize, seed: u64) -> DenseMatrix {
        let mut rng = StdRng::seed_from_u64(seed);
        DenseMatrix::from_fn(rows, cols, |_, _| rng.random_range(-1.0..1.0)).unwrap()
    }

    fn all_strategies() -> Vec<MulStrategy> {
        vec![
            MulStrategy::NaiveIjk,
            MulStrategy::NaiveIkj,
            MulStrategy::Parallel(Parallelism::None),
            MulStrategy::Parallel(Parallelism::Rayon(3)),
            MulStrategy::Strassen(StrassenConfig::default().with_leaf_size(4)),
            MulStrategy::Strassen(
                StrassenConfig::default()
                    .with_leaf_size(2)
                    .with_parallelism(Parallelism::Rayon(0)),
            ),
        ]
    }

    #[test]
    fn test_choose() {
        assert_eq!(MulStrategy::choose(10, 10, 10), MulStrategy::NaiveIkj);
        assert_eq!(
            MulStrategy::choose(600, 700, 1000),
            MulStrategy::Strassen(StrassenConfig::default())
        );
        assert_eq!(
            MulStrategy::choose(600, 700, 1300),
            MulStrategy::Parallel(Parallelism::Rayon(0))
        );
        assert_eq!(
            MulStrategy::choose(1000, 3, 1000),
            MulStrategy::Parallel(Parallelism::Rayon(0))
        );
    }

    #[test]
    fn test_strategies_agree() {
        let a = random(13, 9, 1);
        let b = random(9, 11, 2);
        let reference = mul_ijk(&a, &b).unwrap();
        assert_eq!(reference.shape(), (13, 11));
        for s in all_strategies() {
            let c = multiply_with(&a, &b, s).unwrap();
            let tol = if matches!(s, MulStrategy::Strassen(_)) {
                1e-10
            } else {
                1e-12
            };
            let d = max_abs_diff(&c, &reference).unwrap();
            assert!(d <= tol, "{s:?} differs by {d}");
        }
    }

    #[test]
    fn test_identity_leaves_operand_unchanged() {
        let eye = DenseMatrix::identity(4).unwrap();
        let b = random(4, 4, 7);
        for s in all_strategies() {
            let c = multiply_with(&eye, &b, s).unwrap();
            assert!(approx_eq(&c, &b, 1e-13), "{s:?}");
        }
    }

    #[test]
    fn test_dimension_mismatch_for_every_strategy() {
        let a = random(3, 4, 3);
        let b = random(3, 4, 4);
        for s in all_strategies() {
            assert_eq!(
                multiply_with(&a, &b, s).unwrap_err(),
                CoreError::DimensionMismatch {
                    expected: (4, 4),
                    got: (3, 4),
                },
                "{s:?}"
            );
        }
    }

    #[test]
    fn test_mismatch_reports_a_usable_shape() {
        let a = random(2, 5, 10);
        let b = random(3, 4, 11);
        let Err(CoreError::DimensionMismatch { expected, got }) = multiply(&a, &b) else {
            panic!("expected a dimension mismatch");
        };
        assert_eq!(got, b.shape());
        assert_eq!(expected, (5, 4));
        // An operand of the reported shape is accepted.
        let fixed = random(expected.0, expected.1, 12);
        assert_eq!(multiply(&a, &fixed).unwrap().shape(), (2, 4));
    }

    #[test]
    fn test_multiply_views() {
        let a = random(5, 3, 5);
        // a * a^T through a zero-copy transpose view.
        let c = multiply(&a, &a.t()).unwrap();
        assert_eq!(c.shape(), (5, 5));
        for i in 0..5 {
            for j in 0..5 {
                assert!((c.at(i, j) - c.at(j, i)).abs() < 1e-14);
            }
        }
    }

    #[test]
    fn test_multiply_dispatch_large() {
        let a = random(70, 20, 8);
        let b = random(20, 30, 9);
        let c = multiply(&a, &b).unwrap();
        assert!(approx_eq(&c, &mul_ikj(&a, &b).unwrap(), 1e-12));
    }
}
