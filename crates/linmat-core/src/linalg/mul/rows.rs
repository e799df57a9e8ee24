//! Data-parallel multiplication by partitioning output rows.

use rayon::prelude::*;

use crate::error::Result;
use crate::matrix::{DenseMatrix, Matrix};
use crate::parallel::Parallelism;

use super::check_mul_shapes;

/// `a * b` with the output rows split into contiguous blocks, one per part
/// of `parallelism`.
///
/// Both operands are only read, so they are shared across workers. Each
/// worker owns a disjoint `&mut` slice of the row-major output and needs no
/// synchronization. The call returns once every block is done.
///
/// ```
/// # use linmat_core::{DenseMatrix, Matrix, Parallelism};
/// # use linmat_core::linalg::mul_parallel;
/// let a = DenseMatrix::from_fn(4, 3, |i, j| (i + j) as f64).unwrap();
/// let b = DenseMatrix::identity(3).unwrap();
/// let c = mul_parallel(&a, &b, Parallelism::Rayon(2)).unwrap();
/// assert_eq!(c, a);
/// ```
#[allow(clippy::many_single_char_names)]
pub fn mul_parallel<A, B>(a: &A, b: &B, parallelism: Parallelism) -> Result<DenseMatrix>
where
    A: Matrix + Sync + ?Sized,
    B: Matrix + Sync + ?Sized,
{
    check_mul_shapes(a, b)?;
    let (m, k, n) = (a.rows(), a.cols(), b.cols());
    let mut c = DenseMatrix::zeros(m, n)?;
    if m == 0 || n == 0 {
        return Ok(c);
    }

    let parts = parallelism.degree().clamp(1, m);
    let rows_per_part = m.div_ceil(parts);
    log::trace!("row partition: {m} rows in blocks of {rows_per_part}");

    // `block` is the index of a `rows_per_part x n` slab of the output.
    let kernel = |(block, out): (usize, &mut [f64])| {
        let first_row = block * rows_per_part;
        for (r, row) in out.chunks_exact_mut(n).enumerate() {
            let i = first_row + r;
            for p in 0..k {
                let aip = a.at(i, p);
                for (j, cij) in row.iter_mut().enumerate() {
                    *cij += aip * b.at(p, j);
                }
            }
        }
    };

    let chunk = rows_per_part * n;
    match parallelism {
        Parallelism::None => c.as_mut_slice().chunks_mut(chunk).enumerate().for_each(kernel),
        Parallelism::Rayon(_) => c
            .as_mut_slice()
            .par_chunks_mut(chunk)
            .enumerate()
            .for_each(kernel),
    }
    Ok(c)
}
