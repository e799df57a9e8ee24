//! The matrix capability interface and its variants.
//!
//! Every matrix, owned or not, is used through two traits:
//!
//! - [`Matrix`]: shape queries, element reads and zero-copy views.
//! - [`MatrixMut`]: element writes (`set`, `increment`) and mutable views.
//!
//! Three variants implement them:
//!
//! | Type                | Owns data | Index transform             |
//! |---------------------|-----------|-----------------------------|
//! | [`DenseMatrix`]     | yes       | row- or column-major buffer |
//! | [`TransposeView`]   | no        | `(i, j) -> (j, i)`          |
//! | [`RangeView`]       | no        | `(i, j) -> (i + r0, j + c0)`|
//!
//! Views wrap any `M: Matrix`, including `&M`, `&mut M` and other views, so
//! they compose (`a.t().range_rows(1, 3)`) without copying. A view over
//! `&mut M` writes through to the backing storage; the borrow checker keeps
//! overlapping mutable views from coexisting.

mod create;
mod dense;
mod display;
mod ops;
mod view;

pub use create::TabularSource;
pub use dense::{DenseMatrix, Order};
pub use ops::{add, approx_eq, max_abs_diff, norm_frobenius, scale, sub};
pub use view::{RangeView, TransposeView};

use core::ops::Range;

use crate::error::{CoreError, Result};

/// Read access to a logical `rows x cols` grid of `f64` values.
pub trait Matrix {
    /// Number of logical rows.
    fn rows(&self) -> usize;

    /// Number of logical columns.
    fn cols(&self) -> usize;

    /// Read element `(i, j)` without validating the index against this
    /// matrix's logical shape.
    ///
    /// Kernels call this after checking shapes up front. An out-of-range
    /// index either panics in the backing buffer or, through a view, reads a
    /// cell outside the view; use [`get`](Self::get) for checked access.
    fn at(&self, i: usize, j: usize) -> f64;

    /// `(rows, cols)`.
    #[inline]
    fn shape(&self) -> (usize, usize) {
        (self.rows(), self.cols())
    }

    /// Whether the matrix has no cells.
    #[inline]
    fn is_empty(&self) -> bool {
        self.rows() == 0 || self.cols() == 0
    }

    /// Whether the matrix has as many rows as columns.
    #[inline]
    fn is_square(&self) -> bool {
        self.rows() == self.cols()
    }

    /// Validate `(i, j)` against the logical shape.
    fn check_index(&self, i: usize, j: usize) -> Result<()> {
        if i >= self.rows() || j >= self.cols() {
            return Err(CoreError::IndexOutOfBounds {
                index: (i, j),
                shape: self.shape(),
            });
        }
        Ok(())
    }

    /// Bounds-checked read of element `(i, j)`.
    fn get(&self, i: usize, j: usize) -> Result<f64> {
        self.check_index(i, j)?;
        Ok(self.at(i, j))
    }

    /// Copy of row `i`.
    fn row(&self, i: usize) -> Result<Vec<f64>> {
        if i >= self.rows() {
            return Err(CoreError::IndexOutOfBounds {
                index: (i, 0),
                shape: self.shape(),
            });
        }
        Ok((0..self.cols()).map(|j| self.at(i, j)).collect())
    }

    /// Copy of column `j`.
    fn col(&self, j: usize) -> Result<Vec<f64>> {
        if j >= self.cols() {
            return Err(CoreError::IndexOutOfBounds {
                index: (0, j),
                shape: self.shape(),
            });
        }
        Ok((0..self.rows()).map(|i| self.at(i, j)).collect())
    }

    /// Snapshot into owned row-major storage.
    fn to_dense(&self) -> Result<DenseMatrix> {
        DenseMatrix::from_fn(self.rows(), self.cols(), |i, j| self.at(i, j))
    }

    /// Zero-copy transpose view.
    fn t(&self) -> TransposeView<&Self>
    where
        Self: Sized,
    {
        TransposeView::new(self)
    }

    /// Zero-copy view of rows `lo..hi`.
    fn range_rows(&self, lo: usize, hi: usize) -> Result<RangeView<&Self>>
    where
        Self: Sized,
    {
        RangeView::new(self, lo..hi, 0..self.cols())
    }

    /// Zero-copy view of columns `lo..hi`.
    fn range_cols(&self, lo: usize, hi: usize) -> Result<RangeView<&Self>>
    where
        Self: Sized,
    {
        RangeView::new(self, 0..self.rows(), lo..hi)
    }

    /// Zero-copy view of the block `rows x cols`.
    fn block(&self, rows: Range<usize>, cols: Range<usize>) -> Result<RangeView<&Self>>
    where
        Self: Sized,
    {
        RangeView::new(self, rows, cols)
    }
}

/// Write access on top of [`Matrix`].
pub trait MatrixMut: Matrix {
    /// Mutable reference to element `(i, j)`, unchecked against the logical
    /// shape (see [`Matrix::at`]).
    fn at_mut(&mut self, i: usize, j: usize) -> &mut f64;

    /// Bounds-checked write of element `(i, j)`.
    fn set(&mut self, i: usize, j: usize, value: f64) -> Result<()> {
        self.check_index(i, j)?;
        *self.at_mut(i, j) = value;
        Ok(())
    }

    /// Bounds-checked `self[i][j] += delta`.
    fn increment(&mut self, i: usize, j: usize, delta: f64) -> Result<()> {
        self.check_index(i, j)?;
        *self.at_mut(i, j) += delta;
        Ok(())
    }

    /// Overwrite every cell with `value`.
    fn fill(&mut self, value: f64) {
        for i in 0..self.rows() {
            for j in 0..self.cols() {
                *self.at_mut(i, j) = value;
            }
        }
    }

    /// Copy every cell of `src` into `self`. Shapes must match.
    fn assign<S: Matrix + ?Sized>(&mut self, src: &S) -> Result<()>
    where
        Self: Sized,
    {
        if src.shape() != self.shape() {
            return Err(CoreError::DimensionMismatch {
                expected: self.shape(),
                got: src.shape(),
            });
        }
        for i in 0..self.rows() {
            for j in 0..self.cols() {
                *self.at_mut(i, j) = src.at(i, j);
            }
        }
        Ok(())
    }

    /// Mutable zero-copy transpose view.
    fn t_mut(&mut self) -> TransposeView<&mut Self>
    where
        Self: Sized,
    {
        TransposeView::new(self)
    }

    /// Mutable zero-copy view of rows `lo..hi`.
    fn range_rows_mut(&mut self, lo: usize, hi: usize) -> Result<RangeView<&mut Self>>
    where
        Self: Sized,
    {
        let cols = self.cols();
        RangeView::new(self, lo..hi, 0..cols)
    }

    /// Mutable zero-copy view of columns `lo..hi`.
    fn range_cols_mut(&mut self, lo: usize, hi: usize) -> Result<RangeView<&mut Self>>
    where
        Self: Sized,
    {
        let rows = self.rows();
        RangeView::new(self, 0..rows, lo..hi)
    }

    /// Mutable zero-copy view of the block `rows x cols`.
    fn block_mut(
        &mut self,
        rows: Range<usize>,
        cols: Range<usize>,
    ) -> Result<RangeView<&mut Self>>
    where
        Self: Sized,
    {
        RangeView::new(self, rows, cols)
    }
}

// ----------------------------------------------------------------------
// Borrowed matrices are matrices too, which is what lets views nest.
// ----------------------------------------------------------------------

impl<M: Matrix + ?Sized> Matrix for &M {
    #[inline]
    fn rows(&self) -> usize {
        (**self).rows()
    }

    #[inline]
    fn cols(&self) -> usize {
        (**self).cols()
    }

    #[inline]
    fn at(&self, i: usize, j: usize) -> f64 {
        (**self).at(i, j)
    }
}

impl<M: Matrix + ?Sized> Matrix for &mut M {
    #[inline]
    fn rows(&self) -> usize {
        (**self).rows()
    }

    #[inline]
    fn cols(&self) -> usize {
        (**self).cols()
    }

    #[inline]
    fn at(&self, i: usize, j: usize) -> f64 {
        (**self).at(i, j)
    }
}

impl<M: MatrixMut + ?Sized> MatrixMut for &mut M {
    #[inline]
    fn at_mut(&mut self, i: usize, j: usize) -> &mut f64 {
        (**self).at_mut(i, j)
    }
}
