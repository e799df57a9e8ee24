//! Non-owning views: transpose and sub-range.
//!
//! A view stores the wrapped matrix (usually `&M` or `&mut M`) and an index
//! transform. Building one is O(1) and never copies cells. Reads through any
//! view are reads of the backing matrix; writes through a view over a
//! mutable borrow land in the backing matrix.

use core::ops::Range;

use crate::error::{CoreError, Result};

use super::{Matrix, MatrixMut};

// ======================================================================
// TransposeView
// ======================================================================

/// `(i, j)` of the view is `(j, i)` of the wrapped matrix.
#[derive(Debug, Clone, Copy)]
pub struct TransposeView<M> {
    inner: M,
}

impl<M: Matrix> TransposeView<M> {
    /// Wrap `inner` in a transpose view.
    #[inline]
    pub fn new(inner: M) -> Self {
        Self { inner }
    }

    /// The wrapped matrix. This is the transpose of the view, so
    /// `m.t().into_inner()` is `m` itself.
    #[inline]
    pub fn into_inner(self) -> M {
        self.inner
    }

    #[inline]
    pub fn inner(&self) -> &M {
        &self.inner
    }
}

impl<M: Matrix> Matrix for TransposeView<M> {
    #[inline]
    fn rows(&self) -> usize {
        self.inner.cols()
    }

    #[inline]
    fn cols(&self) -> usize {
        self.inner.rows()
    }

    #[inline]
    fn at(&self, i: usize, j: usize) -> f64 {
        self.inner.at(j, i)
    }
}

impl<M: MatrixMut> MatrixMut for TransposeView<M> {
    #[inline]
    fn at_mut(&mut self, i: usize, j: usize) -> &mut f64 {
        self.inner.at_mut(j, i)
    }
}

// ======================================================================
// RangeView
// ======================================================================

/// A rectangular window into the wrapped matrix.
///
/// `(i, j)` of the view is `(row_offset + i, col_offset + j)` of the wrapped
/// matrix. The window is validated against the wrapped matrix when the view
/// is built, so every in-bounds view index maps to an in-bounds cell.
#[derive(Debug, Clone, Copy)]
pub struct RangeView<M> {
    inner: M,
    row_offset: usize,
    col_offset: usize,
    rows: usize,
    cols: usize,
}

impl<M: Matrix> RangeView<M> {
    /// View rows `rows` and columns `cols` of `inner`.
    ///
    /// Returns [`CoreError::InvalidRange`] if either range is reversed or
    /// runs past the corresponding extent of `inner`.
    pub fn new(inner: M, rows: Range<usize>, cols: Range<usize>) -> Result<Self> {
        check_range(&rows, inner.rows())?;
        check_range(&cols, inner.cols())?;
        Ok(Self {
            inner,
            row_offset: rows.start,
            col_offset: cols.start,
            rows: rows.end - rows.start,
            cols: cols.end - cols.start,
        })
    }

    /// `(row_offset, col_offset)` into the wrapped matrix.
    #[inline]
    pub fn offset(&self) -> (usize, usize) {
        (self.row_offset, self.col_offset)
    }

    #[inline]
    pub fn inner(&self) -> &M {
        &self.inner
    }

    #[inline]
    pub fn into_inner(self) -> M {
        self.inner
    }
}

fn check_range(range: &Range<usize>, len: usize) -> Result<()> {
    if range.start > range.end || range.end > len {
        return Err(CoreError::InvalidRange {
            lo: range.start,
            hi: range.end,
            len,
        });
    }
    Ok(())
}

impl<M: Matrix> Matrix for RangeView<M> {
    #[inline]
    fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    fn at(&self, i: usize, j: usize) -> f64 {
        self.inner.at(self.row_offset + i, self.col_offset + j)
    }
}

impl<M: MatrixMut> MatrixMut for RangeView<M> {
    #[inline]
    fn at_mut(&mut self, i: usize, j: usize) -> &mut f64 {
        self.inner
            .at_mut(self.row_offset + i, self.col_offset + j)
    }
}
