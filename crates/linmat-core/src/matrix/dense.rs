//! Owned, contiguous matrix storage.

use crate::error::{CoreError, Result};

use super::{Matrix, MatrixMut};

/// Memory layout of a [`DenseMatrix`] buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
    /// `(i, j)` lives at `i * cols + j`.
    #[default]
    RowMajor,
    /// `(i, j)` lives at `j * rows + i`.
    ColMajor,
}

/// A `rows x cols` matrix that owns its contiguous buffer.
///
/// This is the only matrix type that allocates. Cloning performs a deep copy;
/// views ([`TransposeView`](super::TransposeView),
/// [`RangeView`](super::RangeView)) borrow it instead.
#[derive(Debug, Clone)]
pub struct DenseMatrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
    order: Order,
}

impl DenseMatrix {
    /// Wrap `data` as a `rows x cols` matrix in the given storage order.
    ///
    /// Returns [`CoreError::InvalidShape`] if `data.len() != rows * cols`.
    pub fn from_vec_with_order(
        rows: usize,
        cols: usize,
        data: Vec<f64>,
        order: Order,
    ) -> Result<Self> {
        let numel = rows.checked_mul(cols).ok_or(CoreError::Allocation { rows, cols })?;
        if numel != data.len() {
            return Err(CoreError::InvalidShape {
                rows,
                cols,
                len: data.len(),
                reason: "rows * cols does not match data length",
            });
        }
        Ok(Self {
            data,
            rows,
            cols,
            order,
        })
    }

    /// Allocate a `rows x cols` row-major matrix with every cell set to `value`.
    ///
    /// All factories go through here so that oversized requests surface as
    /// [`CoreError::Allocation`] instead of aborting.
    pub(crate) fn filled(rows: usize, cols: usize, value: f64) -> Result<Self> {
        let numel = rows.checked_mul(cols).ok_or(CoreError::Allocation { rows, cols })?;
        let mut data = Vec::new();
        data.try_reserve_exact(numel)
            .map_err(|_| CoreError::Allocation { rows, cols })?;
        data.resize(numel, value);
        Ok(Self {
            data,
            rows,
            cols,
            order: Order::RowMajor,
        })
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Storage order of the backing buffer.
    #[inline]
    pub fn order(&self) -> Order {
        self.order
    }

    /// The backing buffer in storage order.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// The backing buffer in storage order, mutably.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Consume the matrix and return its buffer in storage order.
    #[inline]
    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    /// Re-layout into the requested storage order (no-op if already there).
    pub fn into_order(self, order: Order) -> Result<Self> {
        if self.order == order {
            return Ok(self);
        }
        let mut out = Self::filled(self.rows, self.cols, 0.0)?;
        out.order = order;
        for i in 0..self.rows {
            for j in 0..self.cols {
                *out.at_mut(i, j) = self.at(i, j);
            }
        }
        Ok(out)
    }

    #[inline]
    fn offset(&self, i: usize, j: usize) -> usize {
        match self.order {
            Order::RowMajor => i * self.cols + j,
            Order::ColMajor => j * self.rows + i,
        }
    }

    /// Apply `f` to every cell, returning a new row-major matrix.
    pub fn map<F>(&self, f: F) -> Result<Self>
    where
        F: Fn(f64) -> f64,
    {
        Self::from_fn(self.rows, self.cols, |i, j| f(self.at(i, j)))
    }

    /// Apply `f` to every cell in place.
    pub fn apply<F>(&mut self, f: F)
    where
        F: Fn(f64) -> f64,
    {
        for x in &mut self.data {
            *x = f(*x);
        }
    }
}

impl Matrix for DenseMatrix {
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
        self.data[self.offset(i, j)]
    }
}

impl MatrixMut for DenseMatrix {
    #[inline]
    fn at_mut(&mut self, i: usize, j: usize) -> &mut f64 {
        let k = self.offset(i, j);
        &mut self.data[k]
    }

    fn fill(&mut self, value: f64) {
        self.data.fill(value);
    }
}

/// Logical equality: same shape and same cells, whatever the storage order.
impl PartialEq for DenseMatrix {
    fn eq(&self, other: &Self) -> bool {
        if self.shape() != other.shape() {
            return false;
        }
        if self.order == other.order {
            return self.data == other.data;
        }
        (0..self.rows).all(|i| (0..self.cols).all(|j| self.at(i, j) == other.at(i, j)))
    }
}
