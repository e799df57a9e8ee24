//! Matrix factories and the tabular-source boundary.

use core::ops::Range;

use crate::error::{CoreError, Result};

use super::{DenseMatrix, Matrix, MatrixMut, Order};

/// A rectangular table of numeric values owned by some other component
/// (a data frame, a dataset loader, ...).
///
/// [`DenseMatrix::from_tabular`] reads it exactly once, cell by cell, into
/// owned storage; later changes to the source are not observed.
pub trait TabularSource {
    fn row_count(&self) -> usize;
    fn col_count(&self) -> usize;
    fn value(&self, row: usize, col: usize) -> f64;

    /// Number of readable cells in `row`. Sources that can be ragged
    /// override this; [`DenseMatrix::from_tabular`] rejects any row shorter
    /// or longer than [`col_count`](Self::col_count).
    fn row_len(&self, _row: usize) -> usize {
        self.col_count()
    }
}

impl TabularSource for DenseMatrix {
    fn row_count(&self) -> usize {
        self.rows()
    }

    fn col_count(&self) -> usize {
        self.cols()
    }

    fn value(&self, row: usize, col: usize) -> f64 {
        self.at(row, col)
    }
}

/// Nested rows. The column count is taken from the first row; a missing
/// cell reads as NaN.
impl TabularSource for Vec<Vec<f64>> {
    fn row_count(&self) -> usize {
        self.len()
    }

    fn col_count(&self) -> usize {
        self.first().map_or(0, Vec::len)
    }

    fn value(&self, row: usize, col: usize) -> f64 {
        self.get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(f64::NAN)
    }

    fn row_len(&self, row: usize) -> usize {
        self.get(row).map_or(0, Vec::len)
    }
}

impl DenseMatrix {
    /// Create a `rows x cols` matrix of zeros.
    ///
    /// ```
    /// # use linmat_core::{DenseMatrix, Matrix};
    /// let m = DenseMatrix::zeros(2, 3).unwrap();
    /// assert_eq!(m.shape(), (2, 3));
    /// assert!(m.as_slice().iter().all(|&x| x == 0.0));
    /// ```
    pub fn zeros(rows: usize, cols: usize) -> Result<Self> {
        Self::filled(rows, cols, 0.0)
    }

    /// Create a `rows x cols` matrix with every cell set to `value`.
    pub fn full(rows: usize, cols: usize, value: f64) -> Result<Self> {
        Self::filled(rows, cols, value)
    }

    /// Create a `rows x cols` matrix whose cell `(i, j)` is `f(i, j)`.
    ///
    /// ```
    /// # use linmat_core::{DenseMatrix, Matrix};
    /// let m = DenseMatrix::from_fn(2, 2, |i, j| (i + j) as f64).unwrap();
    /// assert_eq!(m.get(1, 1).unwrap(), 2.0);
    /// ```
    pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> Result<Self>
    where
        F: FnMut(usize, usize) -> f64,
    {
        let mut m = Self::filled(rows, cols, 0.0)?;
        let data = m.as_mut_slice();
        for i in 0..rows {
            for j in 0..cols {
                data[i * cols + j] = f(i, j);
            }
        }
        Ok(m)
    }

    /// Create the `n x n` identity matrix.
    ///
    /// ```
    /// # use linmat_core::{DenseMatrix, Matrix};
    /// let eye = DenseMatrix::identity(3).unwrap();
    /// assert_eq!(eye.get(0, 0).unwrap(), 1.0);
    /// assert_eq!(eye.get(0, 1).unwrap(), 0.0);
    /// ```
    pub fn identity(n: usize) -> Result<Self> {
        let mut m = Self::filled(n, n, 0.0)?;
        for i in 0..n {
            *m.at_mut(i, i) = 1.0;
        }
        Ok(m)
    }

    /// Wrap a row-major buffer without copying.
    ///
    /// Returns [`CoreError::InvalidShape`] if `values.len() != rows * cols`.
    ///
    /// ```
    /// # use linmat_core::{DenseMatrix, Matrix};
    /// let m = DenseMatrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    /// assert_eq!(m.get(1, 0).unwrap(), 3.0);
    /// ```
    pub fn from_vec(rows: usize, cols: usize, values: Vec<f64>) -> Result<Self> {
        Self::from_vec_with_order(rows, cols, values, Order::RowMajor)
    }

    /// Create an `n x 1` column vector.
    pub fn column(values: Vec<f64>) -> Result<Self> {
        let n = values.len();
        Self::from_vec(n, 1, values)
    }

    /// Copy nested rows into a matrix. All rows must have the same length.
    ///
    /// ```
    /// # use linmat_core::{DenseMatrix, Matrix};
    /// let m = DenseMatrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]).unwrap();
    /// assert_eq!(m.shape(), (3, 2));
    /// ```
    pub fn from_rows(source: &[Vec<f64>]) -> Result<Self> {
        let cols = source.first().map_or(0, Vec::len);
        if source.iter().any(|r| r.len() != cols) {
            return Err(CoreError::InvalidShape {
                rows: source.len(),
                cols,
                len: source.iter().map(Vec::len).sum(),
                reason: "ragged rows",
            });
        }
        Self::from_rows_range(source, 0..source.len(), 0..cols)
    }

    /// Copy the block `rows x cols` of nested rows into a new matrix whose
    /// `(0, 0)` is `source[rows.start][cols.start]`.
    pub fn from_rows_range(
        source: &[Vec<f64>],
        rows: Range<usize>,
        cols: Range<usize>,
    ) -> Result<Self> {
        if rows.start > rows.end || rows.end > source.len() {
            return Err(CoreError::InvalidRange {
                lo: rows.start,
                hi: rows.end,
                len: source.len(),
            });
        }
        let shortest = source[rows.clone()].iter().map(Vec::len).min().unwrap_or(0);
        if cols.start > cols.end || (!rows.is_empty() && cols.end > shortest) {
            return Err(CoreError::InvalidRange {
                lo: cols.start,
                hi: cols.end,
                len: shortest,
            });
        }
        Self::from_fn(rows.len(), cols.len(), |i, j| {
            source[rows.start + i][cols.start + j]
        })
    }

    /// Snapshot an external table into owned storage.
    ///
    /// Returns [`CoreError::InvalidShape`] if some row of the source is not
    /// `col_count()` cells long.
    ///
    /// ```
    /// # use linmat_core::{DenseMatrix, Matrix};
    /// let table = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
    /// let m = DenseMatrix::from_tabular(&table).unwrap();
    /// assert_eq!(m.get(1, 1).unwrap(), 4.0);
    /// ```
    pub fn from_tabular<S: TabularSource + ?Sized>(source: &S) -> Result<Self> {
        let (rows, cols) = (source.row_count(), source.col_count());
        if (0..rows).any(|i| source.row_len(i) != cols) {
            return Err(CoreError::InvalidShape {
                rows,
                cols,
                len: (0..rows).map(|i| source.row_len(i)).sum(),
                reason: "ragged rows",
            });
        }
        Self::from_fn(source.row_count(), source.col_count(), |i, j| {
            source.value(i, j)
        })
    }
}
