//! `Display` formatting for matrices and views.

use core::fmt;

use super::{DenseMatrix, Matrix, RangeView, TransposeView};

/// Render any matrix as `matrix([[..], [..]])` with one row per line.
fn write_matrix(m: &dyn Matrix, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let (rows, cols) = m.shape();
    if rows == 0 || cols == 0 {
        return write!(f, "matrix([], shape=({rows}, {cols}))");
    }

    writeln!(f, "matrix([")?;
    for i in 0..rows {
        write!(f, "  [")?;
        for j in 0..cols {
            if j > 0 {
                write!(f, ", ")?;
            }
            match f.precision() {
                Some(p) => write!(f, "{:.*}", p, m.at(i, j))?,
                None => write!(f, "{}", m.at(i, j))?,
            }
        }
        if i < rows - 1 {
            writeln!(f, "],")?;
        } else {
            writeln!(f, "]")?;
        }
    }
    write!(f, "])")
}

impl fmt::Display for DenseMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_matrix(self, f)
    }
}

impl<M: Matrix> fmt::Display for TransposeView<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_matrix(self, f)
    }
}

impl<M: Matrix> fmt::Display for RangeView<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_matrix(self, f)
    }
}
