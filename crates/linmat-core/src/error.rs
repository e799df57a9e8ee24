use thiserror::Error;

/// All errors returned by `linmat-core`.
///
/// Shapes are reported as `(rows, cols)` pairs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Operand shapes are incompatible for the requested operation.
    ///
    /// `got` is the shape of the offending operand and `expected` the shape
    /// it would need for the call to succeed.
    #[error("dimension mismatch: expected {expected:?}, got {got:?}")]
    DimensionMismatch {
        expected: (usize, usize),
        got: (usize, usize),
    },

    /// A least-squares solve was requested on a rank-deficient decomposition.
    #[error("matrix is rank deficient")]
    RankDeficient,

    /// An element index lies outside `[0, rows) x [0, cols)`.
    #[error("index {index:?} out of bounds for shape {shape:?}")]
    IndexOutOfBounds {
        index: (usize, usize),
        shape: (usize, usize),
    },

    /// A view range is empty-reversed or runs past the parent extent.
    #[error("invalid range {lo}..{hi} for an axis of length {len}")]
    InvalidRange { lo: usize, hi: usize, len: usize },

    /// A raw buffer does not hold `rows * cols` values.
    #[error("invalid shape ({rows}, {cols}) for {len} values: {reason}")]
    InvalidShape {
        rows: usize,
        cols: usize,
        len: usize,
        reason: &'static str,
    },

    /// The requested storage cannot be allocated.
    #[error("cannot allocate storage for a ({rows}, {cols}) matrix")]
    Allocation { rows: usize, cols: usize },

    /// The operation is not supported for the given input.
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: &'static str },
}

/// Convenience alias used throughout `linmat-core`.
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let e = CoreError::DimensionMismatch {
            expected: (3, 2),
            got: (4, 2),
        };
        assert_eq!(e.to_string(), "dimension mismatch: expected (3, 2), got (4, 2)");

        let e = CoreError::IndexOutOfBounds {
            index: (5, 0),
            shape: (2, 2),
        };
        assert_eq!(e.to_string(), "index (5, 0) out of bounds for shape (2, 2)");

        assert_eq!(
            CoreError::RankDeficient.to_string(),
            "matrix is rank deficient"
        );
        assert_eq!(
            CoreError::InvalidRange { lo: 3, hi: 1, len: 4 }.to_string(),
            "invalid range 3..1 for an axis of length 4"
        );
    }

    #[test]
    fn test_error_is_std_error() {
        fn takes_error(_: &dyn std::error::Error) {}
        takes_error(&CoreError::Allocation { rows: 1, cols: 1 });
    }
}
