use thiserror::Error;

/// The error type for the general compatibility operations.
///
/// Only argument conventions are validated here. Failures inside the numeric
/// kernels themselves are reported by the Burn backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompatOpsError {
    /// Error for an indexing mode other than `"ij"` or `"xy"`.
    #[error("{value} is not a valid indexing mode, expected 'ij' or 'xy'")]
    InvalidIndexing {
        /// The rejected indexing string.
        value: String,
    },

    /// Error for vectors whose cross-product axis does not have three components.
    #[error("cross product requires 3 components along the last axis, got {actual}")]
    InvalidCrossDimension {
        /// The size of the last axis that was found.
        actual: usize,
    },

    /// Error for two operands whose shapes were required to be equal.
    #[error("Shape mismatch: {lhs:?} and {rhs:?}")]
    ShapeMismatch {
        /// Shape of the left operand.
        lhs: Vec<usize>,
        /// Shape of the right operand.
        rhs: Vec<usize>,
    },

    /// Error for a batch shape that does not fit the requested output rank.
    #[error("batch shape {batch_shape:?} cannot produce a {rank}D identity tensor")]
    InvalidBatchShape {
        /// The requested batch shape.
        batch_shape: Vec<usize>,
        /// The rank of the output tensor.
        rank: usize,
    },
}

/// A specialized `Result` type for compatibility operations.
pub type CompatOpsResult<T> = Result<T, CompatOpsError>;
