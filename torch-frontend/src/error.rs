use thiserror::Error;

/// The error type for the torch-compatible frontend.
///
/// Only argument conventions are checked here: reduction strings and the
/// input/target ranks of the embedding losses. Every other failure is left to
/// the Burn backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrontendError {
    /// Error for a `reduction` string that is not `"none"`, `"mean"` or `"sum"`
    /// (or `"batchmean"` where accepted).
    #[error("{value} is not a valid value for reduction")]
    InvalidReduction {
        /// The rejected reduction string.
        value: String,
    },

    /// Error for an input tensor whose shape does not fit the loss.
    #[error("Invalid input tensor shape: expected {expected}, got {actual}")]
    InvalidTensorShape {
        /// The expected tensor shape.
        expected: String,
        /// The actual tensor shape.
        actual: String,
    },

    /// Error for inputs and targets whose shapes disagree.
    #[error("{message}")]
    ShapeMismatch {
        /// Human-readable description echoing the offending shapes.
        message: String,
    },
}

/// A specialized `Result` type for frontend operations.
pub type FrontendResult<T> = Result<T, FrontendError>;
