//! General array operations for the Burn deep learning framework
//!
//! Thin wrappers that keep the calling conventions of a classic array API
//! (`minimum`, `maximum`, `ones`, `cross`, `matmul`, `identity`, `meshgrid`)
//! and forward the numerics to whichever Burn backend the caller selected.

use core::time::Duration;

use burn::prelude::*;

#[cfg(any(feature = "ndarray", feature = "wgpu", feature = "cuda"))]
pub mod backend;
mod creation;
mod elementwise;
mod error;
mod grid;
mod linalg;

// Convenient re-exports
pub use creation::{eye, identity, ones};
pub use elementwise::{maximum, maximum_scalar, minimum, minimum_scalar};
pub use error::{CompatOpsError, CompatOpsResult};
pub use grid::{meshgrid, Indexing};
pub use linalg::{cross, matmul};

/// Positive infinity.
pub const INF: f64 = f64::INFINITY;

/// Default timeout for backend round trips.
pub const TIMEOUT: Duration = Duration::from_secs(15);

/// Scratch directory.
pub const TMP_DIR: &str = "/tmp";

/// Compatibility operations as tensor methods
pub trait TensorCompatOps<B: Backend, const D: usize>: Sized {
    /// Element-wise minimum with `other`, see [`minimum`].
    fn minimum(self, other: Self) -> Self;

    /// Element-wise maximum with `other`, see [`maximum`].
    fn maximum(self, other: Self) -> Self;

    /// Cross product along the last axis, see [`cross`].
    fn cross(self, other: Self) -> CompatOpsResult<Self>;
}

impl<B: Backend, const D: usize> TensorCompatOps<B, D> for Tensor<B, D> {
    fn minimum(self, other: Self) -> Self {
        minimum(self, other)
    }

    fn maximum(self, other: Self) -> Self {
        maximum(self, other)
    }

    fn cross(self, other: Self) -> CompatOpsResult<Self> {
        cross(self, other)
    }
}
