//! Loss functions with torch argument conventions.
//!
//! Each loss has a `*Config` carrying torch's default arguments and an
//! `init` that resolves the `reduction` string (and the deprecated
//! `size_average` / `reduce` flags) into a [`ReductionMode`]. The loss itself
//! exposes `forward`, returning a [`LossOutput`], and `forward_no_reduction`
//! for the elementwise tensor.

pub mod bce;
pub mod cross_entropy;
pub mod embedding;
pub mod kl_div;
pub mod l1;
pub mod margin;
pub mod mse;
pub mod poisson_nll;
pub mod reduction;
pub mod smooth_l1;

pub use bce::{
    BinaryCrossEntropyLoss, BinaryCrossEntropyLossConfig, BinaryCrossEntropyWithLogitsLoss,
    BinaryCrossEntropyWithLogitsLossConfig,
};
pub use cross_entropy::{CrossEntropyLoss, CrossEntropyLossConfig, NllLoss, NllLossConfig};
pub use embedding::{
    CosineEmbeddingLoss, CosineEmbeddingLossConfig, HingeEmbeddingLoss, HingeEmbeddingLossConfig,
};
pub use kl_div::{KlDivLoss, KlDivLossConfig, KlDivReduction};
pub use l1::{L1Loss, L1LossConfig};
pub use margin::{MarginRankingLoss, MarginRankingLossConfig, SoftMarginLoss, SoftMarginLossConfig};
pub use mse::{MseLoss, MseLossConfig};
pub use poisson_nll::{PoissonNllLoss, PoissonNllLossConfig};
pub use reduction::{LossOutput, ReductionArgs, ReductionMode};
pub use smooth_l1::{HuberLoss, HuberLossConfig, SmoothL1Loss, SmoothL1LossConfig};

use burn::tensor::{backend::Backend, Tensor};

/// Panics unless `input` and `target` have the same shape.
pub(crate) fn assert_same_shape<B: Backend, const D: usize>(
    name: &str,
    input: &Tensor<B, D>,
    target: &Tensor<B, D>,
) {
    let input_dims = input.dims();
    let target_dims = target.dims();
    assert_eq!(
        input_dims, target_dims,
        "Shape of input ({input_dims:?}) must match target ({target_dims:?}) in {name}"
    );
}
