//! Torch-named loss functions.
//!
//! Each function builds the matching loss from its config and runs it once,
//! so `mse_loss(input, target, &MseLossConfig::new())` behaves like
//! `torch.nn.functional.mse_loss(input, target)`. Tensor arguments that torch
//! takes by keyword (`weight`, `pos_weight`) stay positional here.

use burn::tensor::{backend::Backend, Int, Tensor};

use crate::{
    error::FrontendResult,
    losses::{
        BinaryCrossEntropyLossConfig, BinaryCrossEntropyWithLogitsLossConfig,
        CosineEmbeddingLossConfig, CrossEntropyLossConfig, HingeEmbeddingLossConfig,
        HuberLossConfig, KlDivLossConfig, L1LossConfig, LossOutput, MarginRankingLossConfig,
        MseLossConfig, NllLossConfig, PoissonNllLossConfig, SmoothL1LossConfig,
        SoftMarginLossConfig,
    },
};

/// Cross-entropy between logits `[N, C]` and class indices `[N]`.
pub fn cross_entropy<B: Backend>(
    input: Tensor<B, 2>,
    target: Tensor<B, 1, Int>,
    weight: Option<Tensor<B, 1>>,
    config: &CrossEntropyLossConfig,
) -> FrontendResult<LossOutput<B, 1>> {
    Ok(config.init()?.forward(input, target, weight))
}

/// Cross-entropy between logits `[N, C]` and class probabilities `[N, C]`.
pub fn cross_entropy_probs<B: Backend>(
    input: Tensor<B, 2>,
    target: Tensor<B, 2>,
    weight: Option<Tensor<B, 1>>,
    config: &CrossEntropyLossConfig,
) -> FrontendResult<LossOutput<B, 1>> {
    Ok(config.init()?.forward_probs(input, target, weight))
}

/// Negative log-likelihood of log-probabilities `[N, C]` at class indices `[N]`.
pub fn nll_loss<B: Backend>(
    input: Tensor<B, 2>,
    target: Tensor<B, 1, Int>,
    weight: Option<Tensor<B, 1>>,
    config: &NllLossConfig,
) -> FrontendResult<LossOutput<B, 1>> {
    Ok(config.init()?.forward(input, target, weight))
}

/// Cross-entropy over logits `[N, C, d_1, ..., d_k]` and class indices `[N, d_1, ..., d_k]`.
pub fn cross_entropy_multidim<B: Backend, const D: usize, const DT: usize>(
    input: Tensor<B, D>,
    target: Tensor<B, DT, Int>,
    weight: Option<Tensor<B, 1>>,
    config: &CrossEntropyLossConfig,
) -> FrontendResult<LossOutput<B, DT>> {
    Ok(config.init()?.forward_multidim(input, target, weight))
}

/// Negative log-likelihood over `[N, C, d_1, ..., d_k]` and `[N, d_1, ..., d_k]`.
pub fn nll_loss_multidim<B: Backend, const D: usize, const DT: usize>(
    input: Tensor<B, D>,
    target: Tensor<B, DT, Int>,
    weight: Option<Tensor<B, 1>>,
    config: &NllLossConfig,
) -> FrontendResult<LossOutput<B, DT>> {
    Ok(config.init()?.forward_multidim(input, target, weight))
}

/// Binary cross-entropy on probabilities.
pub fn binary_cross_entropy<B: Backend, const D: usize>(
    input: Tensor<B, D>,
    target: Tensor<B, D>,
    weight: Option<Tensor<B, D>>,
    config: &BinaryCrossEntropyLossConfig,
) -> FrontendResult<LossOutput<B, D>> {
    Ok(config.init()?.forward(input, target, weight))
}

/// Binary cross-entropy on logits.
pub fn binary_cross_entropy_with_logits<B: Backend, const D: usize>(
    input: Tensor<B, D>,
    target: Tensor<B, D>,
    weight: Option<Tensor<B, D>>,
    pos_weight: Option<Tensor<B, D>>,
    config: &BinaryCrossEntropyWithLogitsLossConfig,
) -> FrontendResult<LossOutput<B, D>> {
    Ok(config.init()?.forward(input, target, weight, pos_weight))
}

pub fn mse_loss<B: Backend, const D: usize>(
    input: Tensor<B, D>,
    target: Tensor<B, D>,
    config: &MseLossConfig,
) -> FrontendResult<LossOutput<B, D>> {
    Ok(config.init()?.forward(input, target))
}

pub fn l1_loss<B: Backend, const D: usize>(
    input: Tensor<B, D>,
    target: Tensor<B, D>,
    config: &L1LossConfig,
) -> FrontendResult<LossOutput<B, D>> {
    Ok(config.init()?.forward(input, target))
}

pub fn smooth_l1_loss<B: Backend, const D: usize>(
    input: Tensor<B, D>,
    target: Tensor<B, D>,
    config: &SmoothL1LossConfig,
) -> FrontendResult<LossOutput<B, D>> {
    Ok(config.init()?.forward(input, target))
}

pub fn huber_loss<B: Backend, const D: usize>(
    input: Tensor<B, D>,
    target: Tensor<B, D>,
    config: &HuberLossConfig,
) -> FrontendResult<LossOutput<B, D>> {
    Ok(config.init()?.forward(input, target))
}

pub fn soft_margin_loss<B: Backend, const D: usize>(
    input: Tensor<B, D>,
    target: Tensor<B, D>,
    config: &SoftMarginLossConfig,
) -> FrontendResult<LossOutput<B, D>> {
    Ok(config.init()?.forward(input, target))
}

/// KL-divergence of `target` from log-probabilities `input`.
///
/// Also accepts `reduction = "batchmean"`.
pub fn kl_div<B: Backend, const D: usize>(
    input: Tensor<B, D>,
    target: Tensor<B, D>,
    config: &KlDivLossConfig,
) -> FrontendResult<LossOutput<B, D>> {
    Ok(config.init()?.forward(input, target))
}

pub fn margin_ranking_loss<B: Backend, const D: usize>(
    input1: Tensor<B, D>,
    input2: Tensor<B, D>,
    target: Tensor<B, D>,
    config: &MarginRankingLossConfig,
) -> FrontendResult<LossOutput<B, D>> {
    Ok(config.init()?.forward(input1, input2, target))
}

pub fn poisson_nll_loss<B: Backend, const D: usize>(
    input: Tensor<B, D>,
    target: Tensor<B, D>,
    config: &PoissonNllLossConfig,
) -> FrontendResult<LossOutput<B, D>> {
    Ok(config.init()?.forward(input, target))
}

/// Cosine embedding loss over `[N, M]` input pairs and an `[N]` target.
///
/// Fails when the target rank is not one less than the input rank, see
/// [`CosineEmbeddingLoss::forward`](crate::losses::CosineEmbeddingLoss::forward).
pub fn cosine_embedding_loss<B: Backend, const D: usize, const DT: usize>(
    input1: Tensor<B, D>,
    input2: Tensor<B, D>,
    target: Tensor<B, DT>,
    config: &CosineEmbeddingLossConfig,
) -> FrontendResult<LossOutput<B, 1>> {
    config.init()?.forward(input1, input2, target)
}

pub fn hinge_embedding_loss<B: Backend, const D: usize>(
    input: Tensor<B, D>,
    target: Tensor<B, D>,
    config: &HingeEmbeddingLossConfig,
) -> FrontendResult<LossOutput<B, D>> {
    Ok(config.init()?.forward(input, target))
}
