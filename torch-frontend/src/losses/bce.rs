//! Binary cross-entropy, on probabilities and on logits.
//!
//! ```text
//! bce(x, y)            = -w * (y * log(x) + (1 - y) * log(1 - x))
//! bce_with_logits(x, y) = w * ((1 - y) * x + (1 + (p - 1) * y) * (log(1 + exp(-|x|)) + max(-x, 0)))
//! ```
//! where `w` is the optional elementwise weight and `p` the optional positive
//! class weight. The logit form is the numerically stable rewrite of
//! `bce(sigmoid(x), y)`.

use burn::{
    config::Config,
    module::{Content, DisplaySettings, Ignored, Module, ModuleDisplay},
    tensor::{backend::Backend, Tensor},
};

use super::{
    assert_same_shape,
    reduction::{impl_reduction_args, LossOutput, ReductionArgs, ReductionMode},
};
use crate::error::FrontendResult;

/// Logarithms are clamped here so that a confident wrong prediction yields a
/// large but finite loss.
const LOG_CLAMP_MIN: f64 = -100.0;

/// Configuration for creating a [Binary cross-entropy loss](BinaryCrossEntropyLoss).
#[derive(Config, Debug)]
pub struct BinaryCrossEntropyLossConfig {
    /// Deprecated, see [`ReductionMode::from_legacy`].
    #[config(default = "None")]
    pub size_average: Option<bool>,
    /// Deprecated, see [`ReductionMode::from_legacy`].
    #[config(default = "None")]
    pub reduce: Option<bool>,
    /// Reduction applied to the output: `"none"`, `"mean"` or `"sum"`. Default: `"mean"`
    #[config(default = "String::from(\"mean\")")]
    pub reduction: String,
}

impl_reduction_args!(BinaryCrossEntropyLossConfig);

impl BinaryCrossEntropyLossConfig {
    /// Initialize [Binary cross-entropy loss](BinaryCrossEntropyLoss).
    pub fn init(&self) -> FrontendResult<BinaryCrossEntropyLoss> {
        Ok(BinaryCrossEntropyLoss {
            reduction: Ignored(self.reduction_mode()?),
        })
    }
}

/// Binary cross-entropy between predicted probabilities and targets in `[0, 1]`.
#[derive(Module, Clone, Debug)]
#[module(custom_display)]
pub struct BinaryCrossEntropyLoss {
    /// Reduction applied by [`BinaryCrossEntropyLoss::forward`].
    pub reduction: Ignored<ReductionMode>,
}

impl Default for BinaryCrossEntropyLoss {
    fn default() -> Self {
        Self {
            reduction: Ignored(ReductionMode::default()),
        }
    }
}

impl ModuleDisplay for BinaryCrossEntropyLoss {
    fn custom_settings(&self) -> Option<DisplaySettings> {
        DisplaySettings::new()
            .with_new_line_after_attribute(false)
            .optional()
    }

    fn custom_content(&self, content: Content) -> Option<Content> {
        content
            .add("reduction", &self.reduction.0.to_string())
            .optional()
    }
}

impl BinaryCrossEntropyLoss {
    /// Create a new binary cross-entropy loss with mean reduction.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute the criterion with the configured reduction.
    ///
    /// # Shapes
    ///
    /// - input: `[...dims]`, probabilities in `[0, 1]` (typically after sigmoid)
    /// - target: `[...dims]`, may hold soft labels
    /// - weight: broadcastable to `[...dims]`
    pub fn forward<const D: usize, B: Backend>(
        &self,
        input: Tensor<B, D>,
        target: Tensor<B, D>,
        weight: Option<Tensor<B, D>>,
    ) -> LossOutput<B, D> {
        self.reduction.apply(self.forward_no_reduction(input, target, weight))
    }

    /// Compute the elementwise criterion.
    pub fn forward_no_reduction<const D: usize, B: Backend>(
        &self,
        input: Tensor<B, D>,
        target: Tensor<B, D>,
        weight: Option<Tensor<B, D>>,
    ) -> Tensor<B, D> {
        assert_same_shape("BinaryCrossEntropyLoss", &input, &target);

        let log_input = input.clone().log().clamp_min(LOG_CLAMP_MIN);
        let log_one_minus_input = input.neg().add_scalar(1.0).log().clamp_min(LOG_CLAMP_MIN);
        let one_minus_target = target.clone().neg().add_scalar(1.0);

        let loss = -(target * log_input + one_minus_target * log_one_minus_input);
        apply_weight(loss, weight)
    }
}

/// Configuration for creating a [Binary cross-entropy with logits loss](BinaryCrossEntropyWithLogitsLoss).
#[derive(Config, Debug)]
pub struct BinaryCrossEntropyWithLogitsLossConfig {
    /// Deprecated, see [`ReductionMode::from_legacy`].
    #[config(default = "None")]
    pub size_average: Option<bool>,
    /// Deprecated, see [`ReductionMode::from_legacy`].
    #[config(default = "None")]
    pub reduce: Option<bool>,
    /// Reduction applied to the output: `"none"`, `"mean"` or `"sum"`. Default: `"mean"`
    #[config(default = "String::from(\"mean\")")]
    pub reduction: String,
}

impl_reduction_args!(BinaryCrossEntropyWithLogitsLossConfig);

impl BinaryCrossEntropyWithLogitsLossConfig {
    /// Initialize [Binary cross-entropy with logits loss](BinaryCrossEntropyWithLogitsLoss).
    pub fn init(&self) -> FrontendResult<BinaryCrossEntropyWithLogitsLoss> {
        Ok(BinaryCrossEntropyWithLogitsLoss {
            reduction: Ignored(self.reduction_mode()?),
        })
    }
}

/// Binary cross-entropy computed from raw logits.
#[derive(Module, Clone, Debug)]
#[module(custom_display)]
pub struct BinaryCrossEntropyWithLogitsLoss {
    /// Reduction applied by [`BinaryCrossEntropyWithLogitsLoss::forward`].
    pub reduction: Ignored<ReductionMode>,
}

impl Default for BinaryCrossEntropyWithLogitsLoss {
    fn default() -> Self {
        Self {
            reduction: Ignored(ReductionMode::default()),
        }
    }
}

impl ModuleDisplay for BinaryCrossEntropyWithLogitsLoss {
    fn custom_settings(&self) -> Option<DisplaySettings> {
        DisplaySettings::new()
            .with_new_line_after_attribute(false)
            .optional()
    }

    fn custom_content(&self, content: Content) -> Option<Content> {
        content
            .add("reduction", &self.reduction.0.to_string())
            .optional()
    }
}

impl BinaryCrossEntropyWithLogitsLoss {
    /// Create a new binary cross-entropy with logits loss with mean reduction.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute the criterion with the configured reduction.
    ///
    /// # Shapes
    ///
    /// - input: `[...dims]`, raw logits
    /// - target: `[...dims]`
    /// - weight, pos_weight: broadcastable to `[...dims]`
    pub fn forward<const D: usize, B: Backend>(
        &self,
        input: Tensor<B, D>,
        target: Tensor<B, D>,
        weight: Option<Tensor<B, D>>,
        pos_weight: Option<Tensor<B, D>>,
    ) -> LossOutput<B, D> {
        self.reduction.apply(self.forward_no_reduction(input, target, weight, pos_weight))
    }

    /// Compute the elementwise criterion.
    pub fn forward_no_reduction<const D: usize, B: Backend>(
        &self,
        input: Tensor<B, D>,
        target: Tensor<B, D>,
        weight: Option<Tensor<B, D>>,
        pos_weight: Option<Tensor<B, D>>,
    ) -> Tensor<B, D> {
        assert_same_shape("BinaryCrossEntropyWithLogitsLoss", &input, &target);

        // log(1 + exp(-|x|)) + max(-x, 0) == -log(sigmoid(x)) without overflow
        let neg_log_sigmoid = input.clone().abs().neg().exp().log1p()
            + input.clone().neg().clamp_min(0.0);
        let one_minus_target = target.clone().neg().add_scalar(1.0);

        let loss = match pos_weight {
            Some(pos_weight) => {
                let pos_weight = pos_weight.expand(input.shape());
                let log_weight = (pos_weight.sub_scalar(1.0) * target).add_scalar(1.0);
                one_minus_target * input + log_weight * neg_log_sigmoid
            }
            None => one_minus_target * input + neg_log_sigmoid,
        };

        apply_weight(loss, weight)
    }
}

fn apply_weight<B: Backend, const D: usize>(
    loss: Tensor<B, D>,
    weight: Option<Tensor<B, D>>,
) -> Tensor<B, D> {
    match weight {
        Some(weight) => {
            let weight = weight.expand(loss.shape());
            loss * weight
        }
        None => loss,
    }
}
