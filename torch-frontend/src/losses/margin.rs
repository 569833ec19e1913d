//! Margin-based losses for ±1 targets.
//!
//! - Soft margin: `l_n = log(1 + exp(-y_n * x_n))`
//! - Margin ranking: `l_n = max(0, -y_n * (x1_n - x2_n) + margin)`

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

/// Configuration for creating a [Soft margin loss](SoftMarginLoss).
#[derive(Config, Debug)]
pub struct SoftMarginLossConfig {
    /// Reduction applied to the output: `"none"`, `"mean"` or `"sum"`. Default: `"mean"`
    #[config(default = "String::from(\"mean\")")]
    pub reduction: String,
    /// Deprecated, see [`ReductionMode::from_legacy`].
    #[config(default = "None")]
    pub size_average: Option<bool>,
    /// Deprecated, see [`ReductionMode::from_legacy`].
    #[config(default = "None")]
    pub reduce: Option<bool>,
}

impl_reduction_args!(SoftMarginLossConfig);

impl SoftMarginLossConfig {
    /// Initialize [Soft margin loss](SoftMarginLoss).
    pub fn init(&self) -> FrontendResult<SoftMarginLoss> {
        Ok(SoftMarginLoss {
            reduction: Ignored(self.reduction_mode()?),
        })
    }
}

/// Two-class logistic loss between an input and a ±1 target.
#[derive(Module, Clone, Debug)]
#[module(custom_display)]
pub struct SoftMarginLoss {
    /// Reduction applied by [`SoftMarginLoss::forward`].
    pub reduction: Ignored<ReductionMode>,
}

impl Default for SoftMarginLoss {
    fn default() -> Self {
        Self {
            reduction: Ignored(ReductionMode::default()),
        }
    }
}

impl ModuleDisplay for SoftMarginLoss {
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

impl SoftMarginLoss {
    /// Create a new soft margin loss with mean reduction.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute the criterion with the configured reduction.
    pub fn forward<const D: usize, B: Backend>(
        &self,
        input: Tensor<B, D>,
        target: Tensor<B, D>,
    ) -> LossOutput<B, D> {
        self.reduction.apply(self.forward_no_reduction(input, target))
    }

    /// Compute the elementwise criterion.
    pub fn forward_no_reduction<const D: usize, B: Backend>(
        &self,
        input: Tensor<B, D>,
        target: Tensor<B, D>,
    ) -> Tensor<B, D> {
        assert_same_shape("SoftMarginLoss", &input, &target);

        (-(input * target)).exp().log1p()
    }
}

/// Configuration for creating a [Margin ranking loss](MarginRankingLoss).
#[derive(Config, Debug)]
pub struct MarginRankingLossConfig {
    /// Minimum separation required between the ranked inputs. Default: 0.0
    #[config(default = 0.0)]
    pub margin: f64,
    /// Reduction applied to the output: `"none"`, `"mean"` or `"sum"`. Default: `"mean"`
    #[config(default = "String::from(\"mean\")")]
    pub reduction: String,
    /// Deprecated, see [`ReductionMode::from_legacy`].
    #[config(default = "None")]
    pub size_average: Option<bool>,
    /// Deprecated, see [`ReductionMode::from_legacy`].
    #[config(default = "None")]
    pub reduce: Option<bool>,
}

impl_reduction_args!(MarginRankingLossConfig);

impl MarginRankingLossConfig {
    /// Initialize [Margin ranking loss](MarginRankingLoss).
    pub fn init(&self) -> FrontendResult<MarginRankingLoss> {
        Ok(MarginRankingLoss {
            margin: self.margin,
            reduction: Ignored(self.reduction_mode()?),
        })
    }
}

/// Ranking loss: a target of `1` asks for `x1 > x2`, a target of `-1` for `x2 > x1`.
#[derive(Module, Clone, Debug)]
#[module(custom_display)]
pub struct MarginRankingLoss {
    /// Minimum separation required between the ranked inputs.
    pub margin: f64,
    /// Reduction applied by [`MarginRankingLoss::forward`].
    pub reduction: Ignored<ReductionMode>,
}

impl Default for MarginRankingLoss {
    fn default() -> Self {
        Self {
            margin: 0.0,
            reduction: Ignored(ReductionMode::default()),
        }
    }
}

impl ModuleDisplay for MarginRankingLoss {
    fn custom_settings(&self) -> Option<DisplaySettings> {
        DisplaySettings::new()
            .with_new_line_after_attribute(false)
            .optional()
    }

    fn custom_content(&self, content: Content) -> Option<Content> {
        content
            .add("margin", &self.margin)
            .add("reduction", &self.reduction.0.to_string())
            .optional()
    }
}

impl MarginRankingLoss {
    /// Create a new margin ranking loss with zero margin and mean reduction.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute the criterion with the configured reduction.
    pub fn forward<const D: usize, B: Backend>(
        &self,
        input1: Tensor<B, D>,
        input2: Tensor<B, D>,
        target: Tensor<B, D>,
    ) -> LossOutput<B, D> {
        self.reduction.apply(self.forward_no_reduction(input1, input2, target))
    }

    /// Compute the elementwise criterion.
    ///
    /// # Shapes
    ///
    /// - input1, input2, target: `[...dims]` (all the same shape)
    /// - output: `[...dims]`
    pub fn forward_no_reduction<const D: usize, B: Backend>(
        &self,
        input1: Tensor<B, D>,
        input2: Tensor<B, D>,
        target: Tensor<B, D>,
    ) -> Tensor<B, D> {
        assert_same_shape("MarginRankingLoss", &input1, &input2);
        assert_same_shape("MarginRankingLoss", &input1, &target);

        (-target * (input1 - input2))
            .add_scalar(self.margin)
            .clamp_min(0.0)
    }
}
