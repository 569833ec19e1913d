//! Mean Absolute Error (L1) loss.
//!
//! Creates a criterion that measures the mean absolute error (MAE) between each element in
//! the input and target tensors.
//!
//! The unreduced loss can be described as:
//! `L = {l_1, ..., l_N}` where `l_n = |x_n - y_n|`

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

/// Configuration for creating an [L1 loss](L1Loss).
#[derive(Config, Debug)]
pub struct L1LossConfig {
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

impl_reduction_args!(L1LossConfig);

impl L1LossConfig {
    /// Initialize [L1 loss](L1Loss).
    pub fn init(&self) -> FrontendResult<L1Loss> {
        Ok(L1Loss {
            reduction: Ignored(self.reduction_mode()?),
        })
    }
}

/// Mean Absolute Error (L1) loss.
///
/// Supports arbitrary tensor dimensions and reduction options.
#[derive(Module, Clone, Debug)]
#[module(custom_display)]
pub struct L1Loss {
    /// Reduction applied by [`L1Loss::forward`].
    pub reduction: Ignored<ReductionMode>,
}

impl Default for L1Loss {
    fn default() -> Self {
        Self {
            reduction: Ignored(ReductionMode::default()),
        }
    }
}

impl ModuleDisplay for L1Loss {
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

impl L1Loss {
    /// Create a new L1 loss with mean reduction.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute the criterion with the configured reduction.
    ///
    /// # Shapes
    ///
    /// - input: `[...dims]` (any shape)
    /// - target: `[...dims]` (same shape as input)
    /// - output: `[...dims]` for `none`, `[1]` otherwise
    pub fn forward<const D: usize, B: Backend>(
        &self,
        input: Tensor<B, D>,
        target: Tensor<B, D>,
    ) -> LossOutput<B, D> {
        self.reduction.apply(self.forward_no_reduction(input, target))
    }

    /// Compute the criterion on the input tensor without reduction.
    pub fn forward_no_reduction<const D: usize, B: Backend>(
        &self,
        input: Tensor<B, D>,
        target: Tensor<B, D>,
    ) -> Tensor<B, D> {
        assert_same_shape("L1Loss", &input, &target);

        (input - target).abs()
    }
}
