//! Mean Squared Error (L2) loss.
//!
//! The unreduced loss can be described as:
//! `L = {l_1, ..., l_N}` where `l_n = (x_n - y_n)^2`

use burn::{
    config::Config,
    module::{Content, DisplaySettings, Ignored, Module, ModuleDisplay},
    nn::loss,
    tensor::{backend::Backend, Tensor},
};

use super::{
    assert_same_shape,
    reduction::{impl_reduction_args, LossOutput, ReductionArgs, ReductionMode},
};
use crate::error::FrontendResult;

/// Configuration for creating a [Mean Squared Error loss](MseLoss).
#[derive(Config, Debug)]
pub struct MseLossConfig {
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

impl_reduction_args!(MseLossConfig);

impl MseLossConfig {
    /// Initialize [Mean Squared Error loss](MseLoss).
    pub fn init(&self) -> FrontendResult<MseLoss> {
        Ok(MseLoss {
            reduction: Ignored(self.reduction_mode()?),
        })
    }
}

/// Mean Squared Error (L2) loss.
#[derive(Module, Clone, Debug)]
#[module(custom_display)]
pub struct MseLoss {
    /// Reduction applied by [`MseLoss::forward`].
    pub reduction: Ignored<ReductionMode>,
}

impl Default for MseLoss {
    fn default() -> Self {
        Self {
            reduction: Ignored(ReductionMode::default()),
        }
    }
}

impl ModuleDisplay for MseLoss {
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

impl MseLoss {
    /// Create a new MSE loss with mean reduction.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute the criterion with the configured reduction.
    ///
    /// # Shapes
    ///
    /// - input: `[...dims]`
    /// - target: `[...dims]` (same shape as input)
    /// - output: `[...dims]` for `none`, `[1]` otherwise
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
        assert_same_shape("MseLoss", &input, &target);

        loss::MseLoss::new().forward_no_reduction(input, target)
    }
}
