//! Negative log-likelihood loss for Poisson-distributed targets.
//!
//! ```text
//! l_n = exp(x_n) - y_n * x_n                (log_input = true)
//! l_n = x_n - y_n * log(x_n + eps)          (log_input = false)
//! ```
//! With `full` set, the Stirling approximation of `log(y_n!)`,
//! `y_n * log(y_n) - y_n + 0.5 * log(2 * pi * y_n)`, is added for `y_n > 1`.

use core::f64::consts::PI;

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

/// Configuration for creating a [Poisson NLL loss](PoissonNllLoss).
#[derive(Config, Debug)]
pub struct PoissonNllLossConfig {
    /// Whether the input holds log-rates. Default: true
    #[config(default = true)]
    pub log_input: bool,
    /// Whether to add the Stirling term. Default: false
    #[config(default = false)]
    pub full: bool,
    /// Deprecated, see [`ReductionMode::from_legacy`].
    #[config(default = "None")]
    pub size_average: Option<bool>,
    /// Offset keeping `log(x)` finite when `log_input` is false. Default: 1e-8
    #[config(default = 1e-8)]
    pub eps: f64,
    /// Deprecated, see [`ReductionMode::from_legacy`].
    #[config(default = "None")]
    pub reduce: Option<bool>,
    /// Reduction applied to the output: `"none"`, `"mean"` or `"sum"`. Default: `"mean"`
    #[config(default = "String::from(\"mean\")")]
    pub reduction: String,
}

impl_reduction_args!(PoissonNllLossConfig);

impl PoissonNllLossConfig {
    /// Initialize [Poisson NLL loss](PoissonNllLoss).
    pub fn init(&self) -> FrontendResult<PoissonNllLoss> {
        Ok(PoissonNllLoss {
            log_input: self.log_input,
            full: self.full,
            eps: self.eps,
            reduction: Ignored(self.reduction_mode()?),
        })
    }
}

/// Poisson negative log-likelihood loss.
#[derive(Module, Clone, Debug)]
#[module(custom_display)]
pub struct PoissonNllLoss {
    /// Whether the input holds log-rates.
    pub log_input: bool,
    /// Whether to add the Stirling term.
    pub full: bool,
    /// Offset keeping `log(x)` finite when `log_input` is false.
    pub eps: f64,
    /// Reduction applied by [`PoissonNllLoss::forward`].
    pub reduction: Ignored<ReductionMode>,
}

impl Default for PoissonNllLoss {
    fn default() -> Self {
        Self {
            log_input: true,
            full: false,
            eps: 1e-8,
            reduction: Ignored(ReductionMode::Mean),
        }
    }
}

impl ModuleDisplay for PoissonNllLoss {
    fn custom_settings(&self) -> Option<DisplaySettings> {
        DisplaySettings::new()
            .with_new_line_after_attribute(false)
            .optional()
    }

    fn custom_content(&self, content: Content) -> Option<Content> {
        content
            .add("log_input", &self.log_input)
            .add("full", &self.full)
            .add("eps", &self.eps)
            .add("reduction", &self.reduction.0.to_string())
            .optional()
    }
}

impl PoissonNllLoss {
    /// Create a new Poisson NLL loss with log-rate inputs and mean reduction.
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
        assert_same_shape("PoissonNllLoss", &input, &target);

        let loss = if self.log_input {
            input.clone().exp() - target.clone() * input
        } else {
            input.clone() - target.clone() * input.add_scalar(self.eps).log()
        };

        if !self.full {
            return loss;
        }

        // Only selected where target > 1, so log(0) elsewhere never leaks through.
        let stirling = target.clone() * target.clone().log() - target.clone()
            + target.clone().mul_scalar(2.0 * PI).log().mul_scalar(0.5);
        let correction = target
            .zeros_like()
            .mask_where(target.greater_elem(1.0), stirling);

        loss + correction
    }
}
