//! Kullback-Leibler divergence loss.
//!
//! `input` holds log-probabilities. `target` holds probabilities, or
//! log-probabilities when `log_target` is set:
//! ```text
//! l_n = y_n * (log(y_n) - x_n)         (log_target = false)
//! l_n = exp(y_n) * (y_n - x_n)         (log_target = true)
//! ```
//! Elements that evaluate to NaN (`0 * log 0`) contribute zero.
//!
//! Besides the usual reduction modes the loss accepts `"batchmean"`, which
//! sums the loss and divides by the size of the first axis. This is the mode
//! that matches the mathematical definition of the KL divergence.

use core::fmt;

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

/// Reduction accepted by the KL divergence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KlDivReduction {
    /// One of the shared reduction modes.
    Mode(ReductionMode),
    /// Sum divided by the batch size.
    BatchMean,
}

impl Default for KlDivReduction {
    fn default() -> Self {
        Self::Mode(ReductionMode::Mean)
    }
}

impl fmt::Display for KlDivReduction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mode(mode) => fmt::Display::fmt(mode, f),
            Self::BatchMean => f.write_str("batchmean"),
        }
    }
}

/// Configuration for creating a [KL divergence loss](KlDivLoss).
#[derive(Config, Debug)]
pub struct KlDivLossConfig {
    /// Reduction applied to the output: `"none"`, `"batchmean"`, `"mean"` or `"sum"`. Default: `"mean"`
    #[config(default = "String::from(\"mean\")")]
    pub reduction: String,
    /// Deprecated, see [`ReductionMode::from_legacy`].
    #[config(default = "None")]
    pub size_average: Option<bool>,
    /// Deprecated, see [`ReductionMode::from_legacy`].
    #[config(default = "None")]
    pub reduce: Option<bool>,
    /// Whether `target` is given in log space. Default: false
    #[config(default = false)]
    pub log_target: bool,
}

impl_reduction_args!(KlDivLossConfig);

impl KlDivLossConfig {
    /// Initialize [KL divergence loss](KlDivLoss).
    ///
    /// Legacy flags take precedence over the reduction string, `"batchmean"`
    /// included.
    pub fn init(&self) -> FrontendResult<KlDivLoss> {
        let reduction = if !self.has_legacy_flags() && self.reduction == "batchmean" {
            KlDivReduction::BatchMean
        } else {
            KlDivReduction::Mode(self.reduction_mode()?)
        };

        if self.requests_mean() {
            tracing::warn!(
                "reduction 'mean' divides the total loss by both the batch size and the support size, \
                 'batchmean' divides only by the batch size and matches the KL divergence definition"
            );
        }

        Ok(KlDivLoss {
            log_target: self.log_target,
            reduction: Ignored(reduction),
        })
    }

    fn has_legacy_flags(&self) -> bool {
        let (size_average, reduce) = self.legacy_flags();
        size_average.is_some() || reduce.is_some()
    }

    /// Whether the caller asked for `"mean"` by name, legacy flags aside.
    fn requests_mean(&self) -> bool {
        !self.has_legacy_flags() && self.reduction == "mean"
    }
}

/// Kullback-Leibler divergence loss.
#[derive(Module, Clone, Debug)]
#[module(custom_display)]
pub struct KlDivLoss {
    /// Whether `target` is given in log space.
    pub log_target: bool,
    /// Reduction applied by [`KlDivLoss::forward`].
    pub reduction: Ignored<KlDivReduction>,
}

impl Default for KlDivLoss {
    fn default() -> Self {
        Self {
            log_target: false,
            reduction: Ignored(KlDivReduction::default()),
        }
    }
}

impl ModuleDisplay for KlDivLoss {
    fn custom_settings(&self) -> Option<DisplaySettings> {
        DisplaySettings::new()
            .with_new_line_after_attribute(false)
            .optional()
    }

    fn custom_content(&self, content: Content) -> Option<Content> {
        content
            .add("log_target", &self.log_target)
            .add("reduction", &self.reduction.0.to_string())
            .optional()
    }
}

impl KlDivLoss {
    /// Create a new KL divergence loss with probability targets and mean reduction.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute the criterion with the configured reduction.
    ///
    /// # Shapes
    ///
    /// - input: `[batch_size, ...dims]`
    /// - target: same shape as input
    /// - output: `[batch_size, ...dims]` for `none`, `[1]` otherwise
    pub fn forward<const D: usize, B: Backend>(
        &self,
        input: Tensor<B, D>,
        target: Tensor<B, D>,
    ) -> LossOutput<B, D> {
        let batch_size = input.dims()[0];
        let loss = self.forward_no_reduction(input, target);

        match *self.reduction {
            KlDivReduction::Mode(mode) => mode.apply(loss),
            KlDivReduction::BatchMean => {
                LossOutput::Reduced(loss.sum().div_scalar(batch_size as f64))
            }
        }
    }

    /// Compute the elementwise criterion.
    pub fn forward_no_reduction<const D: usize, B: Backend>(
        &self,
        input: Tensor<B, D>,
        target: Tensor<B, D>,
    ) -> Tensor<B, D> {
        assert_same_shape("KlDivLoss", &input, &target);

        let loss = if self.log_target {
            target.clone().exp() * (target - input)
        } else {
            target.clone() * (target.log() - input)
        };

        loss.clone().mask_fill(loss.is_nan(), 0.0)
    }
}
