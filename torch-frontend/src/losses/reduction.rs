//! Reduction modes and the legacy `size_average` / `reduce` flags.
//!
//! Every loss produces an elementwise tensor first. The reduction mode then
//! decides whether that tensor is returned as-is or collapsed to a single
//! value:
//! - `'none'`: returns `L` (no reduction)
//! - `'mean'`: `mean(L)`
//! - `'sum'`: `sum(L)`
//!
//! Older callers pass the boolean pair `size_average` / `reduce` instead of a
//! reduction string. When either flag is set it takes precedence:
//!
//! | size_average | reduce | mode   |
//! |--------------|--------|--------|
//! | true / None  | true / None | mean |
//! | false        | true / None | sum  |
//! | any          | false  | none   |

use core::{fmt, str::FromStr};

use burn::tensor::{backend::Backend, Tensor, TensorData};

use crate::error::{FrontendError, FrontendResult};

/// How an elementwise loss is collapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReductionMode {
    /// Keep the elementwise loss.
    None,
    /// Average over all elements.
    #[default]
    Mean,
    /// Sum over all elements.
    Sum,
}

impl ReductionMode {
    /// Maps the legacy flag pair onto a reduction mode. Unset flags count as `true`.
    pub const fn from_legacy(size_average: Option<bool>, reduce: Option<bool>) -> Self {
        let size_average = match size_average {
            Some(flag) => flag,
            None => true,
        };
        let reduce = match reduce {
            Some(flag) => flag,
            None => true,
        };

        match (size_average, reduce) {
            (true, true) => Self::Mean,
            (false, true) => Self::Sum,
            (_, false) => Self::None,
        }
    }

    /// Resolves the effective mode from a reduction string and the legacy flags.
    ///
    /// The legacy flags win whenever either of them is set, in which case the
    /// string is not inspected at all.
    pub fn resolve(
        reduction: &str,
        size_average: Option<bool>,
        reduce: Option<bool>,
    ) -> FrontendResult<Self> {
        if size_average.is_some() || reduce.is_some() {
            let mode = Self::from_legacy(size_average, reduce);
            tracing::warn!(
                ?size_average,
                ?reduce,
                "size_average and reduce args will be deprecated, please use reduction='{mode}' instead"
            );
            return Ok(mode);
        }

        let mode = reduction.parse()?;
        tracing::debug!(reduction, "resolved reduction mode");
        Ok(mode)
    }

    /// Applies the reduction to an elementwise loss.
    pub fn apply<B: Backend, const D: usize>(self, loss: Tensor<B, D>) -> LossOutput<B, D> {
        match self {
            Self::None => LossOutput::Elementwise(loss),
            Self::Mean => LossOutput::Reduced(loss.mean()),
            Self::Sum => LossOutput::Reduced(loss.sum()),
        }
    }

    /// The string accepted by [`FromStr`] for this mode.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Mean => "mean",
            Self::Sum => "sum",
        }
    }
}

impl FromStr for ReductionMode {
    type Err = FrontendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "mean" => Ok(Self::Mean),
            "sum" => Ok(Self::Sum),
            other => Err(FrontendError::InvalidReduction {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for ReductionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a loss computation.
///
/// Burn tensors cannot be zero-dimensional, so reduced losses are returned
/// with shape `[1]`.
#[derive(Debug, Clone)]
pub enum LossOutput<B: Backend, const D: usize> {
    /// Unreduced loss, same shape as the elementwise loss.
    Elementwise(Tensor<B, D>),
    /// Mean or sum of the elementwise loss, shape `[1]`.
    Reduced(Tensor<B, 1>),
}

impl<B: Backend, const D: usize> LossOutput<B, D> {
    /// Shape of the wrapped tensor.
    pub fn dims(&self) -> Vec<usize> {
        match self {
            Self::Elementwise(loss) => loss.dims().to_vec(),
            Self::Reduced(loss) => loss.dims().to_vec(),
        }
    }

    /// Whether the loss was collapsed to a single value.
    pub const fn is_reduced(&self) -> bool {
        matches!(self, Self::Reduced(_))
    }

    /// The reduced loss, if a mean or sum reduction was applied.
    pub fn into_reduced(self) -> Option<Tensor<B, 1>> {
        match self {
            Self::Reduced(loss) => Some(loss),
            Self::Elementwise(_) => None,
        }
    }

    /// The elementwise loss, if no reduction was applied.
    pub fn into_elementwise(self) -> Option<Tensor<B, D>> {
        match self {
            Self::Elementwise(loss) => Some(loss),
            Self::Reduced(_) => None,
        }
    }

    /// Reads the wrapped tensor back from the device.
    pub fn into_data(self) -> TensorData {
        match self {
            Self::Elementwise(loss) => loss.into_data(),
            Self::Reduced(loss) => loss.into_data(),
        }
    }
}

/// Loss configurations exposing a reduction string and, optionally, the legacy flags.
pub trait ReductionArgs {
    /// The requested reduction string.
    fn reduction(&self) -> &str;

    /// The legacy `(size_average, reduce)` pair. Unset by default.
    fn legacy_flags(&self) -> (Option<bool>, Option<bool>) {
        (None, None)
    }

    /// The effective reduction mode.
    fn reduction_mode(&self) -> FrontendResult<ReductionMode> {
        let (size_average, reduce) = self.legacy_flags();
        ReductionMode::resolve(self.reduction(), size_average, reduce)
    }
}

/// Implements [`ReductionArgs`] for a config with `reduction`, `size_average` and `reduce` fields.
macro_rules! impl_reduction_args {
    ($config:ty) => {
        impl $crate::losses::reduction::ReductionArgs for $config {
            fn reduction(&self) -> &str {
                &self.reduction
            }

            fn legacy_flags(&self) -> (Option<bool>, Option<bool>) {
                (self.size_average, self.reduce)
            }
        }
    };
}

pub(crate) use impl_reduction_args;
