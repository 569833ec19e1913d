//! Embedding losses for ±1 similarity targets.
//!
//! - Cosine embedding: `1 - cos(x1, x2)` for `y = 1`, `max(0, cos(x1, x2) - margin)` for `y = -1`
//! - Hinge embedding: `x` for `y = 1`, `max(0, margin - x)` for `y = -1`
//!
//! Targets other than ±1 are not rejected. Cosine embedding yields zero for
//! them, hinge embedding yields `max(margin, x)`.

use burn::{
    config::Config,
    module::{Content, DisplaySettings, Ignored, Module, ModuleDisplay},
    tensor::{backend::Backend, Tensor},
};
use burn_compat_ops::maximum_scalar;

use super::{
    assert_same_shape,
    reduction::{impl_reduction_args, LossOutput, ReductionArgs, ReductionMode},
};
use crate::error::{FrontendError, FrontendResult};

/// Lower bound on the product of norms in the cosine similarity.
const COSINE_EPS: f64 = 1e-8;

/// Configuration for creating a [Cosine embedding loss](CosineEmbeddingLoss).
#[derive(Config, Debug)]
pub struct CosineEmbeddingLossConfig {
    /// Similarity below which dissimilar pairs stop contributing. Default: 0.0
    #[config(default = 0.0)]
    pub margin: f64,
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

impl_reduction_args!(CosineEmbeddingLossConfig);

impl CosineEmbeddingLossConfig {
    /// Initialize [Cosine embedding loss](CosineEmbeddingLoss).
    pub fn init(&self) -> FrontendResult<CosineEmbeddingLoss> {
        Ok(CosineEmbeddingLoss {
            margin: self.margin,
            reduction: Ignored(self.reduction_mode()?),
        })
    }
}

/// Measures whether two inputs are similar or dissimilar by their cosine similarity.
#[derive(Module, Clone, Debug)]
#[module(custom_display)]
pub struct CosineEmbeddingLoss {
    /// Similarity below which dissimilar pairs stop contributing.
    pub margin: f64,
    /// Reduction applied by [`CosineEmbeddingLoss::forward`].
    pub reduction: Ignored<ReductionMode>,
}

impl Default for CosineEmbeddingLoss {
    fn default() -> Self {
        Self {
            margin: 0.0,
            reduction: Ignored(ReductionMode::default()),
        }
    }
}

impl ModuleDisplay for CosineEmbeddingLoss {
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

impl CosineEmbeddingLoss {
    /// Create a new cosine embedding loss with zero margin and mean reduction.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute the criterion over a batch of input pairs.
    ///
    /// # Shapes
    ///
    /// - input1, input2: `[batch_size, features]`
    /// - target: `[batch_size]`
    /// - output: `[batch_size]` for `none`, `[1]` otherwise
    ///
    /// # Errors
    ///
    /// Returns an error when the target rank is not one less than the input
    /// rank, when the target has more than one axis, when the two inputs
    /// differ in shape, or when the target length differs from the batch size.
    pub fn forward<B: Backend, const D: usize, const DT: usize>(
        &self,
        input1: Tensor<B, D>,
        input2: Tensor<B, D>,
        target: Tensor<B, DT>,
    ) -> FrontendResult<LossOutput<B, 1>> {
        let dims1 = input1.dims();
        let dims2 = input2.dims();

        if DT + 1 != D {
            return Err(FrontendError::ShapeMismatch {
                message: format!(
                    "{DT}D target tensor expects {}D input tensors, but found inputs with sizes {dims1:?} and {dims2:?}.",
                    DT + 1
                ),
            });
        }
        if DT >= 2 {
            return Err(FrontendError::ShapeMismatch {
                message: "0D or 1D target tensor expected, multi-target not supported".to_string(),
            });
        }
        if dims1 != dims2 {
            return Err(FrontendError::InvalidTensorShape {
                expected: format!("{dims1:?}"),
                actual: format!("{dims2:?}"),
            });
        }

        // Only `[N, M]` inputs with an `[N]` target, or `[M]` inputs with a
        // single-element target, get past the checks above.
        let (batch_size, features) = match dims1.as_slice() {
            [batch_size, features] => (*batch_size, *features),
            _ => (1, dims1.iter().product()),
        };
        let target_len = target.shape().num_elements();
        if DT == 1 && target_len != batch_size {
            return Err(FrontendError::ShapeMismatch {
                message: format!(
                    "The size of target tensor ({target_len}) must match the size of input tensor ({batch_size}) at non-singleton dimension 0"
                ),
            });
        }

        let loss = self.pairwise(
            input1.reshape([batch_size, features]),
            input2.reshape([batch_size, features]),
            target.reshape([batch_size]),
        );
        Ok(self.reduction.apply(loss))
    }

    /// Compute the criterion for a single input pair and a scalar target.
    ///
    /// # Errors
    ///
    /// Returns an error when the two inputs differ in shape.
    pub fn forward_unbatched<B: Backend>(
        &self,
        input1: Tensor<B, 1>,
        input2: Tensor<B, 1>,
        target: f64,
    ) -> FrontendResult<LossOutput<B, 1>> {
        let dims1 = input1.dims();
        let dims2 = input2.dims();
        if dims1 != dims2 {
            return Err(FrontendError::InvalidTensorShape {
                expected: format!("{dims1:?}"),
                actual: format!("{dims2:?}"),
            });
        }

        let [features] = dims1;
        let target = Tensor::<B, 1>::from_floats([target], &input1.device());
        let loss = self.pairwise(
            input1.reshape([1, features]),
            input2.reshape([1, features]),
            target,
        );
        Ok(self.reduction.apply(loss))
    }

    fn pairwise<B: Backend>(
        &self,
        input1: Tensor<B, 2>,
        input2: Tensor<B, 2>,
        target: Tensor<B, 1>,
    ) -> Tensor<B, 1> {
        let [batch_size, _] = input1.dims();

        let dot = (input1.clone() * input2.clone()).sum_dim(1);
        let norm1 = input1.powi_scalar(2).sum_dim(1).sqrt();
        let norm2 = input2.powi_scalar(2).sum_dim(1).sqrt();
        let cos = (dot / (norm1 * norm2).clamp_min(COSINE_EPS)).reshape([batch_size]);

        let similar = target.clone().equal_elem(1.0);
        let dissimilar = target.equal_elem(-1.0);

        let dissimilar_loss = maximum_scalar(cos.clone().sub_scalar(self.margin), 0.0);
        cos.zeros_like()
            .mask_where(similar, cos.neg().add_scalar(1.0))
            .mask_where(dissimilar, dissimilar_loss)
    }
}

/// Configuration for creating a [Hinge embedding loss](HingeEmbeddingLoss).
#[derive(Config, Debug)]
pub struct HingeEmbeddingLossConfig {
    /// Distance under which dissimilar pairs are penalized. Default: 1.0
    #[config(default = 1.0)]
    pub margin: f64,
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

impl_reduction_args!(HingeEmbeddingLossConfig);

impl HingeEmbeddingLossConfig {
    /// Initialize [Hinge embedding loss](HingeEmbeddingLoss).
    pub fn init(&self) -> FrontendResult<HingeEmbeddingLoss> {
        Ok(HingeEmbeddingLoss {
            margin: self.margin,
            reduction: Ignored(self.reduction_mode()?),
        })
    }
}

/// Hinge loss on a distance input with ±1 similarity labels.
#[derive(Module, Clone, Debug)]
#[module(custom_display)]
pub struct HingeEmbeddingLoss {
    /// Distance under which dissimilar pairs are penalized.
    pub margin: f64,
    /// Reduction applied by [`HingeEmbeddingLoss::forward`].
    pub reduction: Ignored<ReductionMode>,
}

impl Default for HingeEmbeddingLoss {
    fn default() -> Self {
        Self {
            margin: 1.0,
            reduction: Ignored(ReductionMode::Mean),
        }
    }
}

impl ModuleDisplay for HingeEmbeddingLoss {
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

impl HingeEmbeddingLoss {
    /// Create a new hinge embedding loss with unit margin and mean reduction.
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
        assert_same_shape("HingeEmbeddingLoss", &input, &target);

        let similar = target.clone().equal_elem(1.0);
        let dissimilar = target.equal_elem(-1.0);

        let dissimilar_loss = maximum_scalar(input.clone().neg().add_scalar(self.margin), 0.0);
        maximum_scalar(input.clone(), self.margin)
            .mask_where(dissimilar, dissimilar_loss)
            .mask_where(similar, input)
    }
}
