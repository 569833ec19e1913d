//! Smooth L1 and Huber losses.
//!
//! Both are quadratic close to zero and linear further out. With `d = |x - y|`:
//! ```text
//! smooth_l1(d) = 0.5 * d^2 / beta     if d < beta
//!                d - 0.5 * beta       otherwise
//!
//! huber(d)     = 0.5 * d^2            if d < delta
//!                delta * (d - 0.5 * delta)  otherwise
//! ```
//! so `huber = delta * smooth_l1` with `beta = delta`.

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

/// Below this `beta` the smooth L1 loss degenerates to the plain L1 loss.
const MIN_BETA: f64 = 1e-5;

/// Configuration for creating a [Smooth L1 loss](SmoothL1Loss).
#[derive(Config, Debug)]
pub struct SmoothL1LossConfig {
    /// Reduction applied to the output: `"none"`, `"mean"` or `"sum"`. Default: `"mean"`
    #[config(default = "String::from(\"mean\")")]
    pub reduction: String,
    /// Deprecated, see [`ReductionMode::from_legacy`].
    #[config(default = "None")]
    pub size_average: Option<bool>,
    /// Deprecated, see [`ReductionMode::from_legacy`].
    #[config(default = "None")]
    pub reduce: Option<bool>,
    /// Threshold between the quadratic and linear regions. Default: 1.0
    #[config(default = 1.0)]
    pub beta: f64,
}

impl_reduction_args!(SmoothL1LossConfig);

impl SmoothL1LossConfig {
    /// Initialize [Smooth L1 loss](SmoothL1Loss).
    pub fn init(&self) -> FrontendResult<SmoothL1Loss> {
        self.assertions();
        Ok(SmoothL1Loss {
            beta: self.beta,
            reduction: Ignored(self.reduction_mode()?),
        })
    }

    fn assertions(&self) {
        assert!(
            self.beta >= 0.0,
            "SmoothL1Loss does not support negative values for beta, got {}",
            self.beta
        );
    }
}

/// Smooth L1 loss.
#[derive(Module, Clone, Debug)]
#[module(custom_display)]
pub struct SmoothL1Loss {
    /// Threshold between the quadratic and linear regions.
    pub beta: f64,
    /// Reduction applied by [`SmoothL1Loss::forward`].
    pub reduction: Ignored<ReductionMode>,
}

impl Default for SmoothL1Loss {
    fn default() -> Self {
        Self {
            beta: 1.0,
            reduction: Ignored(ReductionMode::Mean),
        }
    }
}

impl ModuleDisplay for SmoothL1Loss {
    fn custom_settings(&self) -> Option<DisplaySettings> {
        DisplaySettings::new()
            .with_new_line_after_attribute(false)
            .optional()
    }

    fn custom_content(&self, content: Content) -> Option<Content> {
        content
            .add("beta", &self.beta)
            .add("reduction", &self.reduction.0.to_string())
            .optional()
    }
}

impl SmoothL1Loss {
    /// Create a new smooth L1 loss with `beta = 1` and mean reduction.
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
        assert_same_shape("SmoothL1Loss", &input, &target);

        let diff = (input - target).abs();
        if self.beta < MIN_BETA {
            // A zero beta would divide by zero in the quadratic branch.
            return diff;
        }

        let quadratic = diff.clone().powf_scalar(2.0).mul_scalar(0.5 / self.beta);
        let linear = diff.clone().sub_scalar(0.5 * self.beta);

        linear.mask_where(diff.lower_elem(self.beta), quadratic)
    }
}

/// Configuration for creating a [Huber loss](HuberLoss).
///
/// The Huber loss has no legacy `size_average` / `reduce` flags.
#[derive(Config, Debug)]
pub struct HuberLossConfig {
    /// Reduction applied to the output: `"none"`, `"mean"` or `"sum"`. Default: `"mean"`
    #[config(default = "String::from(\"mean\")")]
    pub reduction: String,
    /// Threshold between the quadratic and linear regions. Default: 1.0
    #[config(default = 1.0)]
    pub delta: f64,
}

impl ReductionArgs for HuberLossConfig {
    fn reduction(&self) -> &str {
        &self.reduction
    }
}

impl HuberLossConfig {
    /// Initialize [Huber loss](HuberLoss).
    pub fn init(&self) -> FrontendResult<HuberLoss> {
        self.assertions();
        Ok(HuberLoss {
            delta: self.delta,
            reduction: Ignored(self.reduction_mode()?),
        })
    }

    fn assertions(&self) {
        assert!(
            self.delta > 0.0,
            "HuberLoss does not support non-positive values for delta, got {}",
            self.delta
        );
    }
}

/// Huber loss.
#[derive(Module, Clone, Debug)]
#[module(custom_display)]
pub struct HuberLoss {
    /// Threshold between the quadratic and linear regions.
    pub delta: f64,
    /// Reduction applied by [`HuberLoss::forward`].
    pub reduction: Ignored<ReductionMode>,
}

impl Default for HuberLoss {
    fn default() -> Self {
        Self {
            delta: 1.0,
            reduction: Ignored(ReductionMode::Mean),
        }
    }
}

impl ModuleDisplay for HuberLoss {
    fn custom_settings(&self) -> Option<DisplaySettings> {
        DisplaySettings::new()
            .with_new_line_after_attribute(false)
            .optional()
    }

    fn custom_content(&self, content: Content) -> Option<Content> {
        content
            .add("delta", &self.delta)
            .add("reduction", &self.reduction.0.to_string())
            .optional()
    }
}

impl HuberLoss {
    /// Create a new Huber loss with `delta = 1` and mean reduction.
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
        assert_same_shape("HuberLoss", &input, &target);

        loss::HuberLossConfig::new(self.delta as f32)
            .init()
            .forward_no_reduction(input, target)
    }
}

#[cfg(test)]
mod tests {
    use burn::{
        backend::NdArray,
        tensor::{ops::FloatElem, TensorData, Tolerance},
    };

    use super::*;

    type TestBackend = NdArray;
    type FT = FloatElem<TestBackend>;

    fn diffs() -> (Tensor<TestBackend, 1>, Tensor<TestBackend, 1>) {
        let device = Default::default();
        let input = Tensor::<TestBackend, 1>::from_floats([0.5, 2.0, -3.0, 1.0], &device);
        let target = Tensor::<TestBackend, 1>::zeros([4], &device);
        (input, target)
    }

    #[test]
    fn smooth_l1_switches_at_beta() {
        let (input, target) = diffs();

        // 0.5 * 0.25, 2 - 0.5, 3 - 0.5, 1 - 0.5
        SmoothL1Loss::new()
            .forward_no_reduction(input, target)
            .into_data()
            .assert_approx_eq::<FT>(
                &TensorData::from([0.125, 1.5, 2.5, 0.5]),
                Tolerance::default(),
            );
    }

    #[test]
    fn smooth_l1_custom_beta() {
        let (input, target) = diffs();
        let loss = SmoothL1LossConfig::new().with_beta(2.0).init().unwrap();

        // 0.25 / 4, 2 - 1, 3 - 1, 1 / 4
        loss.forward_no_reduction(input, target)
            .into_data()
            .assert_approx_eq::<FT>(
                &TensorData::from([0.0625, 1.0, 2.0, 0.25]),
                Tolerance::default(),
            );
    }

    #[test]
    fn smooth_l1_tiny_beta_is_l1() {
        let (input, target) = diffs();
        let loss = SmoothL1LossConfig::new().with_beta(0.0).init().unwrap();

        loss.forward(input, target)
            .into_data()
            .assert_approx_eq::<FT>(&TensorData::from([1.625]), Tolerance::default());
    }

    #[test]
    #[should_panic = "negative values for beta"]
    fn smooth_l1_negative_beta_panics() {
        let _loss = SmoothL1LossConfig::new().with_beta(-1.0).init();
    }

    #[test]
    fn huber_matches_scaled_smooth_l1() {
        let (input, target) = diffs();
        let huber = HuberLossConfig::new().with_delta(2.0).init().unwrap();
        let smooth = SmoothL1LossConfig::new().with_beta(2.0).init().unwrap();

        let expected = smooth
            .forward_no_reduction(input.clone(), target.clone())
            .mul_scalar(2.0)
            .into_data();
        huber
            .forward_no_reduction(input, target)
            .into_data()
            .assert_approx_eq::<FT>(&expected, Tolerance::default());
    }

    #[test]
    fn huber_sum_reduction() {
        let (input, target) = diffs();
        let huber = HuberLossConfig::new()
            .with_reduction("sum".into())
            .init()
            .unwrap();

        // 0.125 + 1.5 + 2.5 + 0.5
        huber
            .forward(input, target)
            .into_data()
            .assert_approx_eq::<FT>(&TensorData::from([4.625]), Tolerance::default());
    }

    #[test]
    fn huber_rejects_unknown_reduction() {
        let err = HuberLossConfig::new()
            .with_reduction("batchmean".into())
            .init()
            .unwrap_err();

        assert_eq!(err.to_string(), "batchmean is not a valid value for reduction");
    }

    #[test]
    #[should_panic = "non-positive values for delta"]
    fn huber_zero_delta_panics() {
        let _loss = HuberLossConfig::new().with_delta(0.0).init();
    }

    #[test]
    fn huber_follows_piecewise_definition() {
        let device = Default::default();
        let input = Tensor::<TestBackend, 1>::from_floats([0.5, 2.0, -3.0, 1.0], &device);
        let target = Tensor::<TestBackend, 1>::from_floats([0.0, 0.1, 0.0, 2.5], &device);
        let huber = HuberLossConfig::new().with_delta(1.5).init().unwrap();

        // |d| = [0.5, 1.9, 3.0, 1.5]: 0.5 * 0.25, then 1.5 * (|d| - 0.75)
        huber
            .forward_no_reduction(input, target)
            .into_data()
            .assert_approx_eq::<FT>(
                &TensorData::from([0.125, 1.725, 3.375, 1.125]),
                Tolerance::default(),
            );
    }

    #[test]
    fn huber_display_shows_settings() {
        let huber = HuberLossConfig::new()
            .with_delta(0.5)
            .with_reduction("none".into())
            .init()
            .unwrap();

        assert_eq!(format!("{huber}"), "HuberLoss {delta: 0.5, reduction: none}");
    }
}
