//! Cross-entropy and negative log-likelihood losses for classification.
//!
//! With class-index targets, sample `n` with class `y_n` contributes
//! ```text
//! l_n = -w[y_n] * log_softmax(x_n)[y_n]
//! ```
//! and samples whose target equals `ignore_index` contribute nothing. The
//! mean reduction divides by the summed weights of the contributing samples,
//! not by the batch size.
//!
//! Label smoothing `eps` mixes in the uniform distribution:
//! ```text
//! l_n = (1 - eps) * l_n + eps / C * sum_c(-w[c] * log_softmax(x_n)[c])
//! ```

use burn::{
    config::Config,
    module::{Content, DisplaySettings, Ignored, Module, ModuleDisplay},
    tensor::{activation::log_softmax, backend::Backend, Int, Tensor},
};

use super::{
    assert_same_shape,
    reduction::{impl_reduction_args, LossOutput, ReductionArgs, ReductionMode},
};
use crate::error::FrontendResult;

/// Configuration for creating a [Cross-entropy loss](CrossEntropyLoss).
#[derive(Config, Debug)]
pub struct CrossEntropyLossConfig {
    /// Deprecated, see [`ReductionMode::from_legacy`].
    #[config(default = "None")]
    pub size_average: Option<bool>,
    /// Target value that is skipped. Default: -100
    #[config(default = -100)]
    pub ignore_index: i64,
    /// Deprecated, see [`ReductionMode::from_legacy`].
    #[config(default = "None")]
    pub reduce: Option<bool>,
    /// Reduction applied to the output: `"none"`, `"mean"` or `"sum"`. Default: `"mean"`
    #[config(default = "String::from(\"mean\")")]
    pub reduction: String,
    /// Amount of smoothing in `[0, 1]`. Default: 0.0
    #[config(default = 0.0)]
    pub label_smoothing: f64,
}

impl_reduction_args!(CrossEntropyLossConfig);

impl CrossEntropyLossConfig {
    /// Initialize [Cross-entropy loss](CrossEntropyLoss).
    pub fn init(&self) -> FrontendResult<CrossEntropyLoss> {
        self.assertions();
        Ok(CrossEntropyLoss {
            ignore_index: self.ignore_index,
            label_smoothing: self.label_smoothing,
            reduction: Ignored(self.reduction_mode()?),
        })
    }

    fn assertions(&self) {
        assert!(
            (0.0..=1.0).contains(&self.label_smoothing),
            "label_smoothing must be between 0.0 and 1.0, got {}",
            self.label_smoothing
        );
    }
}

/// Cross-entropy between logits and class targets.
#[derive(Module, Clone, Debug)]
#[module(custom_display)]
pub struct CrossEntropyLoss {
    /// Target value that is skipped.
    pub ignore_index: i64,
    /// Amount of smoothing in `[0, 1]`.
    pub label_smoothing: f64,
    /// Reduction applied by [`CrossEntropyLoss::forward`].
    pub reduction: Ignored<ReductionMode>,
}

impl Default for CrossEntropyLoss {
    fn default() -> Self {
        Self {
            ignore_index: -100,
            label_smoothing: 0.0,
            reduction: Ignored(ReductionMode::Mean),
        }
    }
}

impl ModuleDisplay for CrossEntropyLoss {
    fn custom_settings(&self) -> Option<DisplaySettings> {
        DisplaySettings::new()
            .with_new_line_after_attribute(false)
            .optional()
    }

    fn custom_content(&self, content: Content) -> Option<Content> {
        content
            .add("ignore_index", &self.ignore_index)
            .add("label_smoothing", &self.label_smoothing)
            .add("reduction", &self.reduction.0.to_string())
            .optional()
    }
}

impl CrossEntropyLoss {
    /// Create a new cross-entropy loss with torch defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute the criterion for class-index targets.
    ///
    /// # Shapes
    ///
    /// - input: `[batch_size, num_classes]`, unnormalized logits
    /// - target: `[batch_size]`, class indices or `ignore_index`
    /// - weight: `[num_classes]`
    /// - output: `[batch_size]` for `none`, `[1]` otherwise
    pub fn forward<B: Backend>(
        &self,
        input: Tensor<B, 2>,
        target: Tensor<B, 1, Int>,
        weight: Option<Tensor<B, 1>>,
    ) -> LossOutput<B, 1> {
        let (loss, sample_weight) = self.class_index_loss(input, target, weight);
        reduce_weighted(*self.reduction, loss, sample_weight)
    }

    /// Compute the elementwise criterion for class-index targets.
    ///
    /// Ignored samples hold zero.
    pub fn forward_no_reduction<B: Backend>(
        &self,
        input: Tensor<B, 2>,
        target: Tensor<B, 1, Int>,
        weight: Option<Tensor<B, 1>>,
    ) -> Tensor<B, 1> {
        self.class_index_loss(input, target, weight).0
    }

    /// Compute the criterion for a single sample.
    ///
    /// # Shapes
    ///
    /// - input: `[num_classes]`, unnormalized logits
    /// - weight: `[num_classes]`
    /// - output: `[1]`
    pub fn forward_unbatched<B: Backend>(
        &self,
        input: Tensor<B, 1>,
        target: i64,
        weight: Option<Tensor<B, 1>>,
    ) -> LossOutput<B, 1> {
        let (input, target) = batch_of_one(input, target);
        self.forward(input, target, weight)
    }

    /// Compute the criterion for inputs with trailing spatial dimensions.
    ///
    /// The class axis is moved last and every position is scored as its own
    /// sample. `D = DT + 1` is required.
    ///
    /// # Shapes
    ///
    /// - input: `[batch_size, num_classes, d_1, ..., d_k]`, unnormalized logits
    /// - target: `[batch_size, d_1, ..., d_k]`, class indices or `ignore_index`
    /// - weight: `[num_classes]`
    /// - output: same as target for `none`, `[1]` otherwise
    pub fn forward_multidim<B: Backend, const D: usize, const DT: usize>(
        &self,
        input: Tensor<B, D>,
        target: Tensor<B, DT, Int>,
        weight: Option<Tensor<B, 1>>,
    ) -> LossOutput<B, DT> {
        let target_dims = target.dims();
        let (input, target) = flatten_class_axis("CrossEntropyLoss", input, target);
        let (loss, sample_weight) = self.class_index_loss(input, target, weight);

        reduce_weighted(
            *self.reduction,
            loss.reshape(target_dims),
            sample_weight.reshape(target_dims),
        )
    }

    /// Compute the criterion for class-probability targets.
    ///
    /// `ignore_index` does not apply. The mean reduction divides by the batch size.
    ///
    /// # Shapes
    ///
    /// - input: `[batch_size, num_classes]`, unnormalized logits
    /// - target: `[batch_size, num_classes]`, class probabilities
    /// - weight: `[num_classes]`
    /// - output: `[batch_size]` for `none`, `[1]` otherwise
    pub fn forward_probs<B: Backend>(
        &self,
        input: Tensor<B, 2>,
        target: Tensor<B, 2>,
        weight: Option<Tensor<B, 1>>,
    ) -> LossOutput<B, 1> {
        assert_same_shape("CrossEntropyLoss", &input, &target);

        let input_dims = input.dims();
        let [batch_size, num_classes] = input_dims;
        let log_probs = log_softmax(input, 1);
        let target = if self.label_smoothing > 0.0 {
            target
                .mul_scalar(1.0 - self.label_smoothing)
                .add_scalar(self.label_smoothing / num_classes as f64)
        } else {
            target
        };
        let log_probs = match weight {
            Some(weight) => {
                assert_class_weight(&weight, num_classes);
                log_probs * weight.reshape([1, num_classes]).expand(input_dims)
            }
            None => log_probs,
        };

        let loss = (log_probs * target)
            .sum_dim(1)
            .reshape([batch_size])
            .neg();
        self.reduction.apply(loss)
    }

    fn class_index_loss<B: Backend>(
        &self,
        input: Tensor<B, 2>,
        target: Tensor<B, 1, Int>,
        weight: Option<Tensor<B, 1>>,
    ) -> (Tensor<B, 1>, Tensor<B, 1>) {
        let [batch_size, num_classes] = input.dims();
        let log_probs = log_softmax(input, 1);
        let class_weight = class_weight(weight, num_classes, &log_probs.device());
        let (nll, sample_weight) = weighted_nll(
            log_probs.clone(),
            target.clone(),
            class_weight.clone(),
            self.ignore_index,
        );

        if self.label_smoothing <= 0.0 {
            return (nll, sample_weight);
        }

        let ignored = target.equal_elem(self.ignore_index);
        let class_weight = class_weight
            .reshape([1, num_classes])
            .expand([batch_size, num_classes]);
        let smooth = (log_probs * class_weight)
            .sum_dim(1)
            .reshape([batch_size])
            .neg()
            .mask_fill(ignored, 0.0);

        let loss = nll.mul_scalar(1.0 - self.label_smoothing)
            + smooth.mul_scalar(self.label_smoothing / num_classes as f64);
        (loss, sample_weight)
    }
}

/// Configuration for creating a [Negative log-likelihood loss](NllLoss).
#[derive(Config, Debug)]
pub struct NllLossConfig {
    /// Deprecated, see [`ReductionMode::from_legacy`].
    #[config(default = "None")]
    pub size_average: Option<bool>,
    /// Target value that is skipped. Default: -100
    #[config(default = -100)]
    pub ignore_index: i64,
    /// Deprecated, see [`ReductionMode::from_legacy`].
    #[config(default = "None")]
    pub reduce: Option<bool>,
    /// Reduction applied to the output: `"none"`, `"mean"` or `"sum"`. Default: `"mean"`
    #[config(default = "String::from(\"mean\")")]
    pub reduction: String,
}

impl_reduction_args!(NllLossConfig);

impl NllLossConfig {
    /// Initialize [Negative log-likelihood loss](NllLoss).
    pub fn init(&self) -> FrontendResult<NllLoss> {
        Ok(NllLoss {
            ignore_index: self.ignore_index,
            reduction: Ignored(self.reduction_mode()?),
        })
    }
}

/// Negative log-likelihood of log-probabilities at the target classes.
#[derive(Module, Clone, Debug)]
#[module(custom_display)]
pub struct NllLoss {
    /// Target value that is skipped.
    pub ignore_index: i64,
    /// Reduction applied by [`NllLoss::forward`].
    pub reduction: Ignored<ReductionMode>,
}

impl Default for NllLoss {
    fn default() -> Self {
        Self {
            ignore_index: -100,
            reduction: Ignored(ReductionMode::Mean),
        }
    }
}

impl ModuleDisplay for NllLoss {
    fn custom_settings(&self) -> Option<DisplaySettings> {
        DisplaySettings::new()
            .with_new_line_after_attribute(false)
            .optional()
    }

    fn custom_content(&self, content: Content) -> Option<Content> {
        content
            .add("ignore_index", &self.ignore_index)
            .add("reduction", &self.reduction.0.to_string())
            .optional()
    }
}

impl NllLoss {
    /// Create a new NLL loss with torch defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute the criterion with the configured reduction.
    ///
    /// # Shapes
    ///
    /// - input: `[batch_size, num_classes]`, log-probabilities
    /// - target: `[batch_size]`, class indices or `ignore_index`
    /// - weight: `[num_classes]`
    pub fn forward<B: Backend>(
        &self,
        input: Tensor<B, 2>,
        target: Tensor<B, 1, Int>,
        weight: Option<Tensor<B, 1>>,
    ) -> LossOutput<B, 1> {
        let [_, num_classes] = input.dims();
        let class_weight = class_weight(weight, num_classes, &input.device());
        let (loss, sample_weight) = weighted_nll(input, target, class_weight, self.ignore_index);

        reduce_weighted(*self.reduction, loss, sample_weight)
    }

    /// Compute the elementwise criterion. Ignored samples hold zero.
    pub fn forward_no_reduction<B: Backend>(
        &self,
        input: Tensor<B, 2>,
        target: Tensor<B, 1, Int>,
        weight: Option<Tensor<B, 1>>,
    ) -> Tensor<B, 1> {
        let [_, num_classes] = input.dims();
        let class_weight = class_weight(weight, num_classes, &input.device());

        weighted_nll(input, target, class_weight, self.ignore_index).0
    }

    /// Compute the criterion for a single sample of log-probabilities.
    ///
    /// # Shapes
    ///
    /// - input: `[num_classes]`, log-probabilities
    /// - weight: `[num_classes]`
    /// - output: `[1]`
    pub fn forward_unbatched<B: Backend>(
        &self,
        input: Tensor<B, 1>,
        target: i64,
        weight: Option<Tensor<B, 1>>,
    ) -> LossOutput<B, 1> {
        let (input, target) = batch_of_one(input, target);
        self.forward(input, target, weight)
    }

    /// Compute the criterion for inputs with trailing spatial dimensions.
    ///
    /// # Shapes
    ///
    /// - input: `[batch_size, num_classes, d_1, ..., d_k]`, log-probabilities
    /// - target: `[batch_size, d_1, ..., d_k]`, class indices or `ignore_index`
    /// - weight: `[num_classes]`
    /// - output: same as target for `none`, `[1]` otherwise
    pub fn forward_multidim<B: Backend, const D: usize, const DT: usize>(
        &self,
        input: Tensor<B, D>,
        target: Tensor<B, DT, Int>,
        weight: Option<Tensor<B, 1>>,
    ) -> LossOutput<B, DT> {
        let target_dims = target.dims();
        let (input, target) = flatten_class_axis("NllLoss", input, target);
        let [_, num_classes] = input.dims();
        let class_weight = class_weight(weight, num_classes, &input.device());
        let (loss, sample_weight) = weighted_nll(input, target, class_weight, self.ignore_index);

        reduce_weighted(
            *self.reduction,
            loss.reshape(target_dims),
            sample_weight.reshape(target_dims),
        )
    }
}

fn batch_of_one<B: Backend>(
    input: Tensor<B, 1>,
    target: i64,
) -> (Tensor<B, 2>, Tensor<B, 1, Int>) {
    let [num_classes] = input.dims();
    let target = Tensor::<B, 1, Int>::from_ints([target], &input.device());

    (input.reshape([1, num_classes]), target)
}

/// Moves the class axis of `[N, C, d_1, ..., d_k]` last and flattens every
/// other axis, giving `[N * d_1 * ... * d_k, C]` rows and matching targets.
fn flatten_class_axis<B: Backend, const D: usize, const DT: usize>(
    name: &str,
    input: Tensor<B, D>,
    target: Tensor<B, DT, Int>,
) -> (Tensor<B, 2>, Tensor<B, 1, Int>) {
    assert!(
        D >= 2 && D == DT + 1,
        "{name}: expected input rank to be target rank + 1, got {D} and {DT}"
    );

    let input_dims = input.dims();
    let target_dims = target.dims();
    let expected = input_dims
        .iter()
        .enumerate()
        .filter_map(|(axis, dim)| (axis != 1).then_some(*dim))
        .collect::<Vec<_>>();
    assert_eq!(
        target_dims.as_slice(),
        expected.as_slice(),
        "{name}: expected target size {expected:?}, got {target_dims:?}"
    );

    let num_classes = input_dims[1];
    let rows = expected.iter().product::<usize>();

    (
        input.movedim(1, D - 1).reshape([rows, num_classes]),
        target.reshape([rows]),
    )
}

fn assert_class_weight<B: Backend>(weight: &Tensor<B, 1>, num_classes: usize) {
    let [len] = weight.dims();
    assert_eq!(
        len, num_classes,
        "Class weight has {len} entries but the input has {num_classes} classes"
    );
}

fn class_weight<B: Backend>(
    weight: Option<Tensor<B, 1>>,
    num_classes: usize,
    device: &B::Device,
) -> Tensor<B, 1> {
    match weight {
        Some(weight) => {
            assert_class_weight(&weight, num_classes);
            weight
        }
        None => Tensor::ones([num_classes], device),
    }
}

/// Picks `-log_probs[n, target[n]]` scaled by the class weight.
///
/// Returns the per-sample loss and the per-sample weight, both zero for
/// ignored samples.
fn weighted_nll<B: Backend>(
    log_probs: Tensor<B, 2>,
    target: Tensor<B, 1, Int>,
    class_weight: Tensor<B, 1>,
    ignore_index: i64,
) -> (Tensor<B, 1>, Tensor<B, 1>) {
    let [batch_size, _] = log_probs.dims();
    let [target_len] = target.dims();
    assert_eq!(
        target_len, batch_size,
        "Expected target batch size ({target_len}) to match input batch size ({batch_size})"
    );

    let ignored = target.clone().equal_elem(ignore_index);
    // Ignored targets may be out of range, gather from class 0 and mask afterwards.
    let safe_target = target.mask_fill(ignored.clone(), 0);

    let sample_weight = class_weight
        .gather(0, safe_target.clone())
        .mask_fill(ignored, 0.0);
    let picked = log_probs
        .gather(1, safe_target.reshape([batch_size, 1]))
        .reshape([batch_size]);

    (picked.neg() * sample_weight.clone(), sample_weight)
}

fn reduce_weighted<B: Backend, const D: usize>(
    reduction: ReductionMode,
    loss: Tensor<B, D>,
    sample_weight: Tensor<B, D>,
) -> LossOutput<B, D> {
    match reduction {
        ReductionMode::Mean => LossOutput::Reduced(loss.sum() / sample_weight.sum()),
        mode => mode.apply(loss),
    }
}

#[cfg(test)]
mod tests {
    use burn::{
        backend::NdArray,
        tensor::{ops::FloatElem, TensorData, Tolerance, Transaction},
    };

    use super::*;

    type TestBackend = NdArray;
    type FT = FloatElem<TestBackend>;

    const LN_2: f64 = core::f64::consts::LN_2;

    #[test]
    fn cross_entropy_uniform_logits_is_log_num_classes() {
        let device = Default::default();
        let input = Tensor::<TestBackend, 2>::zeros([2, 3], &device);
        let target = Tensor::<TestBackend, 1, Int>::from_ints([0, 2], &device);

        CrossEntropyLoss::new()
            .forward(input, target, None)
            .into_data()
            .assert_approx_eq::<FT>(&TensorData::from([3.0f64.ln()]), Tolerance::default());
    }

    #[test]
    fn cross_entropy_picks_target_log_probability() {
        let device = Default::default();
        let input = Tensor::<TestBackend, 2>::from_floats([[1.0, 2.0, 3.0]], &device);
        let target = Tensor::<TestBackend, 1, Int>::from_ints([2], &device);

        let partition = 1.0f64.exp() + 2.0f64.exp() + 3.0f64.exp();
        let expected = -(3.0f64.exp() / partition).ln();
        CrossEntropyLoss::new()
            .forward_no_reduction(input, target, None)
            .into_data()
            .assert_approx_eq::<FT>(&TensorData::from([expected]), Tolerance::default());
    }

    #[test]
    fn cross_entropy_weighted_mean_divides_by_weight_sum() {
        let device = Default::default();
        let input = Tensor::<TestBackend, 2>::zeros([2, 2], &device);
        let target = Tensor::<TestBackend, 1, Int>::from_ints([0, 1], &device);
        let weight = Tensor::<TestBackend, 1>::from_floats([1.0, 3.0], &device);
        let loss = CrossEntropyLoss::new();

        let none = loss.forward_no_reduction(input.clone(), target.clone(), Some(weight.clone()));
        let mean = loss.forward(input.clone(), target.clone(), Some(weight.clone()));
        let sum = CrossEntropyLossConfig::new()
            .with_reduction("sum".into())
            .init()
            .unwrap()
            .forward(input, target, Some(weight));

        let [none, mean, sum] = Transaction::default()
            .register(none)
            .register(mean.into_reduced().unwrap())
            .register(sum.into_reduced().unwrap())
            .execute()
            .try_into()
            .expect("Correct amount of tensor data");

        none.assert_approx_eq::<FT>(&TensorData::from([LN_2, 3.0 * LN_2]), Tolerance::default());
        mean.assert_approx_eq::<FT>(&TensorData::from([LN_2]), Tolerance::default());
        sum.assert_approx_eq::<FT>(&TensorData::from([4.0 * LN_2]), Tolerance::default());
    }

    #[test]
    fn cross_entropy_skips_ignore_index() {
        let device = Default::default();
        let input = Tensor::<TestBackend, 2>::from_floats([[0.0, 0.0], [5.0, -5.0]], &device);
        let target = Tensor::<TestBackend, 1, Int>::from_ints([0, -100], &device);
        let loss = CrossEntropyLoss::new();

        loss.forward_no_reduction(input.clone(), target.clone(), None)
            .into_data()
            .assert_approx_eq::<FT>(&TensorData::from([LN_2, 0.0]), Tolerance::default());
        // Only one sample contributes to the mean.
        loss.forward(input, target, None)
            .into_data()
            .assert_approx_eq::<FT>(&TensorData::from([LN_2]), Tolerance::default());
    }

    #[test]
    fn cross_entropy_custom_ignore_index() {
        let device = Default::default();
        let input = Tensor::<TestBackend, 2>::zeros([2, 4], &device);
        let target = Tensor::<TestBackend, 1, Int>::from_ints([3, 1], &device);
        let loss = CrossEntropyLossConfig::new()
            .with_ignore_index(3)
            .with_reduction("sum".into())
            .init()
            .unwrap();

        loss.forward(input, target, None)
            .into_data()
            .assert_approx_eq::<FT>(&TensorData::from([4.0f64.ln()]), Tolerance::default());
    }

    #[test]
    fn cross_entropy_label_smoothing_matches_smoothed_probabilities() {
        let device = Default::default();
        let input = Tensor::<TestBackend, 2>::from_floats([[0.0, 3f32.ln()]], &device);
        let indices = Tensor::<TestBackend, 1, Int>::from_ints([0], &device);
        let one_hot = Tensor::<TestBackend, 2>::from_floats([[1.0, 0.0]], &device);
        let loss = CrossEntropyLossConfig::new()
            .with_label_smoothing(0.2)
            .init()
            .unwrap();

        // Smoothed target is [0.9, 0.1] against probabilities [0.25, 0.75].
        let expected = -(0.9 * 0.25f64.ln() + 0.1 * 0.75f64.ln());
        let from_indices = loss.forward(input.clone(), indices, None).into_data();
        let from_probs = loss.forward_probs(input, one_hot, None).into_data();

        from_indices.assert_approx_eq::<FT>(&TensorData::from([expected]), Tolerance::default());
        from_probs.assert_approx_eq::<FT>(&TensorData::from([expected]), Tolerance::default());
    }

    #[test]
    fn cross_entropy_probability_targets_weighted() {
        let device = Default::default();
        let input = Tensor::<TestBackend, 2>::zeros([2, 2], &device);
        let target = Tensor::<TestBackend, 2>::from_floats([[0.5, 0.5], [1.0, 0.0]], &device);
        let weight = Tensor::<TestBackend, 1>::from_floats([2.0, 0.0], &device);
        let loss = CrossEntropyLossConfig::new()
            .with_reduction("none".into())
            .init()
            .unwrap();

        loss.forward_probs(input, target, Some(weight))
            .into_data()
            .assert_approx_eq::<FT>(&TensorData::from([LN_2, 2.0 * LN_2]), Tolerance::default());
    }

    #[test]
    #[should_panic = "label_smoothing must be between 0.0 and 1.0"]
    fn cross_entropy_invalid_label_smoothing_panics() {
        let _loss = CrossEntropyLossConfig::new().with_label_smoothing(1.5).init();
    }

    #[test]
    #[should_panic = "Expected target batch size"]
    fn cross_entropy_batch_mismatch_panics() {
        let device = Default::default();
        let input = Tensor::<TestBackend, 2>::zeros([2, 3], &device);
        let target = Tensor::<TestBackend, 1, Int>::from_ints([0, 1, 2], &device);

        let _loss = CrossEntropyLoss::new().forward(input, target, None);
    }

    #[test]
    fn nll_loss_on_log_softmax_matches_cross_entropy() {
        let device = Default::default();
        let input =
            Tensor::<TestBackend, 2>::from_floats([[0.3, -1.2, 2.0], [1.0, 0.0, -1.0]], &device);
        let target = Tensor::<TestBackend, 1, Int>::from_ints([2, 0], &device);
        let weight = Tensor::<TestBackend, 1>::from_floats([0.5, 1.0, 2.0], &device);

        let expected = CrossEntropyLoss::new()
            .forward(input.clone(), target.clone(), Some(weight.clone()))
            .into_data();
        NllLoss::new()
            .forward(log_softmax(input, 1), target, Some(weight))
            .into_data()
            .assert_approx_eq::<FT>(&expected, Tolerance::default());
    }

    #[test]
    fn nll_loss_negates_selected_entries() {
        let device = Default::default();
        let input = Tensor::<TestBackend, 2>::from_floats([[-0.5, -2.0], [-1.5, -0.1]], &device);
        let target = Tensor::<TestBackend, 1, Int>::from_ints([1, 0], &device);
        let loss = NllLossConfig::new()
            .with_size_average(Some(false))
            .init()
            .unwrap();

        assert_eq!(*loss.reduction, ReductionMode::Sum);
        loss.forward_no_reduction(input.clone(), target.clone(), None)
            .into_data()
            .assert_approx_eq::<FT>(&TensorData::from([2.0, 1.5]), Tolerance::default());
        loss.forward(input, target, None)
            .into_data()
            .assert_approx_eq::<FT>(&TensorData::from([3.5]), Tolerance::default());
    }

    #[test]
    #[should_panic = "Class weight has 2 entries"]
    fn nll_loss_weight_length_mismatch_panics() {
        let device = Default::default();
        let input = Tensor::<TestBackend, 2>::zeros([1, 3], &device);
        let target = Tensor::<TestBackend, 1, Int>::from_ints([0], &device);
        let weight = Tensor::<TestBackend, 1>::from_floats([1.0, 1.0], &device);

        let _loss = NllLoss::new().forward(input, target, Some(weight));
    }

    #[test]
    fn cross_entropy_unbatched_matches_batch_of_one() {
        let device = Default::default();
        let loss = CrossEntropyLoss::new();
        let logits = [1.0, 2.0, 3.0];

        let unbatched = loss.forward_unbatched(
            Tensor::<TestBackend, 1>::from_floats(logits, &device),
            2,
            None,
        );
        let batched = loss.forward(
            Tensor::<TestBackend, 2>::from_floats([logits], &device),
            Tensor::<TestBackend, 1, Int>::from_ints([2], &device),
            None,
        );

        unbatched
            .into_data()
            .assert_approx_eq::<FT>(&batched.into_data(), Tolerance::default());
    }

    #[test]
    fn cross_entropy_spatial_scores_every_position() {
        let device = Default::default();
        // [N = 1, C = 2, d = 3]
        let input = Tensor::<TestBackend, 3>::from_floats(
            [[[0.0, 1.0, 2.0], [2.0, 1.0, 0.0]]],
            &device,
        );
        let target = Tensor::<TestBackend, 2, Int>::from_ints([[0, 1, 1]], &device);
        let loss = CrossEntropyLossConfig::new()
            .with_reduction("none".into())
            .init()
            .unwrap();

        let spatial = loss.forward_multidim(input, target, None);
        assert_eq!(spatial.dims(), vec![1, 3]);

        let ln_1p_e2 = (1.0 + 2.0f64.exp()).ln();
        spatial.into_data().assert_approx_eq::<FT>(
            &TensorData::from([[ln_1p_e2, LN_2, ln_1p_e2]]),
            Tolerance::default(),
        );
    }

    #[test]
    fn cross_entropy_spatial_matches_flattened_rows() {
        let device = Default::default();
        let input = Tensor::<TestBackend, 3>::from_floats(
            [[[0.0, 1.0, 2.0], [2.0, 1.0, 0.0]]],
            &device,
        );
        let target = Tensor::<TestBackend, 2, Int>::from_ints([[0, 1, 1]], &device);
        let rows =
            Tensor::<TestBackend, 2>::from_floats([[0.0, 2.0], [1.0, 1.0], [2.0, 0.0]], &device);
        let row_target = Tensor::<TestBackend, 1, Int>::from_ints([0, 1, 1], &device);
        let weight = Tensor::<TestBackend, 1>::from_floats([1.0, 3.0], &device);
        let loss = CrossEntropyLoss::new();

        let spatial = loss.forward_multidim(input, target, Some(weight.clone()));
        let flat = loss.forward(rows, row_target, Some(weight));

        spatial
            .into_data()
            .assert_approx_eq::<FT>(&flat.into_data(), Tolerance::default());
    }

    #[test]
    fn cross_entropy_four_dim_uniform_logits() {
        let device = Default::default();
        let input = Tensor::<TestBackend, 4>::zeros([2, 3, 2, 2], &device);
        let target = Tensor::<TestBackend, 3, Int>::zeros([2, 2, 2], &device);
        let sum = CrossEntropyLossConfig::new()
            .with_reduction("sum".into())
            .init()
            .unwrap();

        sum.forward_multidim(input, target, None)
            .into_data()
            .assert_approx_eq::<FT>(&TensorData::from([8.0 * 3.0f64.ln()]), Tolerance::default());
    }

    #[test]
    #[should_panic = "expected target size"]
    fn cross_entropy_spatial_target_mismatch_panics() {
        let device = Default::default();
        let input = Tensor::<TestBackend, 3>::zeros([1, 2, 3], &device);
        let target = Tensor::<TestBackend, 2, Int>::zeros([1, 2], &device);

        let _loss = CrossEntropyLoss::new().forward_multidim(input, target, None);
    }

    #[test]
    fn nll_loss_unbatched_negates_target_entry() {
        let device = Default::default();
        let input = Tensor::<TestBackend, 1>::from_floats([-0.5, -1.5], &device);

        NllLoss::new()
            .forward_unbatched(input, 1, None)
            .into_data()
            .assert_approx_eq::<FT>(&TensorData::from([1.5]), Tolerance::default());
    }

    #[test]
    fn nll_loss_spatial_skips_ignore_index() {
        let device = Default::default();
        // [N = 1, C = 2, d = 2]
        let input =
            Tensor::<TestBackend, 3>::from_floats([[[-1.0, -2.0], [-3.0, -4.0]]], &device);
        let target = Tensor::<TestBackend, 2, Int>::from_ints([[1, -100]], &device);
        let none = NllLossConfig::new()
            .with_reduction("none".into())
            .init()
            .unwrap();

        let [elementwise, mean] = [
            none.forward_multidim(input.clone(), target.clone(), None),
            NllLoss::new().forward_multidim(input, target, None),
        ]
        .map(LossOutput::into_data);

        elementwise.assert_approx_eq::<FT>(&TensorData::from([[3.0, 0.0]]), Tolerance::default());
        mean.assert_approx_eq::<FT>(&TensorData::from([3.0]), Tolerance::default());
    }

    #[test]
    fn cross_entropy_display_shows_settings() {
        let loss = CrossEntropyLossConfig::new()
            .with_label_smoothing(0.1)
            .init()
            .unwrap();

        assert_eq!(
            format!("{loss}"),
            "CrossEntropyLoss {ignore_index: -100, label_smoothing: 0.1, reduction: mean}"
        );
    }
}
