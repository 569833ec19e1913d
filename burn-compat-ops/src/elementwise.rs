//! Elementwise minimum and maximum.
//!
//! The right-hand operand is broadcast to the shape of the left-hand operand
//! before the comparison, so `y` may carry size-1 axes.

use burn::{
    prelude::*,
    tensor::{Element, ElementConversion, Numeric},
};

/// Returns `x < y ? x : y` element-wise.
pub fn minimum<B, const D: usize, K>(x: Tensor<B, D, K>, y: Tensor<B, D, K>) -> Tensor<B, D, K>
where
    B: Backend,
    K: Numeric<B>,
    K::Elem: Element,
{
    let y = y.expand(x.shape());
    x.min_pair(y)
}

/// Returns `x > y ? x : y` element-wise.
pub fn maximum<B, const D: usize, K>(x: Tensor<B, D, K>, y: Tensor<B, D, K>) -> Tensor<B, D, K>
where
    B: Backend,
    K: Numeric<B>,
    K::Elem: Element,
{
    let y = y.expand(x.shape());
    x.max_pair(y)
}

/// Clips `x` so that no element exceeds `y`.
pub fn minimum_scalar<B, const D: usize, K, E>(x: Tensor<B, D, K>, y: E) -> Tensor<B, D, K>
where
    B: Backend,
    K: Numeric<B>,
    K::Elem: Element,
    E: ElementConversion,
{
    x.clamp_max(y)
}

/// Clips `x` so that no element is lower than `y`.
pub fn maximum_scalar<B, const D: usize, K, E>(x: Tensor<B, D, K>, y: E) -> Tensor<B, D, K>
where
    B: Backend,
    K: Numeric<B>,
    K::Elem: Element,
    E: ElementConversion,
{
    x.clamp_min(y)
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

    #[test]
    fn minimum_picks_smaller_element() {
        let device = Default::default();
        let x = Tensor::<TestBackend, 1>::from_floats([1.0, 5.0, -2.0], &device);
        let y = Tensor::<TestBackend, 1>::from_floats([3.0, 4.0, -2.5], &device);

        minimum(x, y)
            .into_data()
            .assert_approx_eq::<FT>(&TensorData::from([1.0, 4.0, -2.5]), Tolerance::default());
    }

    #[test]
    fn maximum_broadcasts_right_operand() {
        let device = Default::default();
        let x = Tensor::<TestBackend, 2>::from_floats([[1.0, 5.0], [-3.0, 0.5]], &device);
        let y = Tensor::<TestBackend, 2>::from_floats([[0.0, 2.0]], &device);

        maximum(x, y).into_data().assert_approx_eq::<FT>(
            &TensorData::from([[1.0, 5.0], [0.0, 2.0]]),
            Tolerance::default(),
        );
    }

    #[test]
    fn maximum_works_on_int_tensors() {
        let device = Default::default();
        let x = Tensor::<TestBackend, 1, Int>::from_ints([1, 7, -4], &device);
        let y = Tensor::<TestBackend, 1, Int>::from_ints([2, 3, -5], &device);

        let result: Vec<i64> = maximum(x, y).into_data().convert::<i64>().to_vec().unwrap();
        assert_eq!(result, vec![2, 7, -4]);
    }

    #[test]
    fn scalar_variants_clip() {
        let device = Default::default();
        let x = Tensor::<TestBackend, 1>::from_floats([-1.0, 0.5, 2.0], &device);

        maximum_scalar(x.clone(), 0.0)
            .into_data()
            .assert_approx_eq::<FT>(&TensorData::from([0.0, 0.5, 2.0]), Tolerance::default());
        minimum_scalar(x, 1.0)
            .into_data()
            .assert_approx_eq::<FT>(&TensorData::from([-1.0, 0.5, 1.0]), Tolerance::default());
    }
}
