//! Tensor creation: ones and identity matrices.

use burn::{
    prelude::*,
    tensor::{Element, Numeric},
};

use crate::error::{CompatOpsError, CompatOpsResult};

/// Returns a new tensor of the given shape filled with ones.
///
/// The tensor kind `K` (`Float` or `Int`) selects the element type, the
/// concrete precision is owned by the backend.
pub fn ones<B, const D: usize, K>(shape: [usize; D], device: &B::Device) -> Tensor<B, D, K>
where
    B: Backend,
    K: Numeric<B>,
    K::Elem: Element,
{
    Tensor::ones(shape, device)
}

/// Returns the `n x n` identity matrix.
pub fn eye<B: Backend>(n: usize, device: &B::Device) -> Tensor<B, 2> {
    let indices = Tensor::<B, 1, Int>::arange(0..n as i64, device);
    let rows = indices
        .clone()
        .reshape::<2, _>(Shape::new([n, 1]))
        .expand::<2, _>(Shape::new([n, n]));
    let cols = indices
        .reshape::<2, _>(Shape::new([1, n]))
        .expand::<2, _>(Shape::new([n, n]));

    rows.equal(cols).float()
}

/// Returns an identity matrix broadcast over `batch_shape`.
///
/// The output has shape `[...batch_shape, n, n]`, so `D` must equal
/// `batch_shape.len() + 2`.
pub fn identity<B: Backend, const D: usize>(
    n: usize,
    batch_shape: &[usize],
    device: &B::Device,
) -> CompatOpsResult<Tensor<B, D>> {
    if batch_shape.len() + 2 != D {
        return Err(CompatOpsError::InvalidBatchShape {
            batch_shape: batch_shape.to_vec(),
            rank: D,
        });
    }

    let mut view = vec![1; batch_shape.len()];
    view.extend([n, n]);
    let mut full = batch_shape.to_vec();
    full.extend([n, n]);

    Ok(eye::<B>(n, device)
        .reshape::<D, _>(Shape::from(view))
        .expand::<D, _>(Shape::from(full)))
}
