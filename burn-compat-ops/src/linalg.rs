//! Vector and matrix products.

use burn::prelude::*;

use crate::error::{CompatOpsError, CompatOpsResult};

/// Returns the cross product of (batches of) vectors in R^3.
///
/// The vectors are read from the last axis of `x1` and `x2`, which must have
/// three components. Both operands must share the same shape.
pub fn cross<B: Backend, const D: usize>(
    x1: Tensor<B, D>,
    x2: Tensor<B, D>,
) -> CompatOpsResult<Tensor<B, D>> {
    let lhs = x1.dims();
    let rhs = x2.dims();
    if lhs != rhs {
        return Err(CompatOpsError::ShapeMismatch {
            lhs: lhs.to_vec(),
            rhs: rhs.to_vec(),
        });
    }

    let axis = D - 1;
    if lhs[axis] != 3 {
        return Err(CompatOpsError::InvalidCrossDimension { actual: lhs[axis] });
    }

    let component = |t: &Tensor<B, D>, i: usize| t.clone().narrow(axis, i, 1);
    let (a0, a1, a2) = (component(&x1, 0), component(&x1, 1), component(&x1, 2));
    let (b0, b1, b2) = (component(&x2, 0), component(&x2, 1), component(&x2, 2));

    let c0 = a1.clone() * b2.clone() - a2.clone() * b1.clone();
    let c1 = a2 * b0.clone() - a0.clone() * b2;
    let c2 = a0 * b1 - a1 * b0;

    Ok(Tensor::cat(vec![c0, c1, c2], axis))
}

/// Computes the matrix product of `x1` and `x2`.
///
/// Leading axes are treated as batch axes by the backend.
pub fn matmul<B: Backend, const D: usize>(x1: Tensor<B, D>, x2: Tensor<B, D>) -> Tensor<B, D> {
    x1.matmul(x2)
}
