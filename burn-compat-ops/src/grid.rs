//! Coordinate grids.

use core::{fmt, str::FromStr};

use burn::prelude::*;

use crate::error::CompatOpsError;

/// Indexing convention of [`meshgrid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Indexing {
    /// Matrix indexing: output `i` varies along axis `i`.
    #[default]
    Ij,
    /// Cartesian indexing: the first two output axes are swapped.
    Xy,
}

impl FromStr for Indexing {
    type Err = CompatOpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ij" => Ok(Self::Ij),
            "xy" => Ok(Self::Xy),
            other => Err(CompatOpsError::InvalidIndexing {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Indexing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ij => f.write_str("ij"),
            Self::Xy => f.write_str("xy"),
        }
    }
}

/// Broadcasts `N` one-dimensional coordinate vectors onto an `N`-D grid.
///
/// With [`Indexing::Ij`] every output has shape `[len(x0), len(x1), ...]`.
/// With [`Indexing::Xy`] the first two axes are swapped, giving
/// `[len(x1), len(x0), ...]`.
pub fn meshgrid<B: Backend, const N: usize>(
    xs: &[Tensor<B, 1>; N],
    indexing: Indexing,
) -> [Tensor<B, N>; N] {
    let sizes: [usize; N] = core::array::from_fn(|i| xs[i].dims()[0]);

    core::array::from_fn(|i| {
        let mut view = [1; N];
        view[i] = sizes[i];

        let grid = xs[i]
            .clone()
            .reshape::<N, _>(Shape::new(view))
            .expand::<N, _>(Shape::new(sizes));

        match indexing {
            Indexing::Xy if N > 1 => grid.swap_dims(0, 1),
            _ => grid,
        }
    })
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
    fn indexing_parses_known_modes() {
        assert_eq!("ij".parse::<Indexing>().unwrap(), Indexing::Ij);
        assert_eq!("xy".parse::<Indexing>().unwrap(), Indexing::Xy);
        assert_eq!(Indexing::default(), Indexing::Ij);
    }

    #[test]
    fn indexing_rejects_unknown_mode() {
        let err = "yx".parse::<Indexing>().unwrap_err();
        assert_eq!(err.to_string(), "yx is not a valid indexing mode, expected 'ij' or 'xy'");
    }

    #[test]
    fn meshgrid_ij() {
        let device = Default::default();
        let x = Tensor::<TestBackend, 1>::from_floats([1.0, 2.0, 3.0], &device);
        let y = Tensor::<TestBackend, 1>::from_floats([4.0, 5.0], &device);

        let [gx, gy] = meshgrid(&[x, y], Indexing::Ij);

        assert_eq!(gx.dims(), [3, 2]);
        gx.into_data().assert_approx_eq::<FT>(
            &TensorData::from([[1.0, 1.0], [2.0, 2.0], [3.0, 3.0]]),
            Tolerance::default(),
        );
        gy.into_data().assert_approx_eq::<FT>(
            &TensorData::from([[4.0, 5.0], [4.0, 5.0], [4.0, 5.0]]),
            Tolerance::default(),
        );
    }

    #[test]
    fn meshgrid_xy_swaps_leading_axes() {
        let device = Default::default();
        let x = Tensor::<TestBackend, 1>::from_floats([1.0, 2.0, 3.0], &device);
        let y = Tensor::<TestBackend, 1>::from_floats([4.0, 5.0], &device);

        let [gx, gy] = meshgrid(&[x, y], Indexing::Xy);

        assert_eq!(gx.dims(), [2, 3]);
        gx.into_data().assert_approx_eq::<FT>(
            &TensorData::from([[1.0, 2.0, 3.0], [1.0, 2.0, 3.0]]),
            Tolerance::default(),
        );
        gy.into_data().assert_approx_eq::<FT>(
            &TensorData::from([[4.0, 4.0, 4.0], [5.0, 5.0, 5.0]]),
            Tolerance::default(),
        );
    }

    #[test]
    fn meshgrid_three_inputs() {
        let device = Default::default();
        let a = Tensor::<TestBackend, 1>::from_floats([0.0, 1.0], &device);
        let b = Tensor::<TestBackend, 1>::from_floats([0.0, 1.0, 2.0], &device);
        let c = Tensor::<TestBackend, 1>::from_floats([0.0, 1.0, 2.0, 3.0], &device);

        let [ga, gb, gc] = meshgrid(&[a, b, c], Indexing::Ij);
        assert_eq!(ga.dims(), [2, 3, 4]);
        assert_eq!(gb.dims(), [2, 3, 4]);

        // Each of the 2 * 3 rows holds 0 + 1 + 2 + 3.
        gc.sum()
            .into_data()
            .assert_approx_eq::<FT>(&TensorData::from([36.0]), Tolerance::default());
    }
}
