//! Torch-compatible loss functions for the Burn deep learning framework
//!
//! Code written against `torch.nn.functional` passes its arguments in torch's
//! conventions: a `reduction` string defaulting to `"mean"`, the deprecated
//! `size_average` / `reduce` flags, and per-loss defaults such as
//! `ignore_index = -100` or `beta = 1.0`. This crate accepts those conventions
//! and runs the arithmetic on any Burn backend.
//!
//! ## Losses
//!
//! - Classification: [`CrossEntropyLoss`], [`NllLoss`], [`BinaryCrossEntropyLoss`],
//!   [`BinaryCrossEntropyWithLogitsLoss`]
//! - Regression: [`MseLoss`], [`L1Loss`], [`SmoothL1Loss`], [`HuberLoss`], [`PoissonNllLoss`]
//! - Distribution: [`KlDivLoss`] (with the extra `"batchmean"` reduction)
//! - Margin and embedding: [`SoftMarginLoss`], [`MarginRankingLoss`],
//!   [`CosineEmbeddingLoss`], [`HingeEmbeddingLoss`]
//!
//! Every loss returns a [`LossOutput`]: the elementwise tensor for
//! `reduction = "none"`, otherwise a single-element tensor.
//!
//! ## Usage Example
//!
//! ```rust
//! use burn::{backend::NdArray, tensor::Tensor};
//! use torch_frontend::{functional::mse_loss, MseLossConfig};
//!
//! let device = Default::default();
//! let input = Tensor::<NdArray, 1>::from_floats([1.0, 2.0, 3.0], &device);
//! let target = Tensor::<NdArray, 1>::from_floats([1.0, 2.0, 5.0], &device);
//!
//! let loss = mse_loss(input, target, &MseLossConfig::new().with_reduction("sum".into()))?;
//! assert!(loss.is_reduced());
//! # Ok::<(), torch_frontend::FrontendError>(())
//! ```

mod error;
pub mod functional;
pub mod losses;

pub use burn_compat_ops as ops;
pub use error::{FrontendError, FrontendResult};
pub use losses::*;
