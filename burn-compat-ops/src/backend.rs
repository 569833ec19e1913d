//! Backend selection for the compatibility layer.
//!
//! The functions in this crate are generic over any Burn backend. Callers that
//! only want "whichever backend is currently selected" can use the aliases
//! below, which are resolved from cargo features (`cuda`, then `wgpu`, then
//! `ndarray`).

use cfg_if::cfg_if;

cfg_if! {
    if #[cfg(feature = "cuda")] {
        use burn::backend::cuda::{Cuda, CudaDevice};

        /// Selected backend type
        pub type SelectedBackend = Cuda;
        /// Selected device type
        pub type SelectedDevice = CudaDevice;

        /// Gets the backend name for logging purposes
        pub const fn backend_name() -> &'static str {
            "CUDA (NVIDIA GPU)"
        }
    } else if #[cfg(feature = "wgpu")] {
        use burn::backend::wgpu::{Wgpu, WgpuDevice};

        /// Selected backend type
        pub type SelectedBackend = Wgpu;
        /// Selected device type
        pub type SelectedDevice = WgpuDevice;

        /// Gets the backend name for logging purposes
        pub const fn backend_name() -> &'static str {
            "WGPU (GPU)"
        }
    } else {
        use burn::backend::ndarray::{NdArray, NdArrayDevice};

        /// Selected backend type
        pub type SelectedBackend = NdArray;
        /// Selected device type
        pub type SelectedDevice = NdArrayDevice;

        /// Gets the backend name for logging purposes
        pub const fn backend_name() -> &'static str {
            "NdArray (CPU)"
        }
    }
}

/// Creates the default device for the selected backend.
pub fn create_device() -> SelectedDevice {
    tracing::debug!(backend = backend_name(), "creating default device");
    SelectedDevice::default()
}

#[cfg(test)]
mod tests {
    use burn::prelude::*;

    use super::*;
    use crate::ones;

    #[test]
    fn selected_backend_creates_tensors() {
        let device = create_device();
        let tensor = ones::<SelectedBackend, 2, Float>([2, 2], &device);

        assert_eq!(tensor.dims(), [2, 2]);
        assert!(!backend_name().is_empty());
    }
}
