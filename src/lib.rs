//! Sharpen Filter
//!
//! A 3x3 high-pass convolution applied independently to each channel of an
//! RGB image, with Python bindings via PyO3 and WASM bindings for JavaScript.
//!
//! ## Image Format
//! Images are row-major `(height, width, 3)` arrays, addressed `[[y, x, c]]`:
//! - `u8`: 8-bit per channel (0-255)
//! - `f32`: Float per channel (0.0-1.0)
//!
//! ## Filter Contract
//! The input is borrowed, never modified. The output is a new image of the
//! same dimensions with every value clamped to the valid range. Neighbors
//! outside the image are replaced by a fixed fallback value (mid-gray).

pub mod config;
pub mod error;
pub mod filters;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::{load_config, SharpenConfig};
pub use error::{ConfigError, FilterError};
pub use filters::convolve::{ConvolutionEngine, DEFAULT_FALLBACK};
pub use filters::kernel::{Kernel, SHARPEN_KERNEL};
pub use filters::sharpen::{pixel_buffer_from_raw, sharpen_f32, sharpen_u8, PixelBuffer};

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray3, PyReadonlyArray2, PyReadonlyArray3};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::error::FilterError;
    use crate::filters::convolve::{ConvolutionEngine, DEFAULT_FALLBACK};
    use crate::filters::kernel::Kernel;

    fn to_py_err(err: FilterError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }

    // ========================================================================
    // Sharpen Filters
    // ========================================================================

    /// Sharpen an RGB u8 image (H, W, 3).
    ///
    /// Out-of-bounds neighbors are replaced with `fallback` (0-255 scale).
    /// Raises `ValueError` if `fallback` is outside 0-255.
    #[pyfunction]
    #[pyo3(signature = (image, fallback=DEFAULT_FALLBACK))]
    pub fn sharpen<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        fallback: f32,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let result = ConvolutionEngine::sharpen()
            .with_fallback(fallback)
            .and_then(|engine| engine.apply_u8(image.as_array()))
            .map_err(to_py_err)?;
        Ok(result.into_pyarray(py))
    }

    /// Sharpen an RGB f32 image (H, W, 3), values 0.0-1.0.
    ///
    /// `fallback` stays on the 0-255 scale and is rescaled internally.
    #[pyfunction]
    #[pyo3(signature = (image, fallback=DEFAULT_FALLBACK))]
    pub fn sharpen_f32<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, f32>,
        fallback: f32,
    ) -> PyResult<Bound<'py, PyArray3<f32>>> {
        let result = ConvolutionEngine::sharpen()
            .with_fallback(fallback)
            .and_then(|engine| engine.apply_f32(image.as_array()))
            .map_err(to_py_err)?;
        Ok(result.into_pyarray(py))
    }

    /// Convolve an RGB u8 image with a caller-supplied odd square kernel.
    ///
    /// Raises `ValueError` if the kernel weights sum to zero or `fallback`
    /// is outside 0-255.
    #[pyfunction]
    #[pyo3(signature = (image, kernel, fallback=DEFAULT_FALLBACK))]
    pub fn sharpen_with_kernel<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        kernel: PyReadonlyArray2<'py, f32>,
        fallback: f32,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let kernel = Kernel::new(kernel.as_array().to_owned()).map_err(to_py_err)?;
        let result = ConvolutionEngine::new(kernel)
            .with_fallback(fallback)
            .and_then(|engine| engine.apply_u8(image.as_array()))
            .map_err(to_py_err)?;
        Ok(result.into_pyarray(py))
    }

    /// Sharpen filter Rust extension module
    #[pymodule]
    pub fn sharpen_rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(sharpen, m)?)?;
        m.add_function(wrap_pyfunction!(sharpen_f32, m)?)?;
        m.add_function(wrap_pyfunction!(sharpen_with_kernel, m)?)?;
        m.add("DEFAULT_FALLBACK", DEFAULT_FALLBACK)?;

        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::sharpen_rust;
