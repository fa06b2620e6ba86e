//! Error types for kernel construction, buffer validation and config loading.

use std::path::PathBuf;

use thiserror::Error;

/// Error generated when building a [`Kernel`](crate::filters::kernel::Kernel)
/// or applying a [`ConvolutionEngine`](crate::filters::convolve::ConvolutionEngine).
#[derive(Clone, Debug, PartialEq, Error)]
#[non_exhaustive]
pub enum FilterError {
    #[error("Invalid kernel: {reason}")]
    InvalidKernel {
        reason: String,
    },
    #[error("Invalid boundary fallback {value} (must be within 0-255)")]
    InvalidFallback {
        value: f32,
    },
    #[error("Image dimensions do not match (expected: {expected}, actual: {actual})")]
    DimensionMismatch {
        expected: String,
        actual: String,
    },
}

impl FilterError {
    pub(crate) fn invalid_kernel(reason: impl Into<String>) -> Self {
        Self::InvalidKernel { reason: reason.into() }
    }
}

/// Error generated by [`load_config`](crate::config::load_config).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("Failed to read config {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config")]
    Parse(#[from] serde_json::Error),
    #[error("Config describes an unusable filter")]
    Filter(#[from] FilterError),
}
