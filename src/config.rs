//! JSON configuration for the sharpen filter.
//!
//! Every field is optional; missing fields fall back to the standard sharpen
//! kernel, the mid-gray boundary fallback and sequential processing.
//!
//! ```json
//! {
//!   "kernel": [[0, -1, 0], [-1, 5, -1], [0, -1, 0]],
//!   "fallback": 128,
//!   "parallel": true
//! }
//! ```

use std::fs;
use std::path::Path;

use log::debug;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::filters::convolve::{ConvolutionEngine, DEFAULT_FALLBACK};
use crate::filters::kernel::{Kernel, SHARPEN_KERNEL};

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SharpenConfig {
    /// Kernel rows; must form an odd-sized square with a non-zero sum.
    pub kernel: Vec<Vec<f32>>,
    /// Channel value used for taps outside the image (0-255 scale).
    pub fallback: f32,
    pub parallel: bool,
}

impl Default for SharpenConfig {
    fn default() -> Self {
        Self {
            kernel: SHARPEN_KERNEL.iter().map(|row| row.to_vec()).collect(),
            fallback: DEFAULT_FALLBACK,
            parallel: false,
        }
    }
}

impl SharpenConfig {
    pub fn from_json_str(data: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(data)?)
    }

    /// Build the engine this config describes.
    pub fn build_engine(&self) -> Result<ConvolutionEngine, ConfigError> {
        let kernel = Kernel::from_rows(&self.kernel)?;
        debug!(
            "SharpenConfig::build_engine size={} weight={} fallback={} parallel={}",
            kernel.size(),
            kernel.weight(),
            self.fallback,
            self.parallel
        );
        let engine = ConvolutionEngine::new(kernel)
            .with_fallback(self.fallback)?
            .with_parallel(self.parallel);
        Ok(engine)
    }
}

pub fn load_config(path: &Path) -> Result<SharpenConfig, ConfigError> {
    let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    SharpenConfig::from_json_str(&data)
}
