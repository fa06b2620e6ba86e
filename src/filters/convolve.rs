//! Kernel convolution over RGB images.
//!
//! ## Boundary Handling
//!
//! Taps that fall outside the image do not read a real neighbor. Instead a
//! fixed fallback value (mid-gray, 128 on the 0-255 scale) is substituted
//! for every channel. Only the outermost `half`-pixel band of the output is
//! affected by this value.
//!
//! ## Layout
//!
//! Buffers are row-major `(height, width, channels)` and always addressed as
//! `[[y, x, c]]`, `y` being the row and `x` the column.

use std::time::Instant;

use log::debug;
use ndarray::{Array3, ArrayView3};
use rayon::prelude::*;

use super::kernel::Kernel;
use crate::error::FilterError;

/// Channel value substituted for out-of-bounds taps (0-255 scale).
pub const DEFAULT_FALLBACK: f32 = 128.0;

/// Number of color channels the engine operates on.
pub const RGB_CHANNELS: usize = 3;

/// Applies a [`Kernel`] to every pixel of an RGB image.
///
/// The engine is immutable once built and can be shared between threads.
#[derive(Clone, Debug, PartialEq)]
pub struct ConvolutionEngine {
    kernel: Kernel,
    fallback: f32,
    parallel: bool,
}

impl ConvolutionEngine {
    /// Engine for `kernel` with the default fallback, processing rows sequentially.
    pub fn new(kernel: Kernel) -> Self {
        Self {
            kernel,
            fallback: DEFAULT_FALLBACK,
            parallel: false,
        }
    }

    /// Engine for the standard 3x3 sharpen kernel.
    pub fn sharpen() -> Self {
        Self::new(Kernel::sharpen())
    }

    /// Set the value used for taps outside the image (0-255 scale).
    ///
    /// Fails with [`FilterError::InvalidFallback`] unless the value is finite
    /// and within 0-255.
    pub fn with_fallback(mut self, fallback: f32) -> Result<Self, FilterError> {
        if !(0.0..=255.0).contains(&fallback) {
            return Err(FilterError::InvalidFallback { value: fallback });
        }
        self.fallback = fallback;
        Ok(self)
    }

    /// Distribute rows over the rayon thread pool.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }

    pub fn fallback(&self) -> f32 {
        self.fallback
    }

    pub fn parallel(&self) -> bool {
        self.parallel
    }

    /// Apply the kernel - u8 version.
    ///
    /// # Arguments
    /// * `input` - RGB image (height, width, 3), values 0-255
    ///
    /// # Returns
    /// New image of the same shape, every value clamped to 0-255
    pub fn apply_u8(&self, input: ArrayView3<u8>) -> Result<Array3<u8>, FilterError> {
        let sums = self.convolve(input, self.fallback)?;
        Ok(sums.mapv(|v| v.clamp(0.0, 255.0) as u8))
    }

    /// Apply the kernel - f32 version.
    ///
    /// The fallback is rescaled to the 0.0-1.0 range.
    ///
    /// # Arguments
    /// * `input` - RGB image (height, width, 3), values 0.0-1.0
    ///
    /// # Returns
    /// New image of the same shape, every value clamped to 0.0-1.0
    pub fn apply_f32(&self, input: ArrayView3<f32>) -> Result<Array3<f32>, FilterError> {
        let sums = self.convolve(input, self.fallback / 255.0)?;
        Ok(sums.mapv(|v| v.clamp(0.0, 1.0)))
    }

    /// Normalized, unclamped convolution of every channel.
    fn convolve<T>(&self, input: ArrayView3<T>, fallback: f32) -> Result<Array3<f32>, FilterError>
    where
        T: Copy + Into<f32> + Sync,
    {
        let (height, width, channels) = input.dim();
        if channels != RGB_CHANNELS {
            return Err(FilterError::DimensionMismatch {
                expected: format!("({height}, {width}, {RGB_CHANNELS})"),
                actual: format!("({height}, {width}, {channels})"),
            });
        }

        let start = Instant::now();
        let row_len = width * RGB_CHANNELS;
        let mut output_flat = vec![0.0f32; height * row_len];

        // Each output row is written by exactly one call
        if row_len > 0 {
            if self.parallel {
                output_flat
                    .par_chunks_mut(row_len)
                    .enumerate()
                    .for_each(|(y, row)| self.convolve_row(&input, y, fallback, row));
            } else {
                for (y, row) in output_flat.chunks_mut(row_len).enumerate() {
                    self.convolve_row(&input, y, fallback, row);
                }
            }
        }

        debug!(
            "ConvolutionEngine::apply {}x{} parallel={} took {:.3} ms",
            width,
            height,
            self.parallel,
            start.elapsed().as_secs_f64() * 1000.0
        );

        Array3::from_shape_vec((height, width, RGB_CHANNELS), output_flat).map_err(|e| {
            FilterError::DimensionMismatch {
                expected: format!("({height}, {width}, {RGB_CHANNELS})"),
                actual: e.to_string(),
            }
        })
    }

    /// Convolve output row `y` into `row` (interleaved RGB, `width * 3` values).
    fn convolve_row<T>(&self, input: &ArrayView3<T>, y: usize, fallback: f32, row: &mut [f32])
    where
        T: Copy + Into<f32>,
    {
        let (height, width, _) = input.dim();
        let size = self.kernel.size();
        let half = self.kernel.half() as isize;
        let weight = self.kernel.weight();

        for x in 0..width {
            let mut sum = [0.0f32; RGB_CHANNELS];

            for ky in 0..size {
                let sy = y as isize + ky as isize - half;
                let row_inside = sy >= 0 && sy < height as isize;

                for kx in 0..size {
                    let k = self.kernel.at(ky, kx);
                    let sx = x as isize + kx as isize - half;

                    if row_inside && sx >= 0 && sx < width as isize {
                        for (c, s) in sum.iter_mut().enumerate() {
                            let value: f32 = input[[sy as usize, sx as usize, c]].into();
                            *s += value * k;
                        }
                    } else {
                        for s in sum.iter_mut() {
                            *s += fallback * k;
                        }
                    }
                }
            }

            for (c, s) in sum.iter().enumerate() {
                row[x * RGB_CHANNELS + c] = s / weight;
            }
        }
    }
}

impl Default for ConvolutionEngine {
    fn default() -> Self {
        Self::sharpen()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    fn uniform_u8(height: usize, width: usize, value: u8) -> Array3<u8> {
        Array3::<u8>::from_elem((height, width, 3), value)
    }

    #[test]
    fn test_uniform_3x3_center_and_corner() {
        let img = uniform_u8(3, 3, 100);
        let result = ConvolutionEngine::sharpen().apply_u8(img.view()).unwrap();

        // All taps in bounds: edge taps cancel
        assert_eq!(result[[1, 1, 0]], 100);
        assert_eq!(result[[1, 1, 1]], 100);
        assert_eq!(result[[1, 1, 2]], 100);

        // Corner: 5*100 - 100 - 100 - 128 - 128 = 44
        for c in 0..3 {
            assert_eq!(result[[0, 0, c]], 44);
            assert_eq!(result[[2, 2, c]], 44);
            assert_eq!(result[[0, 2, c]], 44);
            assert_eq!(result[[2, 0, c]], 44);
        }

        // Edge center: 5*100 - 3*100 - 128 = 72
        assert_eq!(result[[0, 1, 0]], 72);
        assert_eq!(result[[1, 0, 0]], 72);
    }

    #[test]
    fn test_single_pixel() {
        let engine = ConvolutionEngine::sharpen();

        // 5*v - 4*128
        let result = engine.apply_u8(uniform_u8(1, 1, 100).view()).unwrap();
        assert_eq!(result[[0, 0, 0]], 0);

        let result = engine.apply_u8(uniform_u8(1, 1, 110).view()).unwrap();
        assert_eq!(result[[0, 0, 0]], 38);

        let result = engine.apply_u8(uniform_u8(1, 1, 200).view()).unwrap();
        assert_eq!(result[[0, 0, 0]], 255);
    }

    #[test]
    fn test_channels_independent() {
        let mut img = Array3::<u8>::zeros((1, 1, 3));
        img[[0, 0, 0]] = 110;
        img[[0, 0, 1]] = 120;
        img[[0, 0, 2]] = 130;

        let result = ConvolutionEngine::sharpen().apply_u8(img.view()).unwrap();

        assert_eq!(result[[0, 0, 0]], 38);
        assert_eq!(result[[0, 0, 1]], 88);
        assert_eq!(result[[0, 0, 2]], 138);
    }

    #[test]
    fn test_custom_fallback() {
        // With fallback equal to the image value a uniform image is unchanged everywhere
        let img = uniform_u8(4, 5, 90);
        let result = ConvolutionEngine::sharpen()
            .with_fallback(90.0)
            .unwrap()
            .apply_u8(img.view())
            .unwrap();
        assert!(result.iter().all(|&v| v == 90));
    }

    #[test]
    fn test_fallback_out_of_range_rejected() {
        for value in [f32::INFINITY, f32::NEG_INFINITY, f32::NAN, -1.0, 255.5] {
            let err = ConvolutionEngine::sharpen().with_fallback(value).unwrap_err();
            assert!(matches!(err, FilterError::InvalidFallback { .. }), "accepted {value}");
        }

        // Range limits are themselves valid
        let img = Array3::<f32>::from_elem((2, 2, 3), 0.5);
        for value in [0.0, 255.0] {
            let engine = ConvolutionEngine::sharpen().with_fallback(value).unwrap();
            let result = engine.apply_f32(img.view()).unwrap();
            assert!(result.iter().all(|v| (0.0..=1.0).contains(v)));
        }
    }

    #[test]
    fn test_weight_normalization() {
        // 3x3 box: uniform interior stays the same after dividing by 9
        let kernel = Kernel::new(arr2(&[
            [1.0, 1.0, 1.0],
            [1.0, 1.0, 1.0],
            [1.0, 1.0, 1.0],
        ]))
        .unwrap();
        let img = uniform_u8(3, 3, 60);
        let result = ConvolutionEngine::new(kernel).apply_u8(img.view()).unwrap();

        assert_eq!(result[[1, 1, 0]], 60);
        // Corner: (4*60 + 5*128) / 9 = 97.77
        assert_eq!(result[[0, 0, 0]], 97);
    }

    #[test]
    fn test_rejects_wrong_channel_count() {
        let img = Array3::<u8>::zeros((2, 2, 4));
        let err = ConvolutionEngine::sharpen().apply_u8(img.view()).unwrap_err();
        assert!(matches!(err, FilterError::DimensionMismatch { .. }));

        let gray = Array3::<f32>::zeros((2, 2, 1));
        assert!(ConvolutionEngine::sharpen().apply_f32(gray.view()).is_err());
    }

    #[test]
    fn test_empty_image() {
        let img = Array3::<u8>::zeros((0, 7, 3));
        let result = ConvolutionEngine::sharpen().apply_u8(img.view()).unwrap();
        assert_eq!(result.dim(), (0, 7, 3));

        let img = Array3::<u8>::zeros((4, 0, 3));
        let result = ConvolutionEngine::sharpen().apply_u8(img.view()).unwrap();
        assert_eq!(result.dim(), (4, 0, 3));
    }

    #[test]
    fn test_f32_matches_u8_scale() {
        let img = uniform_u8(3, 3, 102);
        let img_f32 = img.mapv(|v| v as f32 / 255.0);

        let engine = ConvolutionEngine::sharpen();
        let result = engine.apply_u8(img.view()).unwrap();
        let result_f32 = engine.apply_f32(img_f32.view()).unwrap();

        for (a, b) in result.iter().zip(result_f32.iter()) {
            assert!((*a as f32 / 255.0 - b).abs() < 0.005);
        }
    }

    #[test]
    fn test_f32_clamped() {
        let img = Array3::<f32>::from_elem((2, 2, 3), 1.0);
        let result = ConvolutionEngine::sharpen().apply_f32(img.view()).unwrap();
        assert!(result.iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mut img = Array3::<u8>::zeros((17, 23, 3));
        for ((y, x, c), v) in img.indexed_iter_mut() {
            *v = ((y * 31 + x * 17 + c * 7) % 256) as u8;
        }

        let sequential = ConvolutionEngine::sharpen().apply_u8(img.view()).unwrap();
        let parallel = ConvolutionEngine::sharpen()
            .with_parallel(true)
            .apply_u8(img.view())
            .unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_non_contiguous_view() {
        // Transposed view: (width, height) swapped, not standard layout
        let mut img = Array3::<u8>::zeros((3, 5, 3));
        img[[1, 2, 0]] = 200;
        let transposed = img.view().permuted_axes([1, 0, 2]);

        let result = ConvolutionEngine::sharpen().apply_u8(transposed).unwrap();
        let expected = ConvolutionEngine::sharpen()
            .apply_u8(transposed.as_standard_layout().view())
            .unwrap();
        assert_eq!(result.dim(), (5, 3, 3));
        assert_eq!(result, expected);
    }
}
