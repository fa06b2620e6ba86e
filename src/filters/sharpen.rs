//! Sharpen filter.
//!
//! Applies the 3x3 high-pass kernel
//!
//! ```text
//!  0 -1  0
//! -1  5 -1
//!  0 -1  0
//! ```
//!
//! to every pixel of an RGB image. The kernel weight is 1, so uniform
//! regions are left unchanged while local contrast is amplified. Border
//! pixels see the mid-gray fallback in place of their missing neighbors.

use ndarray::{Array3, ArrayView3};

use super::convolve::{ConvolutionEngine, RGB_CHANNELS};
use crate::error::FilterError;

/// Owned RGB image, `(height, width, 3)`, values 0-255.
pub type PixelBuffer = Array3<u8>;

/// Wrap interleaved RGB bytes as a [`PixelBuffer`].
///
/// Fails with [`FilterError::DimensionMismatch`] unless
/// `data.len() == width * height * 3`.
pub fn pixel_buffer_from_raw(
    data: Vec<u8>,
    width: usize,
    height: usize,
) -> Result<PixelBuffer, FilterError> {
    let expected = width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(RGB_CHANNELS))
        .ok_or_else(|| FilterError::DimensionMismatch {
            expected: format!("at most {} bytes", usize::MAX),
            actual: format!("{width}x{height} RGB"),
        })?;
    if data.len() != expected {
        return Err(FilterError::DimensionMismatch {
            expected: format!("{expected} bytes for {width}x{height} RGB"),
            actual: format!("{} bytes", data.len()),
        });
    }

    Array3::from_shape_vec((height, width, RGB_CHANNELS), data).map_err(|e| {
        FilterError::DimensionMismatch {
            expected: format!("({height}, {width}, {RGB_CHANNELS})"),
            actual: e.to_string(),
        }
    })
}

/// Sharpen an RGB image - u8 version.
///
/// # Arguments
/// * `input` - RGB image (height, width, 3)
///
/// # Returns
/// Sharpened image with the same shape
pub fn sharpen_u8(input: ArrayView3<u8>) -> Result<PixelBuffer, FilterError> {
    ConvolutionEngine::sharpen().apply_u8(input)
}

/// Sharpen an RGB image - f32 version.
///
/// # Arguments
/// * `input` - RGB image (height, width, 3), values 0.0-1.0
///
/// # Returns
/// Sharpened image with the same shape
pub fn sharpen_f32(input: ArrayView3<f32>) -> Result<Array3<f32>, FilterError> {
    ConvolutionEngine::sharpen().apply_f32(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_buffer_from_raw() {
        let data: Vec<u8> = (0..24).collect();
        let buffer = pixel_buffer_from_raw(data, 4, 2).unwrap();

        assert_eq!(buffer.dim(), (2, 4, 3));
        // Row-major: second row starts after 4 pixels
        assert_eq!(buffer[[1, 0, 0]], 12);
        assert_eq!(buffer[[0, 1, 2]], 5);
    }

    #[test]
    fn test_pixel_buffer_from_raw_mismatch() {
        let err = pixel_buffer_from_raw(vec![0; 10], 2, 2).unwrap_err();
        assert!(matches!(err, FilterError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_pixel_buffer_from_raw_overflowing_dimensions() {
        let err = pixel_buffer_from_raw(vec![], usize::MAX, 2).unwrap_err();
        assert!(matches!(err, FilterError::DimensionMismatch { .. }));

        // Width * height fits, times 3 channels does not
        let err = pixel_buffer_from_raw(vec![], usize::MAX / 2, 1).unwrap_err();
        assert!(matches!(err, FilterError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_sharpen_u8_edge_contrast() {
        // Vertical step from 50 to 150 between columns 2 and 3
        let mut img = Array3::<u8>::from_elem((5, 6, 3), 50);
        for y in 0..5 {
            for x in 3..6 {
                for c in 0..3 {
                    img[[y, x, c]] = 150;
                }
            }
        }

        let result = sharpen_u8(img.view()).unwrap();

        // Dark side darkens, bright side brightens
        assert_eq!(result[[2, 2, 0]], 0); // 5*50 - 3*50 - 150 = -50
        assert_eq!(result[[2, 3, 0]], 250); // 5*150 - 3*150 - 50 = 250
        // Interior away from the step is unchanged
        assert_eq!(result[[2, 1, 0]], 50);
        assert_eq!(result[[2, 4, 0]], 150);
    }

    #[test]
    fn test_sharpen_f32() {
        let img = Array3::<f32>::from_elem((3, 3, 3), 0.5);
        let result = sharpen_f32(img.view()).unwrap();

        assert!((result[[1, 1, 0]] - 0.5).abs() < 1e-6);
        assert_eq!(result.dim(), (3, 3, 3));
    }
}
