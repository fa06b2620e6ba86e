//! WebAssembly exports for the sharpen filter.
//!
//! These functions are exposed to JavaScript via wasm-bindgen and work on
//! flat interleaved RGB data (length = width * height * 3).
//!
//! ## Bit Depth Support
//!
//! - **u8**: 8-bit per channel (0-255), standard for web/display
//! - **f32**: Float per channel (0.0-1.0), for HDR/linear workflows
//!
//! Both versions share the same Rust implementation.

use ndarray::Array3;
use wasm_bindgen::prelude::*;

use crate::filters::convolve::{ConvolutionEngine, RGB_CHANNELS};
use crate::filters::sharpen::pixel_buffer_from_raw;

// ============================================================================
// Sharpen Filter - u8 (8-bit)
// ============================================================================

/// Sharpen an RGB u8 image.
///
/// # Arguments
/// * `data` - Flat array of RGB bytes (length = width * height * 3)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
///
/// # Returns
/// Flat array of sharpened RGB bytes
#[wasm_bindgen]
pub fn sharpen_rgb_wasm(
    data: &[u8],
    width: usize,
    height: usize,
) -> Result<Vec<u8>, JsValue> {
    let input = pixel_buffer_from_raw(data.to_vec(), width, height)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let result = ConvolutionEngine::sharpen()
        .apply_u8(input.view())
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(result.into_raw_vec_and_offset().0)
}

// ============================================================================
// Sharpen Filter - f32 (float)
// ============================================================================

/// Sharpen an RGB f32 image.
///
/// # Arguments
/// * `data` - Flat array of RGB floats (length = width * height * 3), values 0.0-1.0
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
///
/// # Returns
/// Flat array of sharpened RGB floats
#[wasm_bindgen]
pub fn sharpen_rgb_f32_wasm(
    data: &[f32],
    width: usize,
    height: usize,
) -> Result<Vec<f32>, JsValue> {
    let input = Array3::from_shape_vec(
        (height, width, RGB_CHANNELS),
        data.to_vec()
    ).map_err(|e| JsValue::from_str(&format!("Invalid dimensions: {e}")))?;

    let result = ConvolutionEngine::sharpen()
        .apply_f32(input.view())
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(result.into_raw_vec_and_offset().0)
}
