//! Convolution filters for RGB images.
//!
//! ## Supported Formats
//!
//! | Format | Shape | Type | Description |
//! |--------|-------|------|-------------|
//! | RGB8 | (H, W, 3) | u8 | Red, green, blue, 0-255 |
//! | RGB float | (H, W, 3) | f32 | Red, green, blue, 0.0-1.0 |
//!
//! Inputs with any other channel count are rejected with
//! [`FilterError::DimensionMismatch`](crate::error::FilterError::DimensionMismatch).
//!
//! ## Architecture
//!
//! - **kernel** - validated odd-sized square kernels and their weight
//! - **convolve** - [`ConvolutionEngine`](convolve::ConvolutionEngine), per-pixel
//!   kernel application with a fixed out-of-bounds fallback
//! - **sharpen** - the 3x3 sharpen filter built on the engine
//!
//! Inputs are borrowed read-only; every call allocates a fresh output.
//! Rows can be distributed with rayon; the result is identical either way.

pub mod kernel;
pub mod convolve;
pub mod sharpen;
