//! Square convolution kernels.
//!
//! A kernel is an odd-sized square matrix of `f32` weights. Its `weight`
//! (the sum of all coefficients) is the normalization divisor applied to
//! every convolution result, so a kernel whose coefficients cancel out is
//! rejected at construction time.

use ndarray::{arr2, Array2};

use crate::error::FilterError;

/// Sharpening kernel coefficients.
///
/// ```text
///  0 -1  0
/// -1  5 -1
///  0 -1  0
/// ```
pub const SHARPEN_KERNEL: [[f32; 3]; 3] = [
    [0.0, -1.0, 0.0],
    [-1.0, 5.0, -1.0],
    [0.0, -1.0, 0.0],
];

/// Immutable odd-sized square kernel with a cached normalization weight.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel {
    coefficients: Array2<f32>,
    weight: f32,
}

impl Kernel {
    /// Build a kernel from a square matrix of coefficients.
    ///
    /// Fails with [`FilterError::InvalidKernel`] if the matrix is empty, not
    /// square, of even side length, or if its coefficients sum to zero (or to
    /// a non-finite value).
    pub fn new(coefficients: Array2<f32>) -> Result<Self, FilterError> {
        let (rows, cols) = coefficients.dim();
        if rows == 0 || cols == 0 {
            return Err(FilterError::invalid_kernel("kernel is empty"));
        }
        if rows != cols {
            return Err(FilterError::invalid_kernel(format!(
                "kernel must be square (got {rows}x{cols})"
            )));
        }
        if rows % 2 == 0 {
            return Err(FilterError::invalid_kernel(format!(
                "kernel size must be odd (got {rows})"
            )));
        }

        let weight: f32 = coefficients.sum();
        if !weight.is_finite() {
            return Err(FilterError::invalid_kernel("kernel weight is not finite"));
        }
        if weight == 0.0 {
            return Err(FilterError::invalid_kernel("kernel weight should not be zero"));
        }

        Ok(Self { coefficients, weight })
    }

    /// Build a kernel from nested rows, as found in a config file.
    pub fn from_rows(rows: &[Vec<f32>]) -> Result<Self, FilterError> {
        let size = rows.len();
        if let Some(row) = rows.iter().find(|row| row.len() != size) {
            return Err(FilterError::invalid_kernel(format!(
                "kernel must be square (got a row of {} in a {size}-row kernel)",
                row.len()
            )));
        }

        let flat: Vec<f32> = rows.iter().flatten().copied().collect();
        let coefficients = Array2::from_shape_vec((size, size), flat)
            .map_err(|e| FilterError::invalid_kernel(e.to_string()))?;
        Self::new(coefficients)
    }

    /// The fixed 3x3 sharpen kernel (weight 1).
    pub fn sharpen() -> Self {
        let coefficients = arr2(&SHARPEN_KERNEL);
        let weight = coefficients.sum();
        Self { coefficients, weight }
    }

    /// Side length of the kernel.
    pub fn size(&self) -> usize {
        self.coefficients.nrows()
    }

    /// Half the side length, rounded down (the kernel radius).
    pub fn half(&self) -> usize {
        self.size() / 2
    }

    /// Sum of all coefficients.
    pub fn weight(&self) -> f32 {
        self.weight
    }

    /// Coefficient at kernel row `ky`, column `kx`.
    #[inline]
    pub fn at(&self, ky: usize, kx: usize) -> f32 {
        self.coefficients[[ky, kx]]
    }

    pub fn coefficients(&self) -> &Array2<f32> {
        &self.coefficients
    }
}

impl Default for Kernel {
    fn default() -> Self {
        Self::sharpen()
    }
}
