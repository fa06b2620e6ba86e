use ndarray::Array3;

/// Generates a high-contrast RGB checkerboard, `(height, width, 3)`.
pub fn checkerboard_rgb(width: usize, height: usize, cell: usize) -> Array3<u8> {
    assert!(cell > 0, "cell size must be positive");

    Array3::from_shape_fn((height, width, 3), |(y, x, _)| {
        if (x / cell + y / cell) & 1 == 0 {
            32u8
        } else {
            220u8
        }
    })
}

/// Deterministic pseudo-random RGB noise covering the full 0-255 range.
pub fn noise_rgb(width: usize, height: usize, seed: u32) -> Array3<u8> {
    let mut state = seed.wrapping_mul(2_654_435_761).wrapping_add(1);
    Array3::from_shape_fn((height, width, 3), |_| {
        // xorshift32
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        (state >> 24) as u8
    })
}
