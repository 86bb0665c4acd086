use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::pixel::Pixel;
use crate::pixel_buffer::PixelBuffer;

/// Image with 8-bit levels (`k / 255`), the typical decoder output.
pub fn random_8bit_buffer(width: usize, height: usize, seed: u64) -> PixelBuffer {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut level = || rng.random_range(0..=255u8) as f64 / 255.0;
    let pixels = (0..width * height)
        .map(|_| Pixel::new(level(), level(), level()))
        .collect();
    PixelBuffer::from_pixels(width, height, pixels).unwrap()
}

/// Image with arbitrary values in `[0, 1)`.
pub fn random_buffer(width: usize, height: usize, seed: u64) -> PixelBuffer {
    let mut rng = StdRng::seed_from_u64(seed);
    let pixels = (0..width * height)
        .map(|_| Pixel::new(rng.random(), rng.random(), rng.random()))
        .collect();
    PixelBuffer::from_pixels(width, height, pixels).unwrap()
}

/// Horizontal gradient, identical in all channels.
pub fn gradient_buffer(width: usize, height: usize) -> PixelBuffer {
    let pixels = (0..height)
        .flat_map(|_| (0..width).map(move |x| Pixel::gray(x as f64 / width as f64)))
        .collect();
    PixelBuffer::from_pixels(width, height, pixels).unwrap()
}

/// Random cut points splitting `rows` into contiguous band heights.
pub fn random_band_heights(rows: usize, rng: &mut StdRng) -> Vec<usize> {
    let mut heights = Vec::new();
    let mut remaining = rows;
    while remaining > 0 {
        let h = rng.random_range(1..=remaining);
        heights.push(h);
        remaining -= h;
    }
    heights
}
