//! Maximum per-channel difference between two images.

use std::path::Path;

use rayon::prelude::*;
use thiserror::Error;

use crate::io::{read_image, ImageIoError};
use crate::pixel_buffer::PixelBuffer;

#[derive(Debug, Error)]
pub enum DiffError {
    #[error("Image dimensions differ: {left_width}x{left_height} vs {right_width}x{right_height}")]
    DimensionMismatch {
        left_width: usize,
        left_height: usize,
        right_width: usize,
        right_height: usize,
    },

    #[error(transparent)]
    Io(#[from] ImageIoError),
}

/// Largest absolute difference of any channel of any pixel pair.
///
/// Rows are compared in parallel on the global rayon pool. Two empty images
/// of equal size differ by `0.0`.
pub fn max_pixel_diff(left: &PixelBuffer, right: &PixelBuffer) -> Result<f64, DiffError> {
    if left.width() != right.width() || left.height() != right.height() {
        return Err(DiffError::DimensionMismatch {
            left_width: left.width(),
            left_height: left.height(),
            right_width: right.width(),
            right_height: right.height(),
        });
    }

    let width = left.width();
    if width == 0 {
        return Ok(0.0);
    }

    let max = left
        .pixels()
        .par_chunks(width)
        .zip(right.pixels().par_chunks(width))
        .map(|(a, b)| {
            a.iter()
                .zip(b)
                .map(|(pa, pb)| pa.max_channel_diff(pb))
                .fold(0.0, f64::max)
        })
        .reduce(|| 0.0, f64::max);

    Ok(max)
}

/// Loads both files and returns [`max_pixel_diff`] of their contents.
pub fn compare_files<P: AsRef<Path>, Q: AsRef<Path>>(left: P, right: Q) -> Result<f64, DiffError> {
    let left = read_image(left)?;
    let right = read_image(right)?;
    max_pixel_diff(&left, &right)
}
