use std::fmt;
use std::ops::Range;

use crate::error::{EngineError, Result};
use crate::pixel_buffer::PixelBuffer;

/// Axis-aligned rectangle of interest inside an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Region {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Region {
    pub const fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The whole image.
    pub fn full(buffer: &PixelBuffer) -> Self {
        Self::new(0, 0, buffer.width(), buffer.height())
    }

    #[inline]
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    pub fn columns(&self) -> Range<usize> {
        self.x..self.x + self.width
    }

    #[inline]
    pub fn rows(&self) -> Range<usize> {
        self.y..self.y + self.height
    }

    /// Checks `x + width <= image_width` and `y + height <= image_height`.
    pub fn validate(&self, image_width: usize, image_height: usize) -> Result<()> {
        let fits = |offset: usize, extent: usize, limit: usize| {
            offset
                .checked_add(extent)
                .is_some_and(|end| end <= limit)
        };

        if fits(self.x, self.width, image_width) && fits(self.y, self.height, image_height) {
            Ok(())
        } else {
            Err(EngineError::InvalidRegion {
                region: *self,
                width: image_width,
                height: image_height,
            })
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{} at ({}, {})",
            self.width, self.height, self.x, self.y
        )
    }
}
