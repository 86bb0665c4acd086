use std::ops::Range;

use common::Buffer2;

use crate::error::{EngineError, Result};
use crate::pixel::Pixel;

/// Row-major image of normalized RGB pixels, mutated in place by the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    inner: Buffer2<Pixel>,
}

impl PixelBuffer {
    /// Black image.
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, Pixel::BLACK)
    }

    pub fn filled(width: usize, height: usize, value: Pixel) -> Self {
        Self {
            inner: Buffer2::new_filled(width, height, value),
        }
    }

    /// Takes ownership of `pixels`; its length must be `width * height`.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Pixel>) -> Result<Self> {
        Ok(Self {
            inner: Buffer2::try_new(width, height, pixels)?,
        })
    }

    pub fn get(&self, x: usize, y: usize) -> Result<Pixel> {
        self.inner
            .get(x, y)
            .copied()
            .ok_or_else(|| self.out_of_range(x, y))
    }

    pub fn set(&mut self, x: usize, y: usize, value: Pixel) -> Result<()> {
        let err = self.out_of_range(x, y);
        let slot = self.inner.get_mut(x, y).ok_or(err)?;
        *slot = value;
        Ok(())
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.inner.width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.inner.height()
    }

    #[inline]
    pub fn area(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn pixels(&self) -> &[Pixel] {
        self.inner.pixels()
    }

    #[inline]
    pub(crate) fn rows(&self, rows: Range<usize>) -> &[Pixel] {
        self.inner.rows(rows)
    }

    #[inline]
    pub(crate) fn rows_mut(&mut self, rows: Range<usize>) -> &mut [Pixel] {
        self.inner.rows_mut(rows)
    }

    pub fn into_pixels(self) -> Vec<Pixel> {
        self.inner.into_vec()
    }

    fn out_of_range(&self, x: usize, y: usize) -> EngineError {
        EngineError::IndexOutOfRange {
            x,
            y,
            width: self.width(),
            height: self.height(),
        }
    }
}

impl From<Buffer2<Pixel>> for PixelBuffer {
    fn from(inner: Buffer2<Pixel>) -> Self {
        Self { inner }
    }
}
