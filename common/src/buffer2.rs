use std::ops::Range;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("buffer of {width}x{height} needs {expected} elements, got {actual}")]
pub struct SizeMismatch {
    pub width: usize,
    pub height: usize,
    pub expected: usize,
    pub actual: usize,
}

/// Dense row-major 2D storage. `len() == width * height` for the whole lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct Buffer2<T> {
    pixels: Vec<T>,
    width: usize,
    height: usize,
}

impl<T> Buffer2<T> {
    pub fn new(width: usize, height: usize, pixels: Vec<T>) -> Self {
        assert_eq!(
            pixels.len(),
            width * height,
            "pixels length must equal width * height"
        );
        Self {
            pixels,
            width,
            height,
        }
    }

    pub fn try_new(width: usize, height: usize, pixels: Vec<T>) -> Result<Self, SizeMismatch> {
        if pixels.len() != width * height {
            return Err(SizeMismatch {
                width,
                height,
                expected: width * height,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y * self.width + x)
    }

    #[inline]
    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get_mut(y * self.width + x)
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn pixels(&self) -> &[T] {
        &self.pixels
    }

    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [T] {
        &mut self.pixels
    }

    /// Whole rows `rows.start..rows.end` as one contiguous slice.
    ///
    /// # Panics
    /// Panics if the range extends past `height`.
    #[inline]
    pub fn rows(&self, rows: Range<usize>) -> &[T] {
        assert!(rows.end <= self.height, "row range out of bounds");
        &self.pixels[rows.start * self.width..rows.end * self.width]
    }

    /// Mutable variant of [`Buffer2::rows`].
    #[inline]
    pub fn rows_mut(&mut self, rows: Range<usize>) -> &mut [T] {
        assert!(rows.end <= self.height, "row range out of bounds");
        &mut self.pixels[rows.start * self.width..rows.end * self.width]
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.pixels.iter()
    }

    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        self.pixels
    }
}

impl<T: Clone> Buffer2<T> {
    pub fn new_filled(width: usize, height: usize, value: T) -> Self {
        Self {
            pixels: vec![value; width * height],
            width,
            height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stores_dimensions() {
        let buf = Buffer2::new(3, 2, vec![10, 20, 30, 40, 50, 60]);
        assert_eq!(buf.width(), 3);
        assert_eq!(buf.height(), 2);
        assert_eq!(buf.len(), 6);
        assert!(!buf.is_empty());
    }

    #[test]
    #[should_panic(expected = "pixels length must equal width * height")]
    fn test_new_panics_on_size_mismatch() {
        Buffer2::new(3, 2, vec![1, 2, 3]);
    }

    #[test]
    fn test_try_new_reports_size_mismatch() {
        let err = Buffer2::try_new(3, 2, vec![1, 2, 3]).unwrap_err();
        assert_eq!(err.expected, 6);
        assert_eq!(err.actual, 3);
    }

    #[test]
    fn test_get_is_row_major() {
        // row 0 = [10, 20, 30], row 1 = [40, 50, 60]
        let buf = Buffer2::new(3, 2, vec![10, 20, 30, 40, 50, 60]);
        assert_eq!(buf.get(0, 0), Some(&10));
        assert_eq!(buf.get(2, 0), Some(&30));
        assert_eq!(buf.get(0, 1), Some(&40));
        assert_eq!(buf.get(2, 1), Some(&60));
    }

    #[test]
    fn test_get_out_of_bounds() {
        let buf = Buffer2::new(3, 2, vec![0; 6]);
        // (3, 0) would alias (0, 1) with unchecked row-major arithmetic
        assert_eq!(buf.get(3, 0), None);
        assert_eq!(buf.get(0, 2), None);
    }

    #[test]
    fn test_get_mut_writes_in_place() {
        let mut buf = Buffer2::new(2, 2, vec![1, 2, 3, 4]);
        *buf.get_mut(1, 0).unwrap() = 99;
        assert_eq!(buf.get(1, 0), Some(&99));
        assert_eq!(buf.get(0, 0), Some(&1));
        assert!(buf.get_mut(2, 0).is_none());
    }

    #[test]
    fn test_rows_slices_whole_rows() {
        let mut buf = Buffer2::new(2, 3, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(buf.rows(1..3), &[3, 4, 5, 6]);
        buf.rows_mut(0..1).fill(0);
        assert_eq!(buf.pixels(), &[0, 0, 3, 4, 5, 6]);
        assert!(buf.rows(2..2).is_empty());
    }

    #[test]
    #[should_panic(expected = "row range out of bounds")]
    fn test_rows_out_of_bounds_panics() {
        let buf = Buffer2::new(2, 2, vec![0; 4]);
        let _ = buf.rows(1..3);
    }

    #[test]
    fn test_new_filled() {
        let buf = Buffer2::new_filled(2, 3, 42u8);
        assert_eq!(buf.len(), 6);
        assert!(buf.iter().all(|&v| v == 42));
    }

    #[test]
    fn test_index_method() {
        let buf = Buffer2::new_filled(5, 3, 0u8);
        assert_eq!(buf.index(0, 0), 0);
        assert_eq!(buf.index(4, 0), 4);
        assert_eq!(buf.index(0, 1), 5);
        assert_eq!(buf.index(3, 2), 13);
    }
}
