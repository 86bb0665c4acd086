//! Row-band partitioning and rayon helpers for image processing.

use std::num::NonZeroUsize;
use std::ops::Range;


/// Half-open range of image rows processed as one unit of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowBand {
    pub start: usize,
    pub end: usize,
}

impl RowBand {
    #[inline]
    pub fn rows(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Partition of a row range into contiguous, disjoint, non-empty bands.
///
/// Only constructible through [`RowBands::split`], so every row of the range
/// belongs to exactly one band and bands are ordered top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowBands {
    start: usize,
    rows: usize,
    bands: Vec<RowBand>,
}

impl RowBands {
    /// Splits `rows` rows beginning at `start` into at most `count` bands.
    ///
    /// Every band gets `rows / count` rows and the last one absorbs the remainder.
    /// A zero-row range yields no bands. `count` is clamped to `1..=rows`.
    pub fn split(start: usize, rows: usize, count: usize) -> Self {
        if rows == 0 {
            return Self {
                start,
                rows,
                bands: Vec::new(),
            };
        }

        let count = count.clamp(1, rows);
        let rows_per_band = rows / count;
        let bands = (0..count)
            .map(|i| {
                let band_start = start + i * rows_per_band;
                let band_end = if i + 1 == count {
                    start + rows
                } else {
                    band_start + rows_per_band
                };
                RowBand {
                    start: band_start,
                    end: band_end,
                }
            })
            .collect();

        Self { start, rows, bands }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bands.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, RowBand> {
        self.bands.iter()
    }

    #[inline]
    pub fn as_slice(&self) -> &[RowBand] {
        &self.bands
    }

    /// The full row range the bands cover.
    #[inline]
    pub fn covered_rows(&self) -> Range<usize> {
        self.start..self.start + self.rows
    }
}

impl<'a> IntoIterator for &'a RowBands {
    type Item = &'a RowBand;
    type IntoIter = std::slice::Iter<'a, RowBand>;

    fn into_iter(self) -> Self::IntoIter {
        self.bands.iter()
    }
}

/// Splits a row-major slice into one mutable slice per band.
///
/// `data` must hold exactly the rows of `bands.covered_rows()`, `width`
/// elements each. The slices are produced with `split_at_mut`, so they never
/// overlap and can be handed to different workers.
///
/// # Panics
/// Panics if `data.len()` does not match the covered rows.
pub fn split_rows_mut<'a, T>(
    data: &'a mut [T],
    width: usize,
    bands: &RowBands,
) -> Vec<(RowBand, &'a mut [T])> {
    assert_eq!(
        data.len(),
        bands.rows * width,
        "slice length must match the partitioned rows"
    );

    let mut rest = data;
    let mut out = Vec::with_capacity(bands.len());
    for band in bands {
        let (head, tail) = std::mem::take(&mut rest).split_at_mut(band.rows() * width);
        out.push((*band, head));
        rest = tail;
    }
    out
}

/// Number of worker threads the hardware supports, at least one.
pub fn default_thread_count() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// Builds a dedicated rayon pool. `None` uses hardware concurrency.
pub fn build_pool(threads: Option<usize>) -> Result<rayon::ThreadPool, rayon::ThreadPoolBuildError> {
    let threads = threads.unwrap_or_else(default_thread_count);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|idx| format!("equalizer-worker-{idx}"))
        .build()
}
