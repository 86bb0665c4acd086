//! Per-channel frequency tables and their cumulative distributions.

use std::ops::Range;

use crate::error::Result;
use crate::pixel::{Channel, Pixel};
use crate::pixel_buffer::PixelBuffer;
use crate::region::Region;


/// Number of quantization levels. 16-bit resolution keeps the remapping
/// error far below 8-bit display precision.
pub const BIN_COUNT: usize = u16::MAX as usize;

/// Maps a normalized channel value to its bin: `floor(v * (BIN_COUNT - 1))`,
/// clamped to `[0, BIN_COUNT - 1]`.
#[inline]
pub fn quantize(value: f64) -> usize {
    let max_bin = (BIN_COUNT - 1) as f64;
    // NaN saturates to bin 0
    (value * max_bin).floor().clamp(0.0, max_bin) as usize
}

/// Occurrence count per bin for one channel over one region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    counts: Box<[u64]>,
}

impl Default for Histogram {
    fn default() -> Self {
        Self::new()
    }
}

impl Histogram {
    pub fn new() -> Self {
        Self {
            counts: vec![0; BIN_COUNT].into_boxed_slice(),
        }
    }

    /// Sequential histogram of `channel` over `region`.
    pub fn compute(buffer: &PixelBuffer, channel: Channel, region: Region) -> Result<Self> {
        region.validate(buffer.width(), buffer.height())?;

        let mut histogram = Self::new();
        if !region.is_empty() {
            histogram.accumulate_rows(
                buffer.rows(region.rows()),
                buffer.width(),
                region.columns(),
                channel,
            );
        }
        Ok(histogram)
    }

    /// Counts `columns` of every full row in `rows` (row-major, `width` per row).
    pub(crate) fn accumulate_rows(
        &mut self,
        rows: &[Pixel],
        width: usize,
        columns: Range<usize>,
        channel: Channel,
    ) {
        for row in rows.chunks_exact(width) {
            for pixel in &row[columns.clone()] {
                self.add(pixel.channel(channel));
            }
        }
    }

    #[inline]
    pub fn add(&mut self, value: f64) {
        self.counts[quantize(value)] += 1;
    }

    /// Element-wise sum. Associative and commutative, so partial histograms
    /// can be merged in any order.
    pub fn merge(mut self, other: Histogram) -> Histogram {
        self.merge_from(&other);
        self
    }

    pub fn merge_from(&mut self, other: &Histogram) {
        for (count, &add) in self.counts.iter_mut().zip(other.counts.iter()) {
            *count += add;
        }
    }

    #[inline]
    pub fn get(&self, bin: usize) -> u64 {
        self.counts[bin]
    }

    #[inline]
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Number of bins with a non-zero count.
    pub fn occupied_bins(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }
}

/// Prefix sum of a [`Histogram`]: `cdf[i] = sum(histogram[0..=i])`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CumulativeDistribution {
    cumulative: Box<[u64]>,
}

impl CumulativeDistribution {
    pub fn from_histogram(histogram: &Histogram) -> Self {
        let cumulative = histogram
            .counts()
            .iter()
            .scan(0u64, |sum, &count| {
                *sum += count;
                Some(*sum)
            })
            .collect::<Vec<_>>()
            .into_boxed_slice();

        Self { cumulative }
    }

    #[inline]
    pub fn get(&self, bin: usize) -> u64 {
        self.cumulative[bin]
    }

    #[inline]
    pub fn as_slice(&self) -> &[u64] {
        &self.cumulative
    }

    /// Total sample count, the last element.
    #[inline]
    pub fn total(&self) -> u64 {
        self.cumulative.last().copied().unwrap_or(0)
    }
}
