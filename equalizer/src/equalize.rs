//! Remapping of channel values through a finalized cumulative distribution.

use std::ops::Range;

use crate::error::Result;
use crate::histogram::{quantize, CumulativeDistribution, BIN_COUNT};
use crate::pixel::{Channel, Pixel};
use crate::pixel_buffer::PixelBuffer;
use crate::region::Region;

/// Remaps one channel with a shared CDF and normalization divisor.
///
/// Each pixel's new value depends only on its old value and the CDF, so any
/// partition of a region can be remapped independently.
#[derive(Debug, Clone, Copy)]
pub struct ChannelEqualizer<'a> {
    channel: Channel,
    cdf: &'a CumulativeDistribution,
    scale: f64,
}

impl<'a> ChannelEqualizer<'a> {
    /// `divisor` is the pixel count the CDF is normalized against; it should be
    /// the pixel count of the region the histogram was built over.
    pub fn new(channel: Channel, cdf: &'a CumulativeDistribution, divisor: u64) -> Self {
        Self {
            channel,
            cdf,
            scale: BIN_COUNT as f64 * divisor as f64,
        }
    }

    #[inline]
    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// `cdf[bin(v)] / (BIN_COUNT * divisor)`
    #[inline]
    pub fn remap(&self, value: f64) -> f64 {
        self.cdf.get(quantize(value)) as f64 / self.scale
    }

    /// Remaps `columns` of every full row in `rows`; other channels are untouched.
    pub(crate) fn apply_rows(&self, rows: &mut [Pixel], width: usize, columns: Range<usize>) {
        for row in rows.chunks_exact_mut(width) {
            for pixel in &mut row[columns.clone()] {
                let value = self.remap(pixel.channel(self.channel));
                pixel.set_channel(self.channel, value);
            }
        }
    }

    /// Sequential in-place remap of `region`.
    pub fn apply(&self, buffer: &mut PixelBuffer, region: Region) -> Result<()> {
        region.validate(buffer.width(), buffer.height())?;
        if region.is_empty() {
            return Ok(());
        }

        let width = buffer.width();
        self.apply_rows(buffer.rows_mut(region.rows()), width, region.columns());
        Ok(())
    }
}
