//! Two-phase parallel equalization.
//!
//! Phase 1 builds one partial histogram per (channel, band) and reduces them
//! into a global histogram per channel. Phase 2 starts only after every
//! channel's CDF is final and remaps disjoint row bands in parallel.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::OnceLock;

use common::parallel::{build_pool, split_rows_mut};
use common::RowBands;
use rayon::prelude::*;

use crate::config::EqualizeConfig;
use crate::equalize::ChannelEqualizer;
use crate::error::{EngineError, Result};
use crate::histogram::{CumulativeDistribution, Histogram};
use crate::pixel::Channel;
use crate::pixel_buffer::PixelBuffer;
use crate::region::Region;


static DEFAULT_EQUALIZER: OnceLock<Equalizer> = OnceLock::new();

/// Equalizes every channel of `region` with the default configuration.
///
/// Runs on a process-wide engine whose pool is built on first use.
pub fn equalize(buffer: &mut PixelBuffer, region: Region) -> Result<()> {
    default_equalizer()?.equalize(buffer, region)
}

fn default_equalizer() -> Result<&'static Equalizer> {
    if let Some(engine) = DEFAULT_EQUALIZER.get() {
        return Ok(engine);
    }
    // A racing caller may build a second engine; only one is kept.
    let engine = Equalizer::new(EqualizeConfig::default())?;
    Ok(DEFAULT_EQUALIZER.get_or_init(|| engine))
}

/// Histogram-equalization engine backed by its own rayon pool.
pub struct Equalizer {
    config: EqualizeConfig,
    pool: rayon::ThreadPool,
}

impl Equalizer {
    pub fn new(config: EqualizeConfig) -> Result<Self> {
        config.validate()?;
        let pool = build_pool(config.threads)
            .map_err(|e| EngineError::WorkerFailure(format!("thread pool: {e}")))?;
        Ok(Self { config, pool })
    }

    pub fn config(&self) -> &EqualizeConfig {
        &self.config
    }

    pub fn thread_count(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Equalizes the configured channels of `region` in place.
    ///
    /// The region is validated before any work is scheduled. On
    /// `WorkerFailure` some bands may already have been written.
    pub fn equalize(&self, buffer: &mut PixelBuffer, region: Region) -> Result<()> {
        self.run(buffer, region, &self.config.channels)
    }

    pub fn equalize_channel(
        &self,
        buffer: &mut PixelBuffer,
        region: Region,
        channel: Channel,
    ) -> Result<()> {
        self.run(buffer, region, &[channel])
    }

    fn run(&self, buffer: &mut PixelBuffer, region: Region, channels: &[Channel]) -> Result<()> {
        region.validate(buffer.width(), buffer.height())?;
        if region.is_empty() || channels.is_empty() {
            return Ok(());
        }

        let threads = self.thread_count();
        let histogram_bands = RowBands::split(
            region.y,
            region.height,
            self.config.histogram_bands.unwrap_or(threads),
        );
        let remap_bands = RowBands::split(
            region.y,
            region.height,
            self.config.remap_bands.unwrap_or(threads),
        );
        let divisor = self
            .config
            .normalization
            .divisor(region.area(), buffer.area());

        tracing::debug!(
            %region,
            threads,
            histogram_bands = histogram_bands.len(),
            remap_bands = remap_bands.len(),
            divisor,
            "equalizing"
        );

        self.guarded(|| {
            let cdfs = channel_distributions(buffer, region, channels, &histogram_bands);
            remap_bands_parallel(buffer, region, &cdfs, divisor, &remap_bands);
        })
    }

    /// Runs `work` on the pool, turning a worker panic into `WorkerFailure`.
    fn guarded<R: Send>(&self, work: impl FnOnce() -> R + Send) -> Result<R> {
        panic::catch_unwind(AssertUnwindSafe(|| self.pool.install(work)))
            .map_err(|payload| EngineError::WorkerFailure(panic_message(payload.as_ref())))
    }
}

/// Phase 1: one task per (channel, band), merged with a reduction tree.
///
/// Returns only once every channel's CDF is final.
fn channel_distributions(
    buffer: &PixelBuffer,
    region: Region,
    channels: &[Channel],
    bands: &RowBands,
) -> Vec<(Channel, CumulativeDistribution)> {
    let width = buffer.width();
    channels
        .par_iter()
        .map(|&channel| {
            let histogram = bands
                .as_slice()
                .par_iter()
                .map(|band| {
                    let mut local = Histogram::new();
                    local.accumulate_rows(buffer.rows(band.range()), width, region.columns(), channel);
                    local
                })
                .reduce_with(Histogram::merge)
                .unwrap_or_default();
            (channel, CumulativeDistribution::from_histogram(&histogram))
        })
        .collect()
}

/// Phase 2: every band is a disjoint `&mut` slice, so writes need no locking.
fn remap_bands_parallel(
    buffer: &mut PixelBuffer,
    region: Region,
    cdfs: &[(Channel, CumulativeDistribution)],
    divisor: u64,
    bands: &RowBands,
) {
    let width = buffer.width();
    let equalizers: Vec<ChannelEqualizer<'_>> = cdfs
        .iter()
        .map(|(channel, cdf)| ChannelEqualizer::new(*channel, cdf, divisor))
        .collect();

    let rows = buffer.rows_mut(bands.covered_rows());
    split_rows_mut(rows, width, bands)
        .into_par_iter()
        .for_each(|(_, band_rows)| {
            for equalizer in &equalizers {
                equalizer.apply_rows(band_rows, width, region.columns());
            }
        });
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "worker panicked".to_string()
    }
}
