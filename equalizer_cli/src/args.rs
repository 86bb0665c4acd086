//! Command-line arguments and their layering over the YAML config.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use equalizer::{EqualizeConfig, Normalization, Region};


/// Equalize - Parallel per-channel histogram equalization
#[derive(Debug, Parser)]
#[command(name = "equalizer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Image to equalize (ppm, pnm, png, jpg)
    pub input: PathBuf,

    /// Where to write the equalized image (ppm, png, jpg)
    pub output: PathBuf,

    /// Compare the written output against this image
    pub reference: Option<PathBuf>,

    /// Region to equalize as x,y,width,height (default: whole image)
    #[arg(long, value_name = "X,Y,W,H", value_parser = parse_roi)]
    pub roi: Option<Region>,

    /// Worker threads (default: hardware concurrency)
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// Row bands for the histogram pass (default: one per worker)
    #[arg(long, value_name = "N")]
    pub histogram_bands: Option<usize>,

    /// Row bands for the remap pass (default: one per worker)
    #[arg(long, value_name = "N")]
    pub remap_bands: Option<usize>,

    /// Pixel count used to scale remapped values: region or image
    #[arg(long)]
    pub normalization: Option<Normalization>,

    /// YAML config file; flags override its values
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Also write daily-rotated logs into this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
}

impl Cli {
    /// Defaults, then the config file, then explicit flags.
    pub fn resolve_config(&self) -> anyhow::Result<EqualizeConfig> {
        let mut config = match &self.config {
            Some(path) => EqualizeConfig::from_yaml_file(path)
                .with_context(|| format!("Failed to load config '{}'", path.display()))?,
            None => EqualizeConfig::default(),
        };

        if self.threads.is_some() {
            config.threads = self.threads;
        }
        if self.histogram_bands.is_some() {
            config.histogram_bands = self.histogram_bands;
        }
        if self.remap_bands.is_some() {
            config.remap_bands = self.remap_bands;
        }
        if let Some(normalization) = self.normalization {
            config.normalization = normalization;
        }

        config.validate().context("Invalid configuration")?;
        Ok(config)
    }

    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn,common::scope_timer=info",
            v => common::log_setup::level_for_verbosity(v),
        }
    }
}

fn parse_roi(value: &str) -> Result<Region, String> {
    let parts = value
        .split(',')
        .map(|part| part.trim().parse::<usize>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("'{value}': {e}"))?;

    match parts.as_slice() {
        &[x, y, width, height] => Ok(Region::new(x, y, width, height)),
        _ => Err(format!(
            "'{value}': expected 4 comma-separated values x,y,width,height"
        )),
    }
}
