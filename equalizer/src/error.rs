use thiserror::Error;

use crate::config::ConfigError;
use crate::region::Region;

/// Errors reported by the equalization engine.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Pixel ({x}, {y}) is outside the {width}x{height} buffer")]
    IndexOutOfRange {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("Region {region} does not fit in the {width}x{height} image")]
    InvalidRegion {
        region: Region,
        width: usize,
        height: usize,
    },

    #[error("Equalization worker failed: {0}")]
    WorkerFailure(String),

    #[error("Pixel buffer construction failed: {0}")]
    BufferSize(#[from] common::SizeMismatch),

    #[error("Invalid equalizer configuration: {0}")]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, EngineError>;
