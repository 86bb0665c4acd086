// Pixels and buffers
pub use crate::pixel::{Channel, Pixel};
pub use crate::pixel_buffer::PixelBuffer;
pub use crate::region::Region;

// Error handling
pub use crate::error::{EngineError, Result};

// Configuration
pub use crate::config::{ConfigError, EqualizeConfig, Normalization};

// Histograms and remapping
pub use crate::equalize::ChannelEqualizer;
pub use crate::histogram::{quantize, CumulativeDistribution, Histogram, BIN_COUNT};

// Engine
pub use crate::orchestrator::{equalize, Equalizer};

// Image files
pub use crate::diff::{compare_files, max_pixel_diff, DiffError};
pub use crate::io::{
    pixel_buffer_from_rgb8, pixel_buffer_to_rgb8, read_image, save_image, to_8bit, ImageIoError,
    READ_EXTENSIONS, WRITE_EXTENSIONS,
};
