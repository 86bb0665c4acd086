//! Infrastructure shared by the equalizer crates: 2D storage, row-band
//! partitioning for rayon workers, logging setup and scope timing.

pub mod buffer2;
pub mod log_setup;
pub mod parallel;
pub mod scope_timer;
pub mod test_utils;

pub use buffer2::{Buffer2, SizeMismatch};
pub use parallel::{RowBand, RowBands};
pub use scope_timer::ScopeTimer;
