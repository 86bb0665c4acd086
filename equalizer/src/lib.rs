mod config;
mod diff;
mod equalize;
mod error;
mod histogram;
mod io;
mod orchestrator;
mod pixel;
mod pixel_buffer;
mod region;

#[cfg(test)]
mod test_utils;

pub mod prelude;

pub use prelude::*;
