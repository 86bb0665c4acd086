use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Normalized RGB triple, each component expected in `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pixel {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Pixel {
    pub const BLACK: Pixel = Pixel::new(0.0, 0.0, 0.0);

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub const fn gray(value: f64) -> Self {
        Self::new(value, value, value)
    }

    #[inline]
    pub fn channel(&self, channel: Channel) -> f64 {
        match channel {
            Channel::Red => self.r,
            Channel::Green => self.g,
            Channel::Blue => self.b,
        }
    }

    #[inline]
    pub fn set_channel(&mut self, channel: Channel, value: f64) {
        match channel {
            Channel::Red => self.r = value,
            Channel::Green => self.g = value,
            Channel::Blue => self.b = value,
        }
    }

    /// Largest absolute per-channel difference.
    #[inline]
    pub fn max_channel_diff(&self, other: &Pixel) -> f64 {
        (self.r - other.r)
            .abs()
            .max((self.g - other.g).abs())
            .max((self.b - other.b).abs())
    }
}

/// Color channel selector.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];
}
