//! Equalizer configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use thiserror::Error;

use crate::pixel::Channel;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yml::Error),

    #[error("'{field}' must be at least 1")]
    ZeroCount { field: &'static str },

    #[error("Channel '{channel}' is listed more than once")]
    DuplicateChannel { channel: Channel },
}

/// Pixel-count basis used to scale remapped values.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Normalization {
    /// Pixel count of the region the histogram was built over.
    #[default]
    Region,
    /// Pixel count of the whole image, even when equalizing a sub-region.
    Image,
}

impl Normalization {
    pub fn divisor(&self, region_area: usize, image_area: usize) -> u64 {
        match self {
            Normalization::Region => region_area as u64,
            Normalization::Image => image_area as u64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EqualizeConfig {
    /// Worker pool size. `None` uses hardware concurrency.
    pub threads: Option<usize>,
    /// Bands for the histogram pass. `None` uses one band per worker.
    pub histogram_bands: Option<usize>,
    /// Bands for the remap pass. `None` uses one band per worker.
    pub remap_bands: Option<usize>,
    pub normalization: Normalization,
    pub channels: Vec<Channel>,
}

impl Default for EqualizeConfig {
    fn default() -> Self {
        Self {
            threads: None,
            histogram_bands: None,
            remap_bands: None,
            normalization: Normalization::default(),
            channels: Channel::ALL.to_vec(),
        }
    }
}

impl EqualizeConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: EqualizeConfig = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let counts = [
            ("threads", self.threads),
            ("histogram_bands", self.histogram_bands),
            ("remap_bands", self.remap_bands),
        ];
        for (field, count) in counts {
            if count == Some(0) {
                return Err(ConfigError::ZeroCount { field });
            }
        }

        for (i, &channel) in self.channels.iter().enumerate() {
            if self.channels[..i].contains(&channel) {
                return Err(ConfigError::DuplicateChannel { channel });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn default_equalizes_all_channels_with_region_normalization() {
        let config = EqualizeConfig::default();
        assert_eq!(config.channels, Channel::ALL.to_vec());
        assert_eq!(config.normalization, Normalization::Region);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_yaml_falls_back_to_defaults() {
        let config = EqualizeConfig::from_yaml_str("threads: 3\nnormalization: image\n").unwrap();
        assert_eq!(config.threads, Some(3));
        assert_eq!(config.normalization, Normalization::Image);
        assert_eq!(config.remap_bands, None);
        assert_eq!(config.channels, Channel::ALL.to_vec());
    }

    #[test]
    fn yaml_channel_subset() {
        let config = EqualizeConfig::from_yaml_str("channels: [red, blue]\n").unwrap();
        assert_eq!(config.channels, vec![Channel::Red, Channel::Blue]);
    }

    #[test]
    fn zero_counts_are_rejected() {
        let err = EqualizeConfig::from_yaml_str("remap_bands: 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::ZeroCount { field: "remap_bands" }));
    }

    #[test]
    fn repeated_channel_is_rejected() {
        let err = EqualizeConfig::from_yaml_str("channels: [red, green, red]\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::DuplicateChannel {
                channel: Channel::Red
            }
        ));
        assert_eq!(err.to_string(), "Channel 'red' is listed more than once");
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let err = EqualizeConfig::from_yaml_str("threads: [nope").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn yaml_round_trip() {
        let config = EqualizeConfig {
            threads: Some(2),
            histogram_bands: Some(5),
            remap_bands: None,
            normalization: Normalization::Image,
            channels: vec![Channel::Green],
        };
        let yaml = config.to_yaml().unwrap();
        assert_eq!(EqualizeConfig::from_yaml_str(&yaml).unwrap(), config);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = EqualizeConfig::from_yaml_file("/nonexistent/equalizer.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn normalization_divisor_and_parsing() {
        assert_eq!(Normalization::Region.divisor(6, 100), 6);
        assert_eq!(Normalization::Image.divisor(6, 100), 100);
        assert_eq!(Normalization::from_str("image").unwrap(), Normalization::Image);
        assert_eq!(Normalization::Region.to_string(), "region");
    }
}
