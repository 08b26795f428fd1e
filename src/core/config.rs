// Codec configuration: out-of-range handling and the advisory frequency band

use super::constants::{BAND_MAX_HZ, BAND_MIN_HZ};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid frequency band: min {min_hz} Hz is above max {max_hz} Hz")]
    InvertedBand { min_hz: u64, max_hz: u64 },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// What to do with an input that does not fit the register width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangePolicy {
    /// Return an out-of-range error
    #[default]
    Reject,
    /// Clamp to the nearest representable value
    Saturate,
    /// Truncate to the register width (the behavior of the bare arithmetic)
    Wrap,
}

/// Frequency range the radio is expected to operate in.
/// Only used for validation warnings, never for rejecting input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyBand {
    #[serde(default = "default_band_min")]
    pub min_hz: u64,

    #[serde(default = "default_band_max")]
    pub max_hz: u64,
}

fn default_band_min() -> u64 {
    BAND_MIN_HZ
}

fn default_band_max() -> u64 {
    BAND_MAX_HZ
}

impl Default for FrequencyBand {
    fn default() -> Self {
        Self {
            min_hz: BAND_MIN_HZ,
            max_hz: BAND_MAX_HZ,
        }
    }
}

impl FrequencyBand {
    pub fn new(min_hz: u64, max_hz: u64) -> Result<Self> {
        if min_hz > max_hz {
            return Err(ConfigError::InvertedBand { min_hz, max_hz });
        }
        Ok(Self { min_hz, max_hz })
    }

    pub fn contains(&self, hz: u64) -> bool {
        (self.min_hz..=self.max_hz).contains(&hz)
    }
}

/// Configuration shared by the frequency and preamble codecs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CodecConfig {
    #[serde(default)]
    pub range_policy: RangePolicy,

    #[serde(default)]
    pub band: FrequencyBand,
}

impl CodecConfig {
    pub fn new(range_policy: RangePolicy) -> Self {
        Self {
            range_policy,
            ..Default::default()
        }
    }

    pub fn with_band(mut self, band: FrequencyBand) -> Self {
        self.band = band;
        self
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        // Re-check the band since serde bypasses FrequencyBand::new
        FrequencyBand::new(config.band.min_hz, config.band.max_hz)?;
        Ok(config)
    }

    /// Load a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        tracing::debug!("Loaded codec config from {}: {:?}", path.display(), config);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = CodecConfig::default();
        assert_eq!(config.range_policy, RangePolicy::Reject);
        assert_eq!(config.band.min_hz, 2_400_000_000);
        assert_eq!(config.band.max_hz, 2_500_000_000);
    }

    #[test]
    fn test_from_json_partial() {
        let config = CodecConfig::from_json(r#"{"range_policy": "saturate"}"#).unwrap();
        assert_eq!(config.range_policy, RangePolicy::Saturate);
        assert_eq!(config.band, FrequencyBand::default());

        let config = CodecConfig::from_json(r#"{"band": {"max_hz": 2483500000}}"#).unwrap();
        assert_eq!(config.range_policy, RangePolicy::Reject);
        assert_eq!(config.band.min_hz, 2_400_000_000);
        assert_eq!(config.band.max_hz, 2_483_500_000);

        let config = CodecConfig::from_json("{}").unwrap();
        assert_eq!(config, CodecConfig::default());
    }

    #[test]
    fn test_json_roundtrip() {
        let config = CodecConfig::new(RangePolicy::Wrap)
            .with_band(FrequencyBand::new(2_402_000_000, 2_480_000_000).unwrap());
        let json = config.to_json().unwrap();
        assert!(json.contains("\"wrap\""));
        assert_eq!(CodecConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            CodecConfig::from_json(r#"{"range_policy": "clamp"}"#),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            CodecConfig::from_json(r#"{"band": {"min_hz": 10, "max_hz": 5}}"#),
            Err(ConfigError::InvertedBand { min_hz: 10, max_hz: 5 })
        ));
        assert!(FrequencyBand::new(5, 10).is_ok());
    }

    #[test]
    fn test_band_contains() {
        let band = FrequencyBand::default();
        assert!(band.contains(2_400_000_000));
        assert!(band.contains(2_450_000_000));
        assert!(band.contains(2_500_000_000));
        assert!(!band.contains(2_399_999_999));
        assert!(!band.contains(2_500_000_001));
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"range_policy": "saturate"}}"#).unwrap();

        let config = CodecConfig::load(file.path()).unwrap();
        assert_eq!(config.range_policy, RangePolicy::Saturate);

        assert!(matches!(
            CodecConfig::load("/nonexistent/sx128x.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
