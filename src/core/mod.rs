// Core module: constants, configuration and input handling shared by the codecs
pub mod config;
pub mod constants;
pub mod units;
pub mod validation;

// Re-export commonly used types
pub use config::{CodecConfig, ConfigError, FrequencyBand, RangePolicy};
pub use constants::*;
pub use units::{format_mhz, parse_code, parse_frequency, UnitError};
pub use validation::ValidationMessage;
