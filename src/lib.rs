// SX128x codec: frequency and preamble register encodings for the
// Semtech SX1280/SX1281 2.4 GHz transceiver

pub mod bitwise;
pub mod core;

// Re-export commonly used types
pub use bitwise::{
    FreqError, FrequencyCodec, FrequencySetting, PackedPreamble, PreambleBits, PreambleCodec,
    PreambleEncoding, PreambleError, RegisterCode,
};
pub use self::core::{constants::*, validation, CodecConfig, FrequencyBand, RangePolicy};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_codecs_share_config() {
        let config = CodecConfig::new(RangePolicy::Saturate);
        let freq = FrequencyCodec::from_config(&config);
        let preamble = PreambleCodec::from_config(&config);
        assert_eq!(freq.policy(), RangePolicy::Saturate);
        assert_eq!(
            freq.encode_u64(u64::MAX).unwrap(),
            RegisterCode::new(CODE_ENCODER_MAX)
        );
        assert_eq!(preamble.pack(u32::MAX).unwrap().representable, PREAMBLE_MAX);
    }
}
