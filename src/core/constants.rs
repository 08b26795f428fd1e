// Numeric constants of the SX128x frequency and preamble encodings
// Reference: SX1280/SX1281 datasheet, SetRfFrequency and SetPacketParams

/// Crystal frequency driving the synthesizer (Hz)
pub const XTAL_HZ: u32 = 52_000_000;

/// Number of code units per crystal period (2^18)
pub const CODE_UNITS_PER_XTAL: u32 = 1 << 18;

/// Frequency resolution of one register code unit: 52 MHz / 2^18 Hz
pub const STEP_HZ: f64 = XTAL_HZ as f64 / CODE_UNITS_PER_XTAL as f64;

/// 13 * 5^6. The step is `FREQ_DIVISOR / 2^10` Hz, which is what makes the
/// integer-only conversion possible.
pub const FREQ_DIVISOR: u32 = 13 * 15625;

/// Low register field: bits 0..13
pub const CODE_LOW_BITS: u32 = 14;
pub const CODE_LOW_MASK: u32 = (1 << CODE_LOW_BITS) - 1;

/// High register field: bits 14..24
pub const CODE_HIGH_BITS: u32 = 11;
pub const CODE_HIGH_MASK: u32 = (1 << CODE_HIGH_BITS) - 1;

/// Total width of a frequency register code
pub const CODE_BITS: u32 = CODE_LOW_BITS + CODE_HIGH_BITS;

/// Largest value that fits the combined register fields
pub const CODE_MAX: u32 = (1 << CODE_BITS) - 1;

/// Largest code the encoder produces (for a 2^32 - 1 Hz request)
pub const CODE_ENCODER_MAX: u32 = 21_651_921;

/// Lower edge of the 2.4 GHz ISM band the chip is specified for (Hz)
pub const BAND_MIN_HZ: u64 = 2_400_000_000;

/// Upper edge of the 2.4 GHz ISM band the chip is specified for (Hz)
pub const BAND_MAX_HZ: u64 = 2_500_000_000;

/// Width of each preamble sub-field (mantissa and exponent)
pub const PREAMBLE_NIBBLE_MAX: u8 = 15;

/// Largest preamble length representable as mantissa * 2^exponent
pub const PREAMBLE_MAX: u32 = (PREAMBLE_NIBBLE_MAX as u32) << PREAMBLE_NIBBLE_MAX;
