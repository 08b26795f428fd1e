// SX128x RF frequency <-> register code conversion
//
// One code unit is 52 MHz / 2^18 = 13 * 5^6 / 2^10 Hz = 198.3642578125 Hz.
// Both directions use integer arithmetic only, split so that no
// intermediate product exceeds 32 bits, and round half up on the last bit.

use super::elements;
use crate::core::config::{CodecConfig, RangePolicy};
use crate::core::constants::{
    CODE_HIGH_MASK, CODE_LOW_BITS, CODE_LOW_MASK, CODE_MAX, FREQ_DIVISOR,
};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum FreqError {
    #[error("Frequency {0} Hz is outside the 32-bit encoder range")]
    OutOfRange(f64),

    #[error("Frequency is not a finite number: {0}")]
    NotFinite(f64),

    #[error("Register code {0:#x} does not fit in 25 bits")]
    CodeOutOfRange(u32),

    #[error("Register code {0:#x} does not fit in the 3-byte command payload")]
    PayloadOverflow(u32),
}

pub type Result<T> = std::result::Result<T, FreqError>;

/// Round half up on the lowest bit, then drop it: `(x >> 1) + (x & 1)`
#[inline]
const fn halve_round(x: u32) -> u32 {
    (x >> 1) + (x & 1)
}

/// Value written into the SX128x frequency registers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RegisterCode(u32);

impl RegisterCode {
    pub const fn new(code: u32) -> Self {
        Self(code)
    }

    pub const fn value(self) -> u32 {
        self.0
    }

    /// Bits 0..13
    pub const fn low_field(self) -> u32 {
        self.0 & CODE_LOW_MASK
    }

    /// Bits 14..24
    pub const fn high_field(self) -> u32 {
        (self.0 >> CODE_LOW_BITS) & CODE_HIGH_MASK
    }

    /// Whether the code fits the 25 bits covered by the two fields
    pub const fn is_in_field_range(self) -> bool {
        self.0 <= CODE_MAX
    }

    /// SetRfFrequency payload: three bytes, most significant first.
    /// Codes of 2^24 and above (requests past ~3.33 GHz) do not fit.
    pub fn to_be_bytes(self) -> Result<[u8; 3]> {
        elements::try_write_u24_be(self.0).map_err(|_| FreqError::PayloadOverflow(self.0))
    }

    pub fn from_be_bytes(bytes: [u8; 3]) -> Self {
        let [b2, b1, b0] = bytes;
        Self(u32::from_be_bytes([0, b2, b1, b0]))
    }

    /// Ideal frequency of this code, without the integer approximation
    pub fn exact_hz(self) -> f64 {
        f64::from(self.0) * crate::core::constants::STEP_HZ
    }
}

impl From<u32> for RegisterCode {
    fn from(code: u32) -> Self {
        Self(code)
    }
}

impl From<RegisterCode> for u32 {
    fn from(code: RegisterCode) -> Self {
        code.0
    }
}

impl fmt::Display for RegisterCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:#08X})", self.0, self.0)
    }
}

/// Convert a register code to Hz.
///
/// Defined for every u32: bits above 24 are ignored. The result can exceed
/// 32 bits (up to 4,296,499,802 Hz, high field 1321 and low field 16383).
pub const fn decode(code: RegisterCode) -> u64 {
    // 16383 * 203125 = 3,327,796,875 fits in u32
    let cl = code.low_field() * FREQ_DIVISOR;
    // 2047 * 203125 = 415,796,875 fits in u32
    let ch = code.high_field() * FREQ_DIVISOR;
    let fl = halve_round(cl >> 9);
    // Bits shifted past 32 are lost, as on the target
    let fh = ch.wrapping_shl(4);
    fl as u64 + fh as u64
}

/// Convert a frequency in Hz to a register code, rounding to the nearest code.
pub const fn encode(freq: u32) -> RegisterCode {
    let mut code = (freq / FREQ_DIVISOR) << 11;
    // 203124 << 11 = 415,997,952 fits in u32
    let rem = (freq % FREQ_DIVISOR) << 11;
    code += rem / FREQ_DIVISOR;
    RegisterCode(halve_round(code))
}

/// Round a real frequency to whole Hz (ties to even) and map it into u32
/// according to `policy`.
pub fn round_hz(freq: f64, policy: RangePolicy) -> Result<u32> {
    if !freq.is_finite() {
        return Err(FreqError::NotFinite(freq));
    }

    let rounded = freq.round_ties_even();
    if (0.0..=u32::MAX as f64).contains(&rounded) {
        return Ok(rounded as u32);
    }

    match policy {
        RangePolicy::Reject => Err(FreqError::OutOfRange(freq)),
        RangePolicy::Saturate => {
            tracing::warn!("Frequency {} Hz saturated to the 32-bit range", freq);
            Ok(if rounded < 0.0 { 0 } else { u32::MAX })
        }
        RangePolicy::Wrap => {
            // Every f64 outside the u32 range is an integer, so this is exact
            let wrapped = rounded.rem_euclid(4_294_967_296.0) as u32;
            tracing::warn!("Frequency {} Hz wrapped to {} Hz", freq, wrapped);
            Ok(wrapped)
        }
    }
}

/// Map a code into the 25-bit field range according to `policy`
pub fn check_code(code: RegisterCode, policy: RangePolicy) -> Result<RegisterCode> {
    if code.is_in_field_range() {
        return Ok(code);
    }

    match policy {
        RangePolicy::Reject => Err(FreqError::CodeOutOfRange(code.value())),
        RangePolicy::Saturate => Ok(RegisterCode(CODE_MAX)),
        RangePolicy::Wrap => Ok(RegisterCode(code.value() & CODE_MAX)),
    }
}

/// Result of tuning to a requested frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrequencySetting {
    pub code: RegisterCode,
    pub requested_hz: u32,
    pub actual_hz: u64,
}

impl FrequencySetting {
    /// Actual minus requested frequency
    pub fn error_hz(&self) -> i64 {
        self.actual_hz as i64 - i64::from(self.requested_hz)
    }
}

impl fmt::Display for FrequencySetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} Hz -> code {} -> {} Hz ({:+} Hz)",
            self.requested_hz,
            self.code,
            self.actual_hz,
            self.error_hz()
        )
    }
}

/// Frequency converter applying a configured range policy
#[derive(Debug, Clone, Copy, Default)]
pub struct FrequencyCodec {
    policy: RangePolicy,
}

impl FrequencyCodec {
    pub fn new(policy: RangePolicy) -> Self {
        Self { policy }
    }

    pub fn from_config(config: &CodecConfig) -> Self {
        Self::new(config.range_policy)
    }

    pub fn policy(&self) -> RangePolicy {
        self.policy
    }

    pub fn encode(&self, freq: u32) -> RegisterCode {
        encode(freq)
    }

    /// Encode a real frequency, rounding to the nearest Hz first
    pub fn encode_f64(&self, freq: f64) -> Result<RegisterCode> {
        Ok(encode(round_hz(freq, self.policy)?))
    }

    /// Encode a 64-bit frequency, applying the range policy above u32::MAX
    pub fn encode_u64(&self, freq: u64) -> Result<RegisterCode> {
        let freq = match u32::try_from(freq) {
            Ok(freq) => freq,
            Err(_) => match self.policy {
                RangePolicy::Reject => return Err(FreqError::OutOfRange(freq as f64)),
                RangePolicy::Saturate => u32::MAX,
                RangePolicy::Wrap => freq as u32,
            },
        };
        Ok(encode(freq))
    }

    /// Decode a code, applying the range policy to codes wider than 25 bits
    pub fn decode(&self, code: RegisterCode) -> Result<u64> {
        Ok(decode(check_code(code, self.policy)?))
    }

    /// Encode `freq` and report the frequency the radio will actually use
    pub fn tune(&self, freq: u32) -> FrequencySetting {
        let code = encode(freq);
        let setting = FrequencySetting {
            code,
            requested_hz: freq,
            actual_hz: decode(code),
        };
        tracing::debug!(
            "set RF frequency to {}Hz (code={}, requested {}Hz)",
            setting.actual_hz,
            code.value(),
            freq
        );
        setting
    }

    /// Same as [`FrequencyCodec::tune`] for a real-valued request
    pub fn tune_f64(&self, freq: f64) -> Result<FrequencySetting> {
        Ok(self.tune(round_hz(freq, self.policy)?))
    }
}
