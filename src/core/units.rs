// Parsing of human-written frequencies and register codes

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum UnitError {
    #[error("Invalid frequency specification: {0}")]
    InvalidFrequency(String),

    #[error("Invalid register code: {0}")]
    InvalidCode(String),
}

pub type Result<T> = std::result::Result<T, UnitError>;

lazy_static! {
    static ref FREQUENCY_RE: Regex =
        Regex::new(r"^\s*([0-9]+(?:\.[0-9]*)?(?:[eE][+-]?[0-9]+)?)\s*([kKmMgG]?)(?:[hH][zZ])?\s*$")
            .expect("frequency regex is valid");
}

/// Parse a frequency string into Hz.
///
/// Accepts plain numbers ("2450000000", "2450e6") and an optional
/// k/M/G prefix with or without "Hz" ("2.45GHz", "2450 MHz", "868m").
/// The result is not rounded; the encoder does that.
pub fn parse_frequency(freqstr: &str) -> Result<f64> {
    let caps = FREQUENCY_RE
        .captures(freqstr)
        .ok_or_else(|| UnitError::InvalidFrequency(freqstr.to_string()))?;

    let value: f64 = caps[1]
        .parse()
        .map_err(|_| UnitError::InvalidFrequency(freqstr.to_string()))?;

    let scale = match caps.get(2).map_or("", |m| m.as_str()) {
        "k" | "K" => 1e3,
        "m" | "M" => 1e6,
        "g" | "G" => 1e9,
        _ => 1.0,
    };

    let hz = value * scale;
    if !hz.is_finite() {
        return Err(UnitError::InvalidFrequency(freqstr.to_string()));
    }
    Ok(hz)
}

/// Parse a register code written in decimal or as 0x-prefixed hex
pub fn parse_code(codestr: &str) -> Result<u32> {
    let trimmed = codestr.trim();
    let parsed = match trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => trimmed.parse(),
    };
    parsed.map_err(|_| UnitError::InvalidCode(codestr.to_string()))
}

/// Format a frequency in Hz as MHz with 6 decimals, e.g. "2450.000000 MHz"
pub fn format_mhz(hz: u64) -> String {
    format!("{}.{:06} MHz", hz / 1_000_000, hz % 1_000_000)
}
