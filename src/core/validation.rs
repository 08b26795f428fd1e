// Advisory checks on requested radio settings

use super::config::CodecConfig;
use super::constants::PREAMBLE_MAX;
use super::units::format_mhz;
use crate::bitwise::preamble;

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationMessage {
    Warning(String),
    Error(String),
}

impl ValidationMessage {
    pub fn is_error(&self) -> bool {
        matches!(self, ValidationMessage::Error(_))
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, ValidationMessage::Warning(_))
    }

    pub fn message(&self) -> &str {
        match self {
            ValidationMessage::Warning(msg) | ValidationMessage::Error(msg) => msg,
        }
    }
}

/// Check a frequency against the configured band and the encoder width
pub fn validate_frequency(config: &CodecConfig, hz: u64) -> Vec<ValidationMessage> {
    let mut messages = Vec::new();

    if hz > u64::from(u32::MAX) {
        messages.push(ValidationMessage::Error(format!(
            "{} does not fit the 32-bit encoder input",
            format_mhz(hz)
        )));
    }

    if !config.band.contains(hz) {
        messages.push(ValidationMessage::Warning(format!(
            "{} is outside the {} - {} band",
            format_mhz(hz),
            format_mhz(config.band.min_hz),
            format_mhz(config.band.max_hz)
        )));
    }

    messages
}

/// Check a requested frequency before it is rounded into the encoder range
pub fn validate_request(config: &CodecConfig, freq: f64) -> Vec<ValidationMessage> {
    if !freq.is_finite() || freq.round_ties_even() < 0.0 {
        return vec![ValidationMessage::Error(format!(
            "{} Hz is not a valid frequency",
            freq
        ))];
    }
    // Saturating cast: anything past u64 is still reported as too wide
    validate_frequency(config, freq.round_ties_even() as u64)
}

/// Check whether a preamble length survives packing unchanged
pub fn validate_preamble(requested: u32) -> Vec<ValidationMessage> {
    let encoding = preamble::pack(requested);

    if requested > PREAMBLE_MAX {
        vec![ValidationMessage::Error(format!(
            "Preamble length {} exceeds the maximum of {} symbols",
            requested, PREAMBLE_MAX
        ))]
    } else if encoding.is_lossy(requested) {
        vec![ValidationMessage::Warning(format!(
            "Preamble length {} will be configured as {} symbols",
            requested, encoding.representable
        ))]
    } else {
        Vec::new()
    }
}

/// Check if validation messages contain any errors
pub fn has_errors(messages: &[ValidationMessage]) -> bool {
    messages.iter().any(|m| m.is_error())
}

/// Error texts, in order
pub fn errors_only(messages: &[ValidationMessage]) -> Vec<String> {
    messages
        .iter()
        .filter(|m| m.is_error())
        .map(|m| m.message().to_string())
        .collect()
}

/// Warning texts, in order
pub fn warnings_only(messages: &[ValidationMessage]) -> Vec<String> {
    messages
        .iter()
        .filter(|m| m.is_warning())
        .map(|m| m.message().to_string())
        .collect()
}
