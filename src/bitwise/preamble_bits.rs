// FLRC and GFSK preamble length quantization
// Reference: SX1280 datasheet, Table 14-34 (FLRC) and Table 14-4 (GFSK)
//
// These packet types do not use the mantissa/exponent byte. The preamble is
// a number of bits in steps of 4, selected by the high nibble of the
// parameter byte.

use std::fmt;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PreambleBits {
    /// Reserved for FLRC
    Bits4 = 0x00,
    Bits8 = 0x10,
    Bits12 = 0x20,
    Bits16 = 0x30,
    Bits20 = 0x40,
    Bits24 = 0x50,
    Bits28 = 0x60,
    Bits32 = 0x70,
}

impl PreambleBits {
    /// Parameter byte for SetPacketParams
    pub const fn param(self) -> u8 {
        self as u8
    }

    /// Preamble length in bits
    pub const fn bits(self) -> u16 {
        (((self as u8) >> 4) as u16 + 1) * 4
    }

    pub fn from_param(param: u8) -> Option<Self> {
        use PreambleBits::*;
        match param {
            0x00 => Some(Bits4),
            0x10 => Some(Bits8),
            0x20 => Some(Bits12),
            0x30 => Some(Bits16),
            0x40 => Some(Bits20),
            0x50 => Some(Bits24),
            0x60 => Some(Bits28),
            0x70 => Some(Bits32),
            _ => None,
        }
    }
}

impl fmt::Display for PreambleBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bits", self.bits())
    }
}

/// Ladder shared by both packet types from 8 bits up
fn quantize_from_8(preamble: u16) -> PreambleBits {
    use PreambleBits::*;
    match preamble {
        0..=9 => Bits8,
        10..=14 => Bits12,
        15..=18 => Bits16,
        19..=22 => Bits20,
        23..=26 => Bits24,
        27..=30 => Bits28,
        _ => Bits32,
    }
}

/// Nearest FLRC preamble length (8..32 bits)
pub fn quantize_flrc(preamble: u16) -> PreambleBits {
    let bits = quantize_from_8(preamble);
    if bits.bits() != preamble {
        tracing::debug!("FLRC preamble {} bits adjusted to {}", preamble, bits);
    }
    bits
}

/// Nearest GFSK preamble length (4..32 bits)
pub fn quantize_gfsk(preamble: u16) -> PreambleBits {
    let bits = if preamble <= 6 {
        PreambleBits::Bits4
    } else {
        quantize_from_8(preamble)
    };
    if bits.bits() != preamble {
        tracing::debug!("GFSK preamble {} bits adjusted to {}", preamble, bits);
    }
    bits
}
