// LoRa preamble length packing: one byte holding mantissa * 2^exponent
// Reference: SX1280 datasheet, LoRa packet parameters (page 132)

use crate::core::config::{CodecConfig, RangePolicy};
use crate::core::constants::{PREAMBLE_MAX, PREAMBLE_NIBBLE_MAX};
use lazy_static::lazy_static;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum PreambleError {
    #[error("Preamble length {requested} exceeds the maximum of {max} symbols")]
    OutOfRange { requested: u32, max: u32 },

    #[error("Invalid preamble nibbles: mantissa {mantissa}, exponent {exponent} (max 15)")]
    InvalidNibble { mantissa: u8, exponent: u8 },
}

pub type Result<T> = std::result::Result<T, PreambleError>;

/// Packed preamble byte: exponent in the high nibble, mantissa in the low one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PackedPreamble(u8);

impl PackedPreamble {
    pub const fn new(byte: u8) -> Self {
        Self(byte)
    }

    pub fn from_parts(mantissa: u8, exponent: u8) -> Result<Self> {
        if mantissa > PREAMBLE_NIBBLE_MAX || exponent > PREAMBLE_NIBBLE_MAX {
            return Err(PreambleError::InvalidNibble { mantissa, exponent });
        }
        Ok(Self((exponent << 4) | mantissa))
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    pub const fn mantissa(self) -> u8 {
        self.0 & 0x0F
    }

    pub const fn exponent(self) -> u8 {
        self.0 >> 4
    }

    /// Number of preamble symbols this byte configures
    pub const fn representable(self) -> u32 {
        (self.mantissa() as u32) << self.exponent()
    }

    /// Whether `pack` can produce this byte. A non-zero exponent with a
    /// mantissa below 8 describes a length that has a smaller exponent form.
    pub const fn is_canonical(self) -> bool {
        self.exponent() == 0 || self.mantissa() >= 8
    }
}

impl From<u8> for PackedPreamble {
    fn from(byte: u8) -> Self {
        Self(byte)
    }
}

impl From<PackedPreamble> for u8 {
    fn from(packed: PackedPreamble) -> Self {
        packed.0
    }
}

impl fmt::Display for PackedPreamble {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02X}", self.0)
    }
}

/// Outcome of packing a requested preamble length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreambleEncoding {
    pub mantissa: u8,
    pub exponent: u8,
    pub packed: PackedPreamble,
    /// Length actually configured, never above the request
    pub representable: u32,
}

impl PreambleEncoding {
    /// Whether the configured length differs from `requested`
    pub fn is_lossy(&self, requested: u32) -> bool {
        self.representable != requested
    }
}

impl fmt::Display for PreambleEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "mant={} exp={} pack={} preamble={}",
            self.mantissa, self.exponent, self.packed, self.representable
        )
    }
}

/// Pack a preamble length into one byte.
///
/// Halves the mantissa until it fits 4 bits, counting halvings in the
/// exponent. The exponent stops at 15; anything still too large is clamped
/// to a mantissa of 15, so inputs above 491,520 all pack to 0xFF.
pub fn pack(preamble: u32) -> PreambleEncoding {
    let nibble_max = u32::from(PREAMBLE_NIBBLE_MAX);
    let mut mantissa = preamble;
    let mut exponent: u8 = 0;

    while mantissa > nibble_max {
        mantissa >>= 1;
        exponent += 1;
        if exponent >= PREAMBLE_NIBBLE_MAX {
            break;
        }
    }
    let mantissa = mantissa.min(nibble_max) as u8;

    PreambleEncoding {
        mantissa,
        exponent,
        packed: PackedPreamble((exponent << 4) | mantissa),
        representable: u32::from(mantissa) << exponent,
    }
}

/// Preamble length configured by a packed byte
pub fn unpack(packed: PackedPreamble) -> u32 {
    packed.representable()
}

lazy_static! {
    /// Representable length for every possible packed byte
    static ref PREAMBLE_TABLE: [u32; 256] = {
        let mut table = [0u32; 256];
        for (byte, entry) in table.iter_mut().enumerate() {
            *entry = PackedPreamble(byte as u8).representable();
        }
        table
    };
}

/// Table lookup equivalent of [`unpack`]
pub fn representable_value(packed: PackedPreamble) -> u32 {
    PREAMBLE_TABLE[usize::from(packed.value())]
}

/// Lengths exercised when checking the packer by eye:
/// 0..=31, 100..=900 by 100, 1000..=9000 by 1000, 10000..=490000 by 10000
pub fn verification_range() -> impl Iterator<Item = u32> {
    (0..32)
        .chain((100..1_000).step_by(100))
        .chain((1_000..10_000).step_by(1_000))
        .chain((10_000..500_000).step_by(10_000))
}

/// Preamble packer applying a configured range policy
#[derive(Debug, Clone, Copy, Default)]
pub struct PreambleCodec {
    policy: RangePolicy,
}

impl PreambleCodec {
    pub fn new(policy: RangePolicy) -> Self {
        Self { policy }
    }

    pub fn from_config(config: &CodecConfig) -> Self {
        Self::new(config.range_policy)
    }

    /// Pack `preamble`, rejecting lengths above 491,520 under the Reject
    /// policy. Saturate and Wrap both saturate: the format has no
    /// wrapping form.
    pub fn pack(&self, preamble: u32) -> Result<PreambleEncoding> {
        if preamble > PREAMBLE_MAX {
            if self.policy == RangePolicy::Reject {
                return Err(PreambleError::OutOfRange {
                    requested: preamble,
                    max: PREAMBLE_MAX,
                });
            }
            tracing::warn!(
                "Preamble length {} saturated to {} symbols",
                preamble,
                PREAMBLE_MAX
            );
        }

        let encoding = pack(preamble);
        if encoding.is_lossy(preamble) {
            tracing::debug!(
                "Preamble length {} rounded down to {} ({})",
                preamble,
                encoding.representable,
                encoding.packed
            );
        }
        Ok(encoding)
    }

    pub fn unpack(&self, packed: PackedPreamble) -> u32 {
        representable_value(packed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_zero() {
        let enc = pack(0);
        assert_eq!(enc.mantissa, 0);
        assert_eq!(enc.exponent, 0);
        assert_eq!(enc.packed.value(), 0x00);
        assert_eq!(enc.representable, 0);
    }

    #[test]
    fn test_pack_small_is_exact() {
        for p in 0..=15 {
            let enc = pack(p);
            assert_eq!(enc.exponent, 0);
            assert_eq!(u32::from(enc.mantissa), p);
            assert_eq!(enc.representable, p);
        }
    }

    #[test]
    fn test_pack_16_and_17() {
        let enc = pack(16);
        assert_eq!((enc.mantissa, enc.exponent), (8, 1));
        assert_eq!(enc.packed.value(), 0x18);
        assert_eq!(enc.representable, 16);
        assert!(!enc.is_lossy(16));

        let enc = pack(17);
        assert_eq!((enc.mantissa, enc.exponent), (8, 1));
        assert_eq!(enc.packed.value(), 0x18);
        assert_eq!(enc.representable, 16);
        assert!(enc.is_lossy(17));
    }

    #[test]
    fn test_pack_known_values() {
        assert_eq!(pack(31).to_string(), "mant=15 exp=1 pack=0x1F preamble=30");
        assert_eq!(pack(100).to_string(), "mant=12 exp=3 pack=0x3C preamble=96");
        assert_eq!(pack(1_000).to_string(), "mant=15 exp=6 pack=0x6F preamble=960");
        assert_eq!(pack(65_535).packed.value(), 0xCF);
        assert_eq!(pack(65_536).packed.value(), 0xD8);
    }

    #[test]
    fn test_pack_saturates() {
        for p in [PREAMBLE_MAX, PREAMBLE_MAX + 1, 1_000_000_000, u32::MAX] {
            let enc = pack(p);
            assert_eq!((enc.mantissa, enc.exponent), (15, 15));
            assert_eq!(enc.packed.value(), 0xFF);
            assert_eq!(enc.representable, 491_520);
        }
    }

    #[test]
    fn test_verification_range_invariants() {
        let values: Vec<u32> = verification_range().collect();
        assert_eq!(values.len(), 32 + 9 + 9 + 49);
        assert_eq!(values.last(), Some(&490_000));

        for p in values {
            let enc = pack(p);
            assert!(enc.representable <= p, "{}: {}", p, enc);
            assert_eq!(
                enc.representable,
                u32::from(enc.mantissa) << enc.exponent
            );
            assert!(enc.mantissa <= 15);
            assert!(enc.exponent <= 15);
            assert_eq!(enc.packed.mantissa(), enc.mantissa);
            assert_eq!(enc.packed.exponent(), enc.exponent);
            assert!(enc.packed.is_canonical());
        }
    }

    #[test]
    fn test_pack_is_idempotent() {
        for p in verification_range().chain([491_519, 491_520, 10_000_000]) {
            let first = pack(p);
            let second = pack(first.representable);
            assert_eq!(second.packed, first.packed, "p={}", p);
            assert_eq!(second.representable, first.representable, "p={}", p);
        }
    }

    #[test]
    fn test_table_matches_unpack() {
        for byte in 0..=255u8 {
            let packed = PackedPreamble::new(byte);
            assert_eq!(representable_value(packed), unpack(packed));
        }
        assert_eq!(representable_value(PackedPreamble::new(0xFF)), 491_520);
        assert_eq!(representable_value(PackedPreamble::new(0x18)), 16);
    }

    #[test]
    fn test_canonical_bytes_roundtrip() {
        for byte in 0..=255u8 {
            let packed = PackedPreamble::new(byte);
            if packed.is_canonical() {
                assert_eq!(pack(unpack(packed)).packed, packed);
            }
        }
        assert!(!PackedPreamble::new(0x14).is_canonical());
    }

    #[test]
    fn test_from_parts() {
        assert_eq!(PackedPreamble::from_parts(8, 1).unwrap().value(), 0x18);
        assert_eq!(
            PackedPreamble::from_parts(16, 0),
            Err(PreambleError::InvalidNibble {
                mantissa: 16,
                exponent: 0
            })
        );
        assert!(PackedPreamble::from_parts(0, 16).is_err());
    }

    #[test]
    fn test_codec_policies() {
        let codec = PreambleCodec::default();
        assert_eq!(codec.pack(12).unwrap().packed.value(), 0x0C);
        assert_eq!(codec.pack(PREAMBLE_MAX).unwrap().packed.value(), 0xFF);
        assert_eq!(
            codec.pack(PREAMBLE_MAX + 1),
            Err(PreambleError::OutOfRange {
                requested: PREAMBLE_MAX + 1,
                max: PREAMBLE_MAX
            })
        );

        for policy in [RangePolicy::Saturate, RangePolicy::Wrap] {
            let codec = PreambleCodec::from_config(&CodecConfig::new(policy));
            let enc = codec.pack(u32::MAX).unwrap();
            assert_eq!(enc.representable, PREAMBLE_MAX);
        }

        assert_eq!(codec.unpack(PackedPreamble::new(0x3C)), 96);
    }
}
