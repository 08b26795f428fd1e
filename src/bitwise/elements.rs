// 24-bit big-endian element helpers
// The SX128x transfers register codes as 3 bytes, most significant first

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ElementError {
    #[error("Value {0:#x} does not fit in 24 bits")]
    Overflow(u32),
}

pub type Result<T> = std::result::Result<T, ElementError>;

/// Write the low 24 bits of a value in big-endian format.
/// Bits above 23 are dropped, as the chip would ignore them.
pub fn write_u24_be(value: u32) -> [u8; 3] {
    let [_, b2, b1, b0] = value.to_be_bytes();
    [b2, b1, b0]
}

/// Write a u24 in big-endian format, refusing values wider than 24 bits
pub fn try_write_u24_be(value: u32) -> Result<[u8; 3]> {
    if value > 0x00FF_FFFF {
        return Err(ElementError::Overflow(value));
    }
    Ok(write_u24_be(value))
}
