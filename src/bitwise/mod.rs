// Bit-exact encodings of SX128x register values

pub mod elements;
pub mod freq;
pub mod preamble;
pub mod preamble_bits;

pub use elements::{try_write_u24_be, write_u24_be, ElementError};
pub use freq::{FreqError, FrequencyCodec, FrequencySetting, RegisterCode};
pub use preamble::{PackedPreamble, PreambleCodec, PreambleEncoding, PreambleError};
pub use preamble_bits::{quantize_flrc, quantize_gfsk, PreambleBits};
