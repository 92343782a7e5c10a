//! Value decoding
//!
//! Converts the textual value of a signal into an unsigned integer. Any
//! unknown (`x`) or undriven (`z`) bit makes the whole value read as zero.

use crate::types::ValueError;

/// Returns true for the unknown and high-impedance markers
pub fn is_unknown_bit(c: char) -> bool {
    matches!(c, 'x' | 'X' | 'z' | 'Z')
}

/// Returns true for characters that may start a single-bit value change
pub fn is_scalar_bit(c: char) -> bool {
    c == '0' || c == '1' || is_unknown_bit(c)
}

/// Decode a binary value text, MSB first
///
/// Unknown markers anywhere in the text win over every other digit and yield
/// 0. Values up to 128 bits decode exactly; leading zeros do not count
/// towards the width.
pub fn decode_binary(text: &str) -> Result<u128, ValueError> {
    if text.is_empty() {
        return Err(ValueError::Empty);
    }
    if text.chars().any(is_unknown_bit) {
        return Ok(0);
    }

    text.chars().try_fold(0u128, |acc, c| {
        let bit = match c {
            '0' => 0,
            '1' => 1,
            other => return Err(ValueError::InvalidDigit(other)),
        };
        acc.checked_mul(2)
            .and_then(|v| v.checked_add(bit))
            .ok_or(ValueError::Overflow)
    })
}
