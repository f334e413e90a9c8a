//! Crockford's Base32 codec for the 26-digit canonical form.

use crate::id::ParseError;

/// Number of digits in the canonical string representation.
pub(crate) const ENCODED_LEN: usize = 26;

/// Digit characters in ascending order of value.
pub(crate) const DIGITS: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

const NO_VALUE: u8 = 0xff;

/// Maps ASCII bytes to digit values.
///
/// Lowercase letters decode like uppercase ones, and the ambiguous glyphs `O` and `I`/`L` decode
/// as `0` and `1` respectively.
const DECODE_MAP: [u8; 256] = {
    let mut map = [NO_VALUE; 256];
    let mut i = 0;
    while i < DIGITS.len() {
        let c = DIGITS[i];
        map[c as usize] = i as u8;
        map[c.to_ascii_lowercase() as usize] = i as u8;
        i += 1;
    }
    map[b'O' as usize] = 0;
    map[b'o' as usize] = 0;
    map[b'I' as usize] = 1;
    map[b'i' as usize] = 1;
    map[b'L' as usize] = 1;
    map[b'l' as usize] = 1;
    map
};

/// Encodes a 128-bit big-endian value into 26 uppercase digits.
///
/// The value is read as the lower 128 bits of a 130-bit field whose top two bits are zero, so the
/// first digit is always in `0..=7`.
pub(crate) fn encode(bytes: &[u8; 16]) -> [u8; ENCODED_LEN] {
    let mut hi = 0u64;
    let mut lo = 0u64;
    for &e in &bytes[..8] {
        hi = (hi << 8) | e as u64;
    }
    for &e in &bytes[8..] {
        lo = (lo << 8) | e as u64;
    }

    let mut dst = [0u8; ENCODED_LEN];
    for (i, e) in dst.iter_mut().enumerate() {
        // position of the least significant bit of this digit
        let shift = 125 - 5 * i;
        let digit = if shift >= 64 {
            hi >> (shift - 64)
        } else if shift == 0 {
            lo
        } else {
            (hi << (64 - shift)) | (lo >> shift)
        };
        *e = DIGITS[(digit & 31) as usize];
    }
    dst
}

/// Decodes 26 digits into a 128-bit big-endian value.
///
/// Fails as malformed if the length is not 26 or a byte is not a digit, and as out of range if
/// the two bits above bit 127 are not zero.
pub(crate) fn decode(src: &[u8]) -> Result<[u8; 16], ParseError> {
    if src.len() != ENCODED_LEN {
        return Err(ParseError::malformed());
    }

    // 192-bit accumulator in little-endian limb order
    let mut acc = [0u64; 3];
    for &c in src {
        let value = DECODE_MAP[c as usize];
        if value == NO_VALUE {
            return Err(ParseError::malformed());
        }

        let mut carry = value as u64;
        for limb in acc.iter_mut() {
            let next_carry = *limb >> 59;
            *limb = (*limb << 5) | carry;
            carry = next_carry;
        }
    }

    // bits 128 and 129
    if acc[2] & 0b11 != 0 {
        return Err(ParseError::out_of_range());
    }

    let mut dst = [0u8; 16];
    dst[..8].copy_from_slice(&acc[1].to_be_bytes());
    dst[8..].copy_from_slice(&acc[0].to_be_bytes());
    Ok(dst)
}
