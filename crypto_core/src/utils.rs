//! Useful utility functions.

use num_bigint::BigUint;

/// Number of bytes needed to hold `nbits` bits.
#[inline]
pub fn bits_to_bytes(nbits: usize) -> usize {
    (nbits + 7) / 8
}

/// Pack a bit slice into bytes.
pub fn pack_bits(bits: &[bool]) -> Vec<u8> {
    let nbytes = bits_to_bytes(bits.len());
    let mut bytes = vec![0; nbytes];
    for (i, bit) in bits.iter().enumerate() {
        bytes[i / 8] |= (*bit as u8) << (i % 8);
    }
    bytes
}

/// Unpack a bit vector from a slice of bytes.
pub fn unpack_bits(bytes: &[u8], size: usize) -> Vec<bool> {
    let mut bits = Vec::with_capacity(size);
    for (i, byte) in bytes.iter().enumerate() {
        for j in 0..8 {
            if 8 * i + j >= size {
                break;
            }
            bits.push(((byte >> j) & 1) != 0);
        }
    }
    bits
}

/// The lowest `size` bits of `x`, least significant first. Missing high
/// bits are zero.
pub fn biguint_bits(x: &BigUint, size: usize) -> Vec<bool> {
    let mut bytes = x.to_bytes_le();
    bytes.resize(bits_to_bytes(size).max(bytes.len()), 0);
    unpack_bits(&bytes, size)
}

/// Fixed-width little-endian encoding of `x`, or `None` if it does not fit.
pub fn biguint_to_le_fixed<const N: usize>(x: &BigUint) -> Option<[u8; N]> {
    let bytes = x.to_bytes_le();
    if bytes.len() > N {
        return None;
    }
    let mut res = [0u8; N];
    res[..bytes.len()].copy_from_slice(&bytes);
    Some(res)
}
