//! A 128-bit block. Every garbled wire key, offset and masked OT value is a `Block`.

use rand::distributions::{Distribution, Standard};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitXor, BitXorAssign};
use zeroize::Zeroize;

/// Bit length of a wire key.
pub const KEY_SIZE: usize = 128;

/// Byte length of a wire key.
pub const KEY_BYTES: usize = KEY_SIZE / 8;

/// `SELECT_MASK[b] & x` is `x` when `b == 1` and zero otherwise.
pub const SELECT_MASK: [Block; 2] = [Block([0x00; KEY_BYTES]), Block([0xFF; KEY_BYTES])];

#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Zeroize)]
pub struct Block([u8; KEY_BYTES]);

impl Block {
    #[inline]
    pub fn new(bytes: [u8; KEY_BYTES]) -> Self {
        Block(bytes)
    }

    /// Build a block from a slice of exactly 16 bytes.
    #[inline]
    pub fn try_from_slice(bytes: &[u8]) -> Option<Self> {
        let bytes: [u8; KEY_BYTES] = bytes.try_into().ok()?;
        Some(Block(bytes))
    }

    /// The signal (permutation) bit.
    #[inline]
    pub fn lsb(&self) -> bool {
        self.0[0] & 1 == 1
    }

    /// Return the block with its least significant bit forced to 1.
    #[inline]
    pub fn set_lsb(&self) -> Self {
        let mut b = *self;
        b.0[0] |= 1;
        b
    }

    /// Flip every bit.
    #[inline]
    pub fn flip(&self) -> Self {
        *self ^ SELECT_MASK[1]
    }

    #[inline]
    fn as_u128(&self) -> u128 {
        u128::from_le_bytes(self.0)
    }
}

impl fmt::Debug for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0.iter().rev() {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl BitXor for Block {
    type Output = Block;

    #[inline]
    fn bitxor(self, rhs: Self) -> Self::Output {
        Block::from(self.as_u128() ^ rhs.as_u128())
    }
}

impl BitXorAssign for Block {
    #[inline]
    fn bitxor_assign(&mut self, rhs: Self) {
        *self = *self ^ rhs;
    }
}

impl BitAnd for Block {
    type Output = Block;

    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        Block::from(self.as_u128() & rhs.as_u128())
    }
}

impl BitAndAssign for Block {
    #[inline]
    fn bitand_assign(&mut self, rhs: Self) {
        *self = *self & rhs;
    }
}

impl From<u128> for Block {
    #[inline]
    fn from(x: u128) -> Self {
        Block(x.to_le_bytes())
    }
}

impl From<Block> for u128 {
    #[inline]
    fn from(b: Block) -> Self {
        b.as_u128()
    }
}

impl From<[u8; KEY_BYTES]> for Block {
    #[inline]
    fn from(bytes: [u8; KEY_BYTES]) -> Self {
        Block(bytes)
    }
}

impl From<Block> for [u8; KEY_BYTES] {
    #[inline]
    fn from(b: Block) -> Self {
        b.0
    }
}

impl AsRef<[u8]> for Block {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl AsMut<[u8]> for Block {
    #[inline]
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.0
    }
}

impl Distribution<Block> for Standard {
    #[inline]
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Block {
        Block(rng.gen::<[u8; KEY_BYTES]>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lsb() {
        let b = Block::from(6u128);
        assert!(!b.lsb());
        assert!(b.set_lsb().lsb());
        assert_eq!(u128::from(b.set_lsb()), 7);
    }

    #[test]
    fn test_select_mask() {
        let x = rand::random::<Block>();
        assert_eq!(SELECT_MASK[0] & x, Block::default());
        assert_eq!(SELECT_MASK[1] & x, x);
        assert_eq!(x.flip().flip(), x);
    }

    #[test]
    fn test_xor() {
        let x = rand::random::<Block>();
        let y = rand::random::<Block>();
        assert_eq!(x ^ y ^ y, x);

        let mut z = x;
        z ^= y;
        assert_eq!(z, x ^ y);
    }

    #[test]
    fn test_slice() {
        let bytes = [3u8; 16];
        assert_eq!(Block::try_from_slice(&bytes), Some(Block::from(bytes)));
        assert_eq!(Block::try_from_slice(&bytes[..15]), None);
    }
}
