//! The keyed hash used for wire keys and OT key derivation.
//!
//! Every call computes `SHA-512(domain || i || x)` truncated to a `Block`,
//! where `i` is a tweak (gate counter or OT lane) and `domain` separates
//! the uses from each other.

use crate::block::{Block, KEY_BYTES};
use sha2::{Digest, Sha512};

pub struct KeyHash {
    domain: &'static [u8],
}

/// Half-gate hash, tweaked with the gate counter.
pub static GATE_HASH: KeyHash = KeyHash::new(b"twopc.gate");

/// Translation table hash.
pub static OUTPUT_HASH: KeyHash = KeyHash::new(b"twopc.output");

/// OT key derivation hash, tweaked with the lane index.
pub static OT_HASH: KeyHash = KeyHash::new(b"twopc.ot");

impl KeyHash {
    pub const fn new(domain: &'static [u8]) -> Self {
        KeyHash { domain }
    }

    /// Tweakable hash of a single block.
    #[inline]
    pub fn tccr_hash(&self, i: Block, x: Block) -> Block {
        self.hash_bytes(i, x.as_ref())
    }

    /// Tweakable hash of an arbitrary byte string.
    pub fn hash_bytes(&self, i: Block, bytes: &[u8]) -> Block {
        let mut hasher = Sha512::new();
        hasher.update(self.domain);
        hasher.update(i.as_ref());
        hasher.update(bytes);
        let digest = hasher.finalize();

        let mut res = [0u8; KEY_BYTES];
        res.copy_from_slice(&digest[..KEY_BYTES]);
        Block::from(res)
    }
}
