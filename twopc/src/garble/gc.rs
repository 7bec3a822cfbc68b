//! Define the struct of garbled circuit.

use crypto_core::{block::Block, OUTPUT_HASH};
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use super::errors::EvaluatorError;

/// The two keys of one wire. `one == zero ^ delta` for every wire garbled
/// under the same offset `delta`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Zeroize)]
pub struct WireKeyPair {
    pub zero: Block,
    pub one: Block,
}

impl WireKeyPair {
    #[inline]
    pub fn new(zero: Block, delta: Block) -> Self {
        Self {
            zero,
            one: zero ^ delta,
        }
    }

    /// The key encoding `bit`.
    #[inline]
    pub fn select(&self, bit: bool) -> Block {
        if bit {
            self.one
        } else {
            self.zero
        }
    }

    /// Signal (permutation) bit of the wire.
    #[inline]
    pub fn signal(&self) -> bool {
        self.zero.lsb()
    }
}

/// Hashes of the two output keys; maps the evaluator's output key back to
/// a bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationTable {
    pub hashes: [Block; 2],
}

impl TranslationTable {
    pub fn new(output: &WireKeyPair) -> Self {
        Self {
            hashes: [hash_output(output.zero), hash_output(output.one)],
        }
    }

    pub fn translate(&self, key: Block) -> Result<bool, EvaluatorError> {
        let h = hash_output(key);
        if h == self.hashes[0] {
            Ok(false)
        } else if h == self.hashes[1] {
            Ok(true)
        } else {
            Err(EvaluatorError::TranslationMismatch)
        }
    }
}

#[inline]
fn hash_output(key: Block) -> Block {
    OUTPUT_HASH.tccr_hash(Block::default(), key)
}

/// Everything the evaluator needs besides its input keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GarbledCircuit {
    /// Two half-gate ciphertexts per AND gate, in gate order.
    pub table: Vec<[Block; 2]>,
    pub translation: TranslationTable,
}

impl GarbledCircuit {
    pub fn new(table: Vec<[Block; 2]>, translation: TranslationTable) -> Self {
        Self { table, translation }
    }
}
