//! Half-gate garbling with free XOR.

pub mod errors;
pub mod evaluator;
pub mod gc;
pub mod generator;

pub use errors::*;
pub use evaluator::*;
pub use gc::*;
pub use generator::*;

use crypto_core::Block;

/// Pick one key per wire according to `bits`.
pub fn encode(keys: &[WireKeyPair], bits: &[bool]) -> Vec<Block> {
    keys.iter()
        .zip(bits.iter())
        .map(|(k, b)| k.select(*b))
        .collect()
}
