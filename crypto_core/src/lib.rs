pub mod block;
pub mod channel;
pub mod hash;
pub mod paillier;
pub mod rand_aes;
pub mod ted;
pub mod utils;

pub use crate::{
    block::{Block, KEY_BYTES, KEY_SIZE},
    hash::{KeyHash, GATE_HASH, OT_HASH, OUTPUT_HASH},
    paillier::{PaillierCiphertext, PaillierError, PaillierPublicKey, PaillierSecretKey},
    rand_aes::AesRng,
    ted::{CurveError, EncodedPoint, TedPoint},
};

pub use channel::*;
