//! Traits for 1-out-of-2 oblivious transfer (OT) and a base OT over the
//! Twisted Edwards curve.

pub mod errors;
pub mod ted;

pub use errors::{OTReceiverError, OTSenderError};
pub use ted::*;

use crypto_core::{AbstractChannel, Block, TedPoint, OT_HASH};
use rand::{CryptoRng, Rng};

/// Sender side of a batch of OTs, one lane per message pair.
pub trait OtSender
where
    Self: Sized,
{
    type Msg: Sized + AsMut<[u8]>;

    /// Transfer `inputs[i].0` or `inputs[i].1` on lane `i`, as the receiver
    /// chose.
    fn send<C: AbstractChannel, R: CryptoRng + Rng>(
        &mut self,
        channel: &mut C,
        inputs: &[(Self::Msg, Self::Msg)],
        rng: &mut R,
    ) -> Result<(), OTSenderError>;
}

/// Receiver side of a batch of OTs.
pub trait OtReceiver
where
    Self: Sized,
{
    type Msg: Sized + AsMut<[u8]>;

    /// Obtain message `inputs[i]` of lane `i`. The sender never sees the
    /// choices.
    fn receive<C: AbstractChannel, R: CryptoRng + Rng>(
        &mut self,
        channel: &mut C,
        inputs: &[bool],
        rng: &mut R,
    ) -> Result<Vec<Self::Msg>, OTReceiverError>;
}

/// Key for OT lane `lane`: the hash of the point's coordinate sum `x + y`.
pub(crate) fn hash_point(lane: usize, p: &TedPoint) -> Block {
    OT_HASH.hash_bytes(Block::from(lane as u128), &p.coordinate_sum())
}
