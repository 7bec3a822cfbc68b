//! Base OT over the Twisted Edwards curve.
//!
//! The sender publishes `S = yB` and keeps `T = yS`. For each lane the
//! receiver publishes `R = xB`, or `R = xB + S` to choose the second
//! message. The sender masks message 0 with `H(yR)` and message 1 with
//! `H(yR - T)`; the receiver unmasks its choice with `H(xS)`.

use crypto_core::{
    ted::{random_scalar, EncodedPoint},
    AbstractChannel, Block, TedPoint,
};
use num_bigint::BigUint;
use rand::{CryptoRng, Rng};
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::{hash_point, OTReceiverError, OTSenderError, OtReceiver, OtSender};

const LOG_TARGET: &str = "twopc::ot";

/// Sender secrets for one batch of transfers.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct OtSenderState {
    y: BigUint,
    s: TedPoint,
    t: TedPoint,
}

impl OtSenderState {
    /// Sample `y` and compute `S = yB`, `T = yS`.
    pub fn setup<R: Rng + CryptoRng>(rng: &mut R) -> Self {
        let y = random_scalar(rng);
        let s = TedPoint::base().scalar_mul(&y);
        let t = s.scalar_mul(&y);
        Self { y, s, t }
    }

    /// Encoding of `S`, sent to the receiver.
    pub fn public_point(&self) -> EncodedPoint {
        self.s.encode()
    }

    /// Mask each pair of messages under the keys bound to the receiver's
    /// points. Every point must decode into the prime-order subgroup.
    pub fn derive(
        &self,
        points: &[EncodedPoint],
        inputs: &[(Block, Block)],
    ) -> Result<Vec<[Block; 2]>, OTSenderError> {
        if points.len() != inputs.len() {
            return Err(OTSenderError::InvalidInputLength);
        }
        let neg_t = self.t.negate();

        let masked = points
            .iter()
            .zip(inputs.iter())
            .enumerate()
            .map(|(i, (enc, (m0, m1)))| -> Result<[Block; 2], OTSenderError> {
                let r = TedPoint::decode_subgroup(enc)?;
                let yr = r.scalar_mul(&self.y);
                let yr_t = yr.add_point(&neg_t);
                Ok([*m0 ^ hash_point(i, &yr), *m1 ^ hash_point(i, &yr_t)])
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(target: LOG_TARGET, lanes = masked.len(), "sender derived masked pairs");
        Ok(masked)
    }
}

/// Receiver secrets: one scalar and one choice bit per lane.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct OtReceiverState {
    s: TedPoint,
    x: Vec<BigUint>,
    choices: Vec<bool>,
}

impl OtReceiverState {
    /// Validate `S` and commit to `choices`, returning the points to send.
    pub fn choose<R: Rng + CryptoRng>(
        sender_point: &EncodedPoint,
        choices: &[bool],
        rng: &mut R,
    ) -> Result<(Self, Vec<EncodedPoint>), OTReceiverError> {
        let s = TedPoint::decode_subgroup(sender_point)?;
        let base = TedPoint::base();

        let mut x = Vec::with_capacity(choices.len());
        let mut points = Vec::with_capacity(choices.len());
        for choice in choices {
            let xi = random_scalar(rng);
            let mut r = base.scalar_mul(&xi);
            if *choice {
                r = r.add_point(&s);
            }
            points.push(r.encode());
            x.push(xi);
        }

        debug!(target: LOG_TARGET, lanes = points.len(), "receiver chose");
        let state = Self {
            s,
            x,
            choices: choices.to_vec(),
        };
        Ok((state, points))
    }

    /// Unmask the chosen message of every lane.
    pub fn retrieve(&self, masked: &[[Block; 2]]) -> Result<Vec<Block>, OTReceiverError> {
        if masked.len() != self.choices.len() {
            return Err(OTReceiverError::InvalidInputLength);
        }
        let keys = masked
            .iter()
            .zip(self.x.iter().zip(self.choices.iter()))
            .enumerate()
            .map(|(i, (pair, (xi, choice)))| {
                let k = hash_point(i, &self.s.scalar_mul(xi));
                pair[*choice as usize] ^ k
            })
            .collect();
        Ok(keys)
    }
}

#[derive(Copy, Clone, Default)]
pub struct TedOtSender;

impl OtSender for TedOtSender {
    type Msg = Block;

    fn send<C: AbstractChannel, R: CryptoRng + Rng>(
        &mut self,
        channel: &mut C,
        inputs: &[(Block, Block)],
        rng: &mut R,
    ) -> Result<(), OTSenderError> {
        let state = OtSenderState::setup(rng);
        channel.write_bytes(&state.public_point())?;
        channel.flush()?;

        let points = (0..inputs.len())
            .map(|_| channel.read_point())
            .collect::<std::io::Result<Vec<_>>>()?;
        let masked = state.derive(&points, inputs)?;

        for [c0, c1] in masked.iter() {
            channel.write_block(c0)?;
            channel.write_block(c1)?;
        }
        channel.flush()?;

        Ok(())
    }
}

#[derive(Copy, Clone, Default)]
pub struct TedOtReceiver;

impl OtReceiver for TedOtReceiver {
    type Msg = Block;

    fn receive<C: AbstractChannel, R: CryptoRng + Rng>(
        &mut self,
        channel: &mut C,
        inputs: &[bool],
        rng: &mut R,
    ) -> Result<Vec<Block>, OTReceiverError> {
        let s = channel.read_point()?;
        let (state, points) = OtReceiverState::choose(&s, inputs, rng)?;
        for r in points.iter() {
            channel.write_bytes(r)?;
        }
        channel.flush()?;

        let masked = (0..inputs.len())
            .map(|_| -> std::io::Result<[Block; 2]> {
                Ok([channel.read_block()?, channel.read_block()?])
            })
            .collect::<std::io::Result<Vec<_>>>()?;
        state.retrieve(&masked)
    }
}
