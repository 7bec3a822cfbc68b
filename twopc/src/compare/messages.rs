//! The three messages of a comparison run. Each can travel over an
//! [`AbstractChannel`] or through serde.

use crypto_core::{ted::EncodedPoint, AbstractChannel, Block, PaillierCiphertext};
use serde::{Deserialize, Serialize};

use super::{params::MAX_L, CompareError};
use crate::{GarbledCircuit, TranslationTable};

/// Upper bound on per-wire or per-gate items in a received message.
const MAX_ITEMS: usize = MAX_L + 1;

fn read_len<C: AbstractChannel>(channel: &mut C, what: &str) -> Result<usize, CompareError> {
    let len = channel.read_u32()? as usize;
    if len > MAX_ITEMS {
        return Err(CompareError::InvalidMessage(format!("{len} {what}")));
    }
    Ok(len)
}

fn write_pairs<C: AbstractChannel>(channel: &mut C, pairs: &[[Block; 2]]) -> std::io::Result<()> {
    channel.write_u32(pairs.len() as u32)?;
    for [x, y] in pairs {
        channel.write_block(x)?;
        channel.write_block(y)?;
    }
    Ok(())
}

fn read_pairs<C: AbstractChannel>(
    channel: &mut C,
    what: &str,
) -> Result<Vec<[Block; 2]>, CompareError> {
    let len = read_len(channel, what)?;
    let mut pairs = Vec::with_capacity(len);
    for _ in 0..len {
        pairs.push([channel.read_block()?, channel.read_block()?]);
    }
    Ok(pairs)
}

/// Step 1, Alice to Bob.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliceSetup {
    /// Alice's input under her Paillier key.
    pub ct_input: PaillierCiphertext,
    /// The OT sender point `S`.
    pub ot_point: EncodedPoint,
}

impl AliceSetup {
    pub fn send<C: AbstractChannel>(&self, channel: &mut C) -> Result<(), CompareError> {
        channel.write_biguint(&self.ct_input.0)?;
        channel.write_bytes(&self.ot_point)?;
        channel.flush()?;
        Ok(())
    }

    pub fn receive<C: AbstractChannel>(channel: &mut C) -> Result<Self, CompareError> {
        let ct_input = PaillierCiphertext(channel.read_biguint()?);
        let ot_point = channel.read_point()?;
        Ok(Self { ct_input, ot_point })
    }
}

/// Step 2, Bob to Alice.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BobChoice {
    /// Encryption of the blinded value `gamma`.
    pub ct_gamma: PaillierCiphertext,
    /// One OT receiver point per Bob input wire.
    pub ot_points: Vec<EncodedPoint>,
}

impl BobChoice {
    pub fn send<C: AbstractChannel>(&self, channel: &mut C) -> Result<(), CompareError> {
        channel.write_biguint(&self.ct_gamma.0)?;
        channel.write_u32(self.ot_points.len() as u32)?;
        for p in self.ot_points.iter() {
            channel.write_bytes(p)?;
        }
        channel.flush()?;
        Ok(())
    }

    pub fn receive<C: AbstractChannel>(channel: &mut C) -> Result<Self, CompareError> {
        let ct_gamma = PaillierCiphertext(channel.read_biguint()?);
        let len = read_len(channel, "OT points")?;
        let ot_points = (0..len)
            .map(|_| channel.read_point())
            .collect::<std::io::Result<Vec<_>>>()?;
        Ok(Self { ct_gamma, ot_points })
    }
}

/// Step 3, Alice to Bob.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliceGarbling {
    pub gc: GarbledCircuit,
    /// Masked key pairs of Bob's input wires.
    pub ot_masked: Vec<[Block; 2]>,
    /// Alice's input keys, one per wire.
    pub alice_keys: Vec<Block>,
}

impl AliceGarbling {
    pub fn send<C: AbstractChannel>(&self, channel: &mut C) -> Result<(), CompareError> {
        write_pairs(channel, &self.gc.table)?;
        channel.write_block(&self.gc.translation.hashes[0])?;
        channel.write_block(&self.gc.translation.hashes[1])?;
        write_pairs(channel, &self.ot_masked)?;
        channel.write_blocks(&self.alice_keys)?;
        channel.flush()?;
        Ok(())
    }

    pub fn receive<C: AbstractChannel>(channel: &mut C) -> Result<Self, CompareError> {
        let table = read_pairs(channel, "AND gates")?;
        let hashes = [channel.read_block()?, channel.read_block()?];
        let ot_masked = read_pairs(channel, "masked pairs")?;
        let len = read_len(channel, "input keys")?;
        let alice_keys = (0..len)
            .map(|_| channel.read_block())
            .collect::<std::io::Result<Vec<_>>>()?;

        Ok(Self {
            gc: GarbledCircuit::new(table, TranslationTable { hashes }),
            ot_masked,
            alice_keys,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crypto_core::{local_channel_pair, AesRng, TedPoint};
    use num_bigint::BigUint;
    use rand::Rng;
    use std::thread;

    #[test]
    fn channel_messages_test() {
        let mut rng = AesRng::new();
        let setup = AliceSetup {
            ct_input: PaillierCiphertext(BigUint::from(123456789u64) << 300),
            ot_point: TedPoint::base().encode(),
        };
        let choice = BobChoice {
            ct_gamma: PaillierCiphertext(BigUint::from(42u32)),
            ot_points: vec![TedPoint::base().double().encode(); 5],
        };
        let garbling = AliceGarbling {
            gc: GarbledCircuit::new(
                (0..4).map(|_| [rng.gen(), rng.gen()]).collect(),
                TranslationTable {
                    hashes: [rng.gen(), rng.gen()],
                },
            ),
            ot_masked: (0..5).map(|_| [rng.gen(), rng.gen()]).collect(),
            alice_keys: rng.gen_blocks(5),
        };

        let (mut alice, mut bob) = local_channel_pair().unwrap();
        let (s, g) = (setup.clone(), garbling.clone());
        let handle = thread::spawn(move || {
            s.send(&mut alice).unwrap();
            g.send(&mut alice).unwrap();
            BobChoice::receive(&mut alice).unwrap()
        });

        assert_eq!(AliceSetup::receive(&mut bob).unwrap(), setup);
        assert_eq!(AliceGarbling::receive(&mut bob).unwrap(), garbling);
        choice.send(&mut bob).unwrap();
        assert_eq!(handle.join().unwrap(), choice);
    }

    #[test]
    fn oversized_message_test() {
        let (mut alice, mut bob) = local_channel_pair().unwrap();
        alice.write_biguint(&BigUint::from(1u32)).unwrap();
        alice.write_u32(1 << 20).unwrap();
        alice.flush().unwrap();
        assert!(matches!(
            BobChoice::receive(&mut bob),
            Err(CompareError::InvalidMessage(_))
        ));
    }
}
