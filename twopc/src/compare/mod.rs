//! Two-party secure comparison.
//!
//! Alice garbles, Bob evaluates. Four steps, strictly in order:
//! 1. Alice starts the OT sender and sends her encrypted input.
//! 2. Bob blinds his input into `ct_gamma` and makes his OT choices.
//! 3. Alice decrypts `gamma`, garbles the circuit, answers the OT and sends
//!    her input keys.
//! 4. Bob retrieves his keys, evaluates and reads the result.

pub mod alice;
pub mod blind;
pub mod bob;
pub mod errors;
pub mod messages;
pub mod params;

pub use alice::Alice;
pub use blind::BlindedInput;
pub use bob::Bob;
pub use errors::CompareError;
pub use messages::{AliceGarbling, AliceSetup, BobChoice};
pub use params::ProtocolParams;

use crypto_core::{AbstractChannel, PaillierSecretKey};
use rand::{CryptoRng, Rng};

pub(crate) const LOG_TARGET: &str = "twopc::compare";

/// Run all four steps in one process and return `[a R b]` for the
/// configured relation `R`.
pub fn compare_local<R: Rng + CryptoRng>(
    params: ProtocolParams,
    sk: &PaillierSecretKey,
    a: u64,
    b: u64,
    rng: &mut R,
) -> Result<bool, CompareError> {
    let mut alice = Alice::new(params, sk.clone(), a)?;
    let mut bob = Bob::new(params, sk.public_key().clone(), b)?;

    let setup = alice.step1(rng)?;
    let choice = bob.step2(&setup, rng)?;
    let garbling = alice.step3(&choice, rng)?;
    bob.step4(&garbling)
}

/// Alice's side of a run over `channel`.
pub fn run_alice<C: AbstractChannel, R: Rng + CryptoRng>(
    alice: &mut Alice,
    channel: &mut C,
    rng: &mut R,
) -> Result<(), CompareError> {
    alice.step1(rng)?.send(channel)?;
    let choice = BobChoice::receive(channel)?;
    alice.step3(&choice, rng)?.send(channel)
}

/// Bob's side of a run over `channel`; returns the comparison bit.
pub fn run_bob<C: AbstractChannel, R: Rng + CryptoRng>(
    bob: &mut Bob,
    channel: &mut C,
    rng: &mut R,
) -> Result<bool, CompareError> {
    let setup = AliceSetup::receive(channel)?;
    bob.step2(&setup, rng)?.send(channel)?;
    let garbling = AliceGarbling::receive(channel)?;
    bob.step4(&garbling)
}

#[cfg(test)]
mod tests {
    use std::thread;

    use circuit::Inequality;
    use crypto_core::{local_channel_pair, paillier, AesRng, Block, PaillierSecretKey};
    use num_bigint::BigUint;
    use num_traits::One;

    use super::*;
    use crate::{ot::ted::tests::off_curve_encoding, OTReceiverError, OTSenderError};

    /// Keys over the Mersenne primes 2^127 - 1 and 2^107 - 1.
    fn test_key() -> PaillierSecretKey {
        let one = BigUint::one();
        let p = (&one << 127) - &one;
        let q = (&one << 107) - &one;
        paillier::from_primes(&p, &q).unwrap().1
    }

    fn params(l: usize, inequality: Inequality) -> ProtocolParams {
        ProtocolParams::new(l, 40, inequality)
    }

    #[test]
    fn compare_examples_test() {
        let mut rng = AesRng::new();
        let sk = test_key();
        let p = params(4, Inequality::Greater);

        for _ in 0..2 {
            assert!(compare_local(p, &sk, 7, 3, &mut rng).unwrap());
            assert!(!compare_local(p, &sk, 2, 9, &mut rng).unwrap());
            assert!(!compare_local(p, &sk, 5, 5, &mut rng).unwrap());
        }
    }

    #[test]
    fn compare_all_relations_test() {
        let mut rng = AesRng::new();
        let sk = test_key();
        let cases = [(7u64, 3u64), (2, 9), (5, 5), (0, 15), (15, 0), (0, 0)];

        for param in 0..4 {
            let ineq = Inequality::from_param(param);
            for (a, b) in cases {
                let res = compare_local(params(4, ineq), &sk, a, b, &mut rng).unwrap();
                assert_eq!(res, ineq.holds(a, b), "{ineq:?} a={a} b={b}");
            }
        }
    }

    #[test]
    fn compare_default_width_test() {
        let mut rng = AesRng::new();
        let sk = test_key();
        let p = ProtocolParams::default();
        let (a, b) = (u32::MAX as u64, u32::MAX as u64 - 1);
        assert!(compare_local(p, &sk, a, b, &mut rng).unwrap());
        assert!(!compare_local(p, &sk, b, a, &mut rng).unwrap());
    }

    #[test]
    fn out_of_order_test() {
        let mut rng = AesRng::new();
        let sk = test_key();
        let p = params(4, Inequality::Greater);
        let mut alice = Alice::new(p, sk.clone(), 3).unwrap();
        let mut bob = Bob::new(p, sk.public_key().clone(), 2).unwrap();

        let setup = alice.step1(&mut rng).unwrap();
        assert!(matches!(
            alice.step1(&mut rng),
            Err(CompareError::OutOfOrder { party: "Alice", step: 1 })
        ));

        let garbling = AliceGarbling {
            gc: crate::GarbledCircuit::new(
                vec![],
                crate::TranslationTable {
                    hashes: [Block::default(); 2],
                },
            ),
            ot_masked: vec![],
            alice_keys: vec![],
        };
        assert!(matches!(
            bob.step4(&garbling),
            Err(CompareError::OutOfOrder { party: "Bob", step: 4 })
        ));

        // A rejected call leaves the party usable.
        let choice = bob.step2(&setup, &mut rng).unwrap();
        let garbling = alice.step3(&choice, &mut rng).unwrap();
        assert!(bob.step4(&garbling).unwrap());

        assert!(matches!(
            alice.step3(&choice, &mut rng),
            Err(CompareError::OutOfOrder { party: "Alice", step: 3 })
        ));
    }

    #[test]
    fn tampered_garbling_test() {
        let mut rng = AesRng::new();
        let sk = test_key();
        let p = params(4, Inequality::Greater);
        let mut alice = Alice::new(p, sk.clone(), 9).unwrap();
        let mut bob = Bob::new(p, sk.public_key().clone(), 4).unwrap();

        let setup = alice.step1(&mut rng).unwrap();
        let choice = bob.step2(&setup, &mut rng).unwrap();
        let mut garbling = alice.step3(&choice, &mut rng).unwrap();
        garbling.alice_keys[0] = garbling.alice_keys[0].flip();

        let err = bob.step4(&garbling).unwrap_err();
        assert!(err.is_translation_mismatch(), "{err:?}");
    }

    #[test]
    fn tampered_point_test() {
        let mut rng = AesRng::new();
        let sk = test_key();
        let p = params(4, Inequality::Greater);
        let mut bob = Bob::new(p, sk.public_key().clone(), 4).unwrap();
        let mut alice = Alice::new(p, sk.clone(), 9).unwrap();

        let mut setup = alice.step1(&mut rng).unwrap();
        setup.ot_point = off_curve_encoding();
        let err = bob.step2(&setup, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            CompareError::OtReceiver(OTReceiverError::InvalidPoint(_))
        ));

        let mut alice = Alice::new(p, sk.clone(), 9).unwrap();
        let mut bob = Bob::new(p, sk.public_key().clone(), 4).unwrap();
        let setup = alice.step1(&mut rng).unwrap();
        let mut choice = bob.step2(&setup, &mut rng).unwrap();
        choice.ot_points[2] = off_curve_encoding();
        assert!(matches!(
            alice.step3(&choice, &mut rng),
            Err(CompareError::OtSender(OTSenderError::InvalidPoint(_)))
        ));
    }

    #[test]
    fn malformed_gamma_test() {
        let mut rng = AesRng::new();
        let sk = test_key();
        let p = params(4, Inequality::Greater);
        let n = sk.public_key().n().clone();

        for bad in [BigUint::from(0u32), n.clone(), &n * BigUint::from(5u32)] {
            let mut alice = Alice::new(p, sk.clone(), 9).unwrap();
            let mut bob = Bob::new(p, sk.public_key().clone(), 4).unwrap();
            let setup = alice.step1(&mut rng).unwrap();
            let mut choice = bob.step2(&setup, &mut rng).unwrap();
            choice.ct_gamma = crypto_core::PaillierCiphertext(bad);
            assert!(matches!(
                alice.step3(&choice, &mut rng),
                Err(CompareError::Paillier(
                    crypto_core::PaillierError::InvalidCiphertext
                ))
            ));
        }
    }

    #[test]
    fn invalid_params_test() {
        let sk = test_key();
        let pk = sk.public_key();
        assert!(params(0, Inequality::Greater).validate(pk).is_err());
        assert!(params(65, Inequality::Greater).validate(pk).is_err());
        assert!(ProtocolParams::new(32, 0, Inequality::Less).validate(pk).is_err());
        // 234-bit modulus
        assert_eq!(pk.bits(), 234);
        assert!(ProtocolParams::new(64, 167, Inequality::Less).validate(pk).is_ok());
        assert!(ProtocolParams::new(64, 168, Inequality::Less).validate(pk).is_err());

        assert!(matches!(
            Alice::new(params(4, Inequality::Greater), sk.clone(), 16),
            Err(CompareError::InputTooLarge { input: 16, l: 4 })
        ));
    }

    #[test]
    fn channel_run_test() {
        let sk = test_key();
        let p = params(8, Inequality::GreaterOrEqual);
        let mut alice = Alice::new(p, sk.clone(), 200).unwrap();
        let mut bob = Bob::new(p, sk.public_key().clone(), 200).unwrap();

        let (mut ch_alice, mut ch_bob) = local_channel_pair().unwrap();
        let handle = thread::spawn(move || {
            let mut rng = AesRng::new();
            run_alice(&mut alice, &mut ch_alice, &mut rng).unwrap();
        });

        let mut rng = AesRng::new();
        assert!(run_bob(&mut bob, &mut ch_bob, &mut rng).unwrap());
        handle.join().unwrap();
    }
}
