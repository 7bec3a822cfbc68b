use circuit::Circuit;
use crypto_core::{utils::biguint_bits, PaillierSecretKey};
use num_bigint::BigUint;
use rand::{CryptoRng, Rng};
use tracing::{debug, info};
use zeroize::Zeroize;

use super::{AliceGarbling, AliceSetup, BobChoice, CompareError, ProtocolParams, LOG_TARGET};
use crate::{encode, GCGenerator, HalfGateGenerator, OtSenderState};

enum AliceStep {
    Init,
    SetupSent { ot: OtSenderState },
    Done,
}

/// The garbler. Holds the Paillier secret key and runs steps 1 and 3.
pub struct Alice {
    params: ProtocolParams,
    sk: PaillierSecretKey,
    input: u64,
    circuit: Circuit,
    step: AliceStep,
}

impl Alice {
    pub fn new(
        params: ProtocolParams,
        sk: PaillierSecretKey,
        input: u64,
    ) -> Result<Self, CompareError> {
        params.validate(sk.public_key())?;
        params.check_input(input)?;
        Ok(Self {
            circuit: Circuit::comparison(params.l, params.inequality),
            params,
            sk,
            input,
            step: AliceStep::Init,
        })
    }

    pub fn params(&self) -> &ProtocolParams {
        &self.params
    }

    /// Step 1: start the OT sender and encrypt the input.
    pub fn step1<R: Rng + CryptoRng>(&mut self, rng: &mut R) -> Result<AliceSetup, CompareError> {
        if !matches!(self.step, AliceStep::Init) {
            return Err(CompareError::OutOfOrder {
                party: "Alice",
                step: 1,
            });
        }

        let ot = OtSenderState::setup(rng);
        let ct_input = self
            .sk
            .public_key()
            .encrypt(&BigUint::from(self.input), rng)?;
        let msg = AliceSetup {
            ct_input,
            ot_point: ot.public_point(),
        };

        self.step = AliceStep::SetupSent { ot };
        info!(target: LOG_TARGET, l = self.params.l, "alice: step 1 done");
        Ok(msg)
    }

    /// Step 3: garble the circuit, answer Bob's OT and pick Alice's keys by
    /// the bits of the decrypted `gamma`.
    pub fn step3<R: Rng + CryptoRng>(
        &mut self,
        msg: &BobChoice,
        rng: &mut R,
    ) -> Result<AliceGarbling, CompareError> {
        let ot = match std::mem::replace(&mut self.step, AliceStep::Done) {
            AliceStep::SetupSent { ot } => ot,
            other => {
                self.step = other;
                return Err(CompareError::OutOfOrder {
                    party: "Alice",
                    step: 3,
                });
            }
        };

        let wires = self.params.wires();
        let gamma = self.sk.decrypt(&msg.ct_gamma)?;
        let mut gamma_bits = biguint_bits(&gamma, wires);

        let mut gen = HalfGateGenerator::new(rng);
        let mut alice_pairs = gen.input_keys(rng, wires);
        let mut bob_pairs = gen.input_keys(rng, wires);
        let gc = gen.garble(&self.circuit, &alice_pairs, &bob_pairs)?;
        debug!(target: LOG_TARGET, and_gates = gc.table.len(), "alice: circuit garbled");

        let ot_inputs: Vec<_> = bob_pairs.iter().map(|k| (k.zero, k.one)).collect();
        let ot_masked = ot.derive(&msg.ot_points, &ot_inputs)?;
        let alice_keys = encode(&alice_pairs, &gamma_bits);

        alice_pairs.zeroize();
        bob_pairs.zeroize();
        gamma_bits.zeroize();

        info!(target: LOG_TARGET, "alice: step 3 done");
        Ok(AliceGarbling {
            gc,
            ot_masked,
            alice_keys,
        })
    }
}
