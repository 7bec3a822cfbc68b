use circuit::Circuit;
use crypto_core::PaillierPublicKey;
use rand::{CryptoRng, Rng};
use tracing::{debug, info};

use super::{
    AliceGarbling, AliceSetup, BlindedInput, BobChoice, CompareError, ProtocolParams, LOG_TARGET,
};
use crate::{HalfGateEvaluator, OtReceiverState};

enum BobStep {
    Init,
    Chosen { ot: OtReceiverState },
    Done,
}

/// The evaluator. Learns the comparison bit in step 4.
pub struct Bob {
    params: ProtocolParams,
    pk: PaillierPublicKey,
    input: u64,
    circuit: Circuit,
    step: BobStep,
}

impl Bob {
    pub fn new(
        params: ProtocolParams,
        pk: PaillierPublicKey,
        input: u64,
    ) -> Result<Self, CompareError> {
        params.validate(&pk)?;
        params.check_input(input)?;
        Ok(Self {
            circuit: Circuit::comparison(params.l, params.inequality),
            params,
            pk,
            input,
            step: BobStep::Init,
        })
    }

    pub fn params(&self) -> &ProtocolParams {
        &self.params
    }

    /// Step 2: blind the input into `ct_gamma` and choose OT keys by the
    /// bits of the mask `rho`.
    pub fn step2<R: Rng + CryptoRng>(
        &mut self,
        msg: &AliceSetup,
        rng: &mut R,
    ) -> Result<BobChoice, CompareError> {
        if !matches!(self.step, BobStep::Init) {
            return Err(CompareError::OutOfOrder {
                party: "Bob",
                step: 2,
            });
        }

        let blinded =
            BlindedInput::generate(&self.params, &self.pk, &msg.ct_input, self.input, rng)?;
        let choices = blinded.rho_bits(self.params.wires());
        let (ot, ot_points) = OtReceiverState::choose(&msg.ot_point, &choices, rng)?;
        debug!(target: LOG_TARGET, lanes = ot_points.len(), "bob: OT points chosen");

        self.step = BobStep::Chosen { ot };
        info!(target: LOG_TARGET, "bob: step 2 done");
        Ok(BobChoice {
            ct_gamma: blinded.ct_gamma().clone(),
            ot_points,
        })
    }

    /// Step 4: retrieve Bob's keys, evaluate and translate the output.
    pub fn step4(&mut self, msg: &AliceGarbling) -> Result<bool, CompareError> {
        let ot = match std::mem::replace(&mut self.step, BobStep::Done) {
            BobStep::Chosen { ot } => ot,
            other => {
                self.step = other;
                return Err(CompareError::OutOfOrder {
                    party: "Bob",
                    step: 4,
                });
            }
        };

        let bob_keys = ot.retrieve(&msg.ot_masked)?;
        let mut ev = HalfGateEvaluator::new();
        let bit = ev.eval_bit(&self.circuit, &msg.gc, &msg.alice_keys, &bob_keys)?;
        let result = self.params.inequality.finalize(bit);

        info!(target: LOG_TARGET, inequality = ?self.params.inequality, result, "bob: step 4 done");
        Ok(result)
    }
}
