use crypto_core::{block::SELECT_MASK, Block, GATE_HASH};

use super::{EvaluatorError, GCEvaluator};
use crate::GarbledCircuit;
use circuit::gate::{Circuit, Gate};

#[derive(Default)]
pub struct HalfGateEvaluator {
    counter: u128,
}

impl HalfGateEvaluator {
    pub fn new() -> Self {
        Self { counter: 0 }
    }

    #[inline]
    pub fn and_gate(&mut self, x: Block, y: Block, table: [Block; 2]) -> Block {
        let sa = x.lsb() as usize;
        let sb = y.lsb() as usize;

        let index = self.counter;
        let index_next = self.counter + 1;
        self.counter += 2;

        let hash_x = GATE_HASH.tccr_hash(index.into(), x);
        let hash_y = GATE_HASH.tccr_hash(index_next.into(), y);

        let w_g = hash_x ^ (SELECT_MASK[sa] & table[0]);
        let w_e = hash_y ^ (SELECT_MASK[sb] & (table[1] ^ x));

        w_g ^ w_e
    }

    #[inline]
    pub fn xor_gate(&self, x: Block, y: Block) -> Block {
        x ^ y
    }

    /// Evaluate and map the output key to a bit through the translation
    /// table.
    pub fn eval_bit(
        &mut self,
        circ: &Circuit,
        gc: &GarbledCircuit,
        garbler_keys: &[Block],
        evaluator_keys: &[Block],
    ) -> Result<bool, EvaluatorError> {
        let outputs = self.eval(circ, gc, garbler_keys, evaluator_keys)?;
        let out = outputs
            .first()
            .ok_or(EvaluatorError::UninitializedLabel(circ.nwires))?;
        gc.translation.translate(*out)
    }
}

impl GCEvaluator for HalfGateEvaluator {
    fn eval(
        &mut self,
        circ: &Circuit,
        gc: &GarbledCircuit,
        garbler_keys: &[Block],
        evaluator_keys: &[Block],
    ) -> Result<Vec<Block>, EvaluatorError> {
        for keys in [garbler_keys, evaluator_keys] {
            if keys.len() != circ.ninput_wires {
                return Err(EvaluatorError::InvalidInputLength {
                    expected: circ.ninput_wires,
                    actual: keys.len(),
                });
            }
        }
        if gc.table.len() != circ.nand {
            return Err(EvaluatorError::InvalidTableLength {
                expected: circ.nand,
                actual: gc.table.len(),
            });
        }

        let mut wire_keys: Vec<Option<Block>> = vec![None; circ.nwires];
        for (wire, key) in wire_keys
            .iter_mut()
            .zip(garbler_keys.iter().chain(evaluator_keys.iter()))
        {
            *wire = Some(*key);
        }

        let mut gid = 0;
        for gate in circ.gates.iter() {
            match *gate {
                Gate::Xor {
                    lin_id,
                    rin_id,
                    out_id,
                    ..
                } => {
                    let x = wire_keys[lin_id].ok_or(EvaluatorError::UninitializedLabel(lin_id))?;
                    let y = wire_keys[rin_id].ok_or(EvaluatorError::UninitializedLabel(rin_id))?;
                    wire_keys[out_id] = Some(self.xor_gate(x, y));
                }
                Gate::And {
                    lin_id,
                    rin_id,
                    out_id,
                    ..
                } => {
                    let x = wire_keys[lin_id].ok_or(EvaluatorError::UninitializedLabel(lin_id))?;
                    let y = wire_keys[rin_id].ok_or(EvaluatorError::UninitializedLabel(rin_id))?;
                    wire_keys[out_id] = Some(self.and_gate(x, y, gc.table[gid]));
                    gid += 1;
                }
            };
        }

        circ.output_wires()
            .map(|id| wire_keys[id].ok_or(EvaluatorError::UninitializedLabel(id)))
            .collect()
    }
}
