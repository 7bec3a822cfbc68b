use super::{GCGenerator, GeneratorError};
use crate::{GarbledCircuit, TranslationTable, WireKeyPair};
use circuit::gate::{Circuit, Gate};
use crypto_core::{
    block::{Block, SELECT_MASK},
    GATE_HASH,
};
use rand::{CryptoRng, Rng};
use zeroize::{Zeroize, ZeroizeOnDrop};

#[derive(Zeroize, ZeroizeOnDrop)]
pub struct HalfGateGenerator {
    counter: u128,
    delta: Block,
}

impl HalfGateGenerator {
    /// A generator with a fresh offset.
    pub fn new<R: Rng + CryptoRng>(rng: &mut R) -> Self {
        Self::with_delta(rng.gen::<Block>())
    }

    /// A generator with the given offset; its lsb is forced to 1.
    pub fn with_delta(delta: Block) -> Self {
        Self {
            counter: 0,
            delta: delta.set_lsb(),
        }
    }

    pub fn delta(&self) -> Block {
        self.delta
    }

    /// Fresh key pairs for `n` input wires.
    pub fn input_keys<R: Rng + CryptoRng>(&self, rng: &mut R, n: usize) -> Vec<WireKeyPair> {
        (0..n)
            .map(|_| WireKeyPair::new(rng.gen::<Block>(), self.delta))
            .collect()
    }

    #[inline]
    pub fn and_gate(&mut self, x: &WireKeyPair, y: &WireKeyPair) -> (WireKeyPair, [Block; 2]) {
        let pa = x.signal() as usize;
        let pb = y.signal() as usize;

        let index = self.counter;
        let index_next = self.counter + 1;
        self.counter += 2;

        let hash_x0 = GATE_HASH.tccr_hash(index.into(), x.zero);
        let hash_y0 = GATE_HASH.tccr_hash(index_next.into(), y.zero);

        // First half gate: garbler knows pb
        let t_g = hash_x0 ^ GATE_HASH.tccr_hash(index.into(), x.one) ^ (SELECT_MASK[pb] & self.delta);
        let w_g = hash_x0 ^ (SELECT_MASK[pa] & t_g);

        // Second half gate: evaluator knows (pb xor b)
        let t_e = hash_y0 ^ GATE_HASH.tccr_hash(index_next.into(), y.one) ^ x.zero;
        let w_e = hash_y0 ^ (SELECT_MASK[pb] & (t_e ^ x.zero));

        (WireKeyPair::new(w_g ^ w_e, self.delta), [t_g, t_e])
    }

    #[inline]
    pub fn xor_gate(&self, x: &WireKeyPair, y: &WireKeyPair) -> WireKeyPair {
        WireKeyPair::new(x.zero ^ y.zero, self.delta)
    }

    /// Garble every gate of `circ`, returning the AND table and the key
    /// pairs of all wires.
    pub fn gen_core(
        &mut self,
        circ: &Circuit,
        garbler_inputs: &[WireKeyPair],
        evaluator_inputs: &[WireKeyPair],
    ) -> Result<(Vec<[Block; 2]>, Vec<WireKeyPair>), GeneratorError> {
        for inputs in [garbler_inputs, evaluator_inputs] {
            if inputs.len() != circ.ninput_wires {
                return Err(GeneratorError::InvalidInputLength {
                    expected: circ.ninput_wires,
                    actual: inputs.len(),
                });
            }
        }

        let mut table: Vec<[Block; 2]> = Vec::with_capacity(circ.nand);
        let mut wire_keys: Vec<Option<WireKeyPair>> = vec![None; circ.nwires];

        // Inputs are re-derived from their zero keys so that every wire
        // shares this generator's offset.
        for (wire, keys) in wire_keys
            .iter_mut()
            .zip(garbler_inputs.iter().chain(evaluator_inputs.iter()))
        {
            *wire = Some(WireKeyPair::new(keys.zero, self.delta));
        }

        for gate in circ.gates.iter() {
            match *gate {
                Gate::Xor {
                    lin_id,
                    rin_id,
                    out_id,
                    ..
                } => {
                    let x = wire_keys[lin_id].ok_or(GeneratorError::UninitializedLabel(lin_id))?;
                    let y = wire_keys[rin_id].ok_or(GeneratorError::UninitializedLabel(rin_id))?;
                    wire_keys[out_id] = Some(self.xor_gate(&x, &y));
                }
                Gate::And {
                    lin_id,
                    rin_id,
                    out_id,
                    ..
                } => {
                    let x = wire_keys[lin_id].ok_or(GeneratorError::UninitializedLabel(lin_id))?;
                    let y = wire_keys[rin_id].ok_or(GeneratorError::UninitializedLabel(rin_id))?;
                    let (z, t) = self.and_gate(&x, &y);
                    table.push(t);
                    wire_keys[out_id] = Some(z);
                }
            };
        }

        let wire_keys = wire_keys
            .into_iter()
            .enumerate()
            .map(|(id, keys)| keys.ok_or(GeneratorError::UninitializedLabel(id)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok((table, wire_keys))
    }
}

impl GCGenerator for HalfGateGenerator {
    fn garble(
        &mut self,
        circ: &Circuit,
        garbler_inputs: &[WireKeyPair],
        evaluator_inputs: &[WireKeyPair],
    ) -> Result<GarbledCircuit, GeneratorError> {
        let (table, wire_keys) = self.gen_core(circ, garbler_inputs, evaluator_inputs)?;

        // The table covers the first output wire; comparison circuits have one.
        let out_id = circ.output_wires().start;
        let output = wire_keys
            .get(out_id)
            .ok_or(GeneratorError::UninitializedLabel(out_id))?;
        let translation = TranslationTable::new(output);

        Ok(GarbledCircuit::new(table, translation))
    }
}
