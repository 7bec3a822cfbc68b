//! Define the structure of gates and circuits.

use crate::errors::CircuitEvalError;

/// `gate_id`: the gate id.
/// `lin_id`, `rin_id` are the wire ids of two fan-in gate inputs.
/// `out_id` is the wire id of the gate output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gate {
    Xor {
        gate_id: usize,
        lin_id: usize,
        rin_id: usize,
        out_id: usize,
    },
    And {
        gate_id: usize,
        lin_id: usize,
        rin_id: usize,
        out_id: usize,
    },
}

/// A two-party boolean circuit.
///
/// Wires `0..ninput_wires` belong to the garbler, the next `ninput_wires`
/// to the evaluator, gate outputs follow in gate order, and the last
/// `noutput_wires` wires are the outputs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Circuit {
    /// Number of wires
    pub nwires: usize,
    /// Number of input wires per party
    pub ninput_wires: usize,
    /// Number of output wires
    pub noutput_wires: usize,
    /// All gates in the circuit
    pub gates: Vec<Gate>,
    /// Number of AND gates
    pub nand: usize,
    /// Number of XOR gates
    pub nxor: usize,
}

impl Circuit {
    /// An empty circuit with `ninput_wires` input wires per party.
    pub fn new(ninput_wires: usize, noutput_wires: usize) -> Self {
        Circuit {
            nwires: 2 * ninput_wires,
            ninput_wires,
            noutput_wires,
            gates: Vec::new(),
            nand: 0,
            nxor: 0,
        }
    }

    pub fn ngates(&self) -> usize {
        self.gates.len()
    }

    /// Wire id of the garbler's `i`-th input.
    #[inline]
    pub fn garbler_input(&self, i: usize) -> usize {
        i
    }

    /// Wire id of the evaluator's `i`-th input.
    #[inline]
    pub fn evaluator_input(&self, i: usize) -> usize {
        self.ninput_wires + i
    }

    /// Wire ids of the outputs.
    pub fn output_wires(&self) -> std::ops::Range<usize> {
        (self.nwires - self.noutput_wires)..self.nwires
    }

    /// Append an XOR gate on two existing wires, returning its output wire.
    pub fn xor(&mut self, lin_id: usize, rin_id: usize) -> usize {
        let out_id = self.nwires;
        self.gates.push(Gate::Xor {
            gate_id: self.gates.len(),
            lin_id,
            rin_id,
            out_id,
        });
        self.nwires += 1;
        self.nxor += 1;
        out_id
    }

    /// Append an AND gate on two existing wires, returning its output wire.
    pub fn and(&mut self, lin_id: usize, rin_id: usize) -> usize {
        let out_id = self.nwires;
        self.gates.push(Gate::And {
            gate_id: self.gates.len(),
            lin_id,
            rin_id,
            out_id,
        });
        self.nwires += 1;
        self.nand += 1;
        out_id
    }

    /// Evaluate the circuit in plaintext. `garbler` and `evaluator` are the
    /// two parties' input bits.
    pub fn eval(&self, garbler: &[bool], evaluator: &[bool]) -> Result<Vec<bool>, CircuitEvalError> {
        for inputs in [garbler, evaluator] {
            if inputs.len() != self.ninput_wires {
                return Err(CircuitEvalError::InvalidInputLength {
                    expected: self.ninput_wires,
                    actual: inputs.len(),
                });
            }
        }

        let mut wires: Vec<Option<bool>> = vec![None; self.nwires];
        for (i, b) in garbler.iter().chain(evaluator.iter()).enumerate() {
            wires[i] = Some(*b);
        }

        for gate in self.gates.iter() {
            let (lin_id, rin_id, out_id, is_and) = match *gate {
                Gate::Xor {
                    lin_id,
                    rin_id,
                    out_id,
                    ..
                } => (lin_id, rin_id, out_id, false),
                Gate::And {
                    lin_id,
                    rin_id,
                    out_id,
                    ..
                } => (lin_id, rin_id, out_id, true),
            };
            let x = wires[lin_id].ok_or(CircuitEvalError::UninitializedValue(lin_id))?;
            let y = wires[rin_id].ok_or(CircuitEvalError::UninitializedValue(rin_id))?;
            wires[out_id] = Some(if is_and { x & y } else { x ^ y });
        }

        self.output_wires()
            .map(|id| wires[id].ok_or(CircuitEvalError::UninitializedValue(id)))
            .collect()
    }
}
