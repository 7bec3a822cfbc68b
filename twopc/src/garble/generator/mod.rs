pub mod half_gate_gen;

pub use half_gate_gen::*;

use super::errors::GeneratorError;
use crate::{GarbledCircuit, WireKeyPair};
use circuit::Circuit;

pub trait GCGenerator {
    /// Garble `circ` given the key pairs of both parties' input wires.
    fn garble(
        &mut self,
        circ: &Circuit,
        garbler_inputs: &[WireKeyPair],
        evaluator_inputs: &[WireKeyPair],
    ) -> Result<GarbledCircuit, GeneratorError>;
}
