pub mod half_gate_eval;

pub use half_gate_eval::*;

use super::errors::EvaluatorError;
use crate::GarbledCircuit;
use circuit::Circuit;
use crypto_core::Block;

pub trait GCEvaluator {
    /// Evaluate a garbled circuit on one key per input wire, returning the
    /// output keys.
    fn eval(
        &mut self,
        circ: &Circuit,
        gc: &GarbledCircuit,
        garbler_keys: &[Block],
        evaluator_keys: &[Block],
    ) -> Result<Vec<Block>, EvaluatorError>;
}
