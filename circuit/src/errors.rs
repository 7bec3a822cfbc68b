#[derive(Debug, thiserror::Error)]
pub enum CircuitEvalError {
    #[error("uninitialized value, wire {0}")]
    UninitializedValue(usize),

    #[error("expected {expected} input bits, got {actual}")]
    InvalidInputLength { expected: usize, actual: usize },
}
