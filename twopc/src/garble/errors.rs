#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    #[error("uninitialized label, wire {0}")]
    UninitializedLabel(usize),

    #[error("expected {expected} input key pairs, got {actual}")]
    InvalidInputLength { expected: usize, actual: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum EvaluatorError {
    #[error("uninitialized label, wire {0}")]
    UninitializedLabel(usize),

    #[error("expected {expected} input keys, got {actual}")]
    InvalidInputLength { expected: usize, actual: usize },

    #[error("expected {expected} AND gate ciphertexts, got {actual}")]
    InvalidTableLength { expected: usize, actual: usize },

    /// The output key matches neither translation table entry.
    #[error("output key does not match the translation table")]
    TranslationMismatch,
}
