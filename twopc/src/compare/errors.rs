use crypto_core::PaillierError;

use crate::{EvaluatorError, GeneratorError, OTReceiverError, OTSenderError};

#[derive(Debug, thiserror::Error)]
pub enum CompareError {
    #[error("invalid protocol parameters: {0}")]
    InvalidParams(String),

    #[error("input {input} does not fit in {l} bits")]
    InputTooLarge { input: u64, l: usize },

    #[error("{party} cannot run step {step} now")]
    OutOfOrder { party: &'static str, step: u8 },

    #[error("unexpected message size: {0}")]
    InvalidMessage(String),

    #[error(transparent)]
    Paillier(#[from] PaillierError),

    #[error(transparent)]
    OtSender(#[from] OTSenderError),

    #[error(transparent)]
    OtReceiver(#[from] OTReceiverError),

    #[error(transparent)]
    Generator(#[from] GeneratorError),

    #[error(transparent)]
    Evaluator(#[from] EvaluatorError),

    #[error("channel error")]
    Io(#[from] std::io::Error),
}

impl CompareError {
    /// The evaluated output key matched neither translation table entry.
    pub fn is_translation_mismatch(&self) -> bool {
        matches!(self, CompareError::Evaluator(EvaluatorError::TranslationMismatch))
    }
}
