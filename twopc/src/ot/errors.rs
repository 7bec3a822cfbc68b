use crypto_core::CurveError;

#[derive(Debug, thiserror::Error)]
pub enum OTSenderError {
    #[error("Sender Invalid Input Length")]
    InvalidInputLength,

    #[error("Sender IO Error")]
    IoError(std::io::Error),

    #[error("Sender received an invalid point")]
    InvalidPoint(CurveError),
}

#[derive(Debug, thiserror::Error)]
pub enum OTReceiverError {
    #[error("Receiver Invalid Input Length")]
    InvalidInputLength,

    #[error("Receiver IO Error")]
    IoError(std::io::Error),

    #[error("Receiver received an invalid point")]
    InvalidPoint(CurveError),
}

impl From<std::io::Error> for OTSenderError {
    fn from(e: std::io::Error) -> OTSenderError {
        OTSenderError::IoError(e)
    }
}

impl From<std::io::Error> for OTReceiverError {
    fn from(e: std::io::Error) -> OTReceiverError {
        OTReceiverError::IoError(e)
    }
}

impl From<CurveError> for OTSenderError {
    fn from(e: CurveError) -> OTSenderError {
        OTSenderError::InvalidPoint(e)
    }
}

impl From<CurveError> for OTReceiverError {
    fn from(e: CurveError) -> OTReceiverError {
        OTReceiverError::InvalidPoint(e)
    }
}
