use thiserror::Error;

/// Failure of a single extraction attempt.
///
/// `MissingInput` and `InvalidInput` are raised before any inference call is
/// made. `Inference` covers everything that happens at or after dispatch.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ExtractionError {
    #[error("Image data is missing")]
    MissingInput,
    #[error("Invalid image payload: {0}")]
    InvalidInput(String),
    #[error("Inference failed: {0}")]
    Inference(String),
}

impl ExtractionError {
    /// True when the attempt never reached the inference provider.
    pub fn is_caller_side(&self) -> bool {
        matches!(self, Self::MissingInput | Self::InvalidInput(_))
    }
}
