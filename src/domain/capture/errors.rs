use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CaptureError {
    #[error("Captured photo is empty")]
    EmptyPhoto,
    #[error("No photo has been captured yet")]
    NoPhoto,
    #[error("An extraction is already in progress")]
    ExtractionInFlight,
    #[error("Form has already been submitted")]
    AlreadySubmitted,
    #[error("Form validation failed: {0}")]
    InvalidForm(validator::ValidationErrors),
}
