use crate::domain::extraction::{entity::ExtractionFields, errors::ExtractionError};
use serde::{Deserialize, Serialize};

/// Message returned for every flow when no photo was supplied.
pub const MISSING_IMAGE_MESSAGE: &str = "Image data is missing.";

/// What a gate form receives from an extraction call: either the extracted
/// fields or a single user-facing error text, never both.
///
/// Serializes untagged, so the wire shape is the bare field object or
/// `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtractionOutcome<F> {
    Failed { error: String },
    Extracted(F),
}

impl<F: ExtractionFields> ExtractionOutcome<F> {
    /// Collapses a typed extraction result into the caller-facing shape.
    ///
    /// Detail of the underlying error is dropped here; log it before calling.
    pub fn from_result(result: Result<F, ExtractionError>) -> Self {
        match result {
            Ok(fields) => Self::Extracted(fields),
            Err(ExtractionError::MissingInput) => Self::failed(MISSING_IMAGE_MESSAGE),
            Err(_) => Self::failed(F::FAILURE_MESSAGE),
        }
    }
}

impl<F> ExtractionOutcome<F> {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            error: message.into(),
        }
    }

    pub fn is_extracted(&self) -> bool {
        matches!(self, Self::Extracted(_))
    }

    pub fn into_result(self) -> Result<F, String> {
        match self {
            Self::Extracted(fields) => Ok(fields),
            Self::Failed { error } => Err(error),
        }
    }
}
