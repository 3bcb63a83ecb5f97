//! HTTP error handling and response conversion.
//!
//! Every error body has the shape `{"error": message}`, which is also the
//! failure arm of the extraction tagged union. Messages are user-safe; the
//! detail each variant carries is only logged.

use crate::domain::extraction::{ExtractionError, ExtractionFields, MISSING_IMAGE_MESSAGE};
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

/// Application-level errors returned from handlers.
#[derive(Debug)]
pub enum AppError {
    /// Request body was rejected before reaching the handler: unreadable
    /// JSON (400), wrong content type (415), oversized (413).
    InvalidBody { status: StatusCode, detail: String },

    /// Unknown route (404).
    NotFound(String),

    /// No photo was supplied (400).
    MissingImage,

    /// Photo was supplied but is not an image data URI (422).
    UnprocessableImage {
        message: &'static str,
        detail: String,
    },

    /// Inference call failed or returned non-conforming output (502).
    ExtractionFailed {
        message: &'static str,
        detail: String,
    },
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBody { detail, .. } => write!(f, "Invalid request body: {}", detail),
            Self::NotFound(msg) => write!(f, "Not found: {}", msg),
            Self::MissingImage => write!(f, "Missing image data"),
            Self::UnprocessableImage { detail, .. } => write!(f, "Invalid image payload: {}", detail),
            Self::ExtractionFailed { detail, .. } => write!(f, "Extraction failed: {}", detail),
        }
    }
}

impl AppError {
    /// Maps a failed extraction for flow `F` onto its HTTP error, keeping the
    /// flow's generic message for anything other than a missing photo.
    pub fn from_extraction<F: ExtractionFields>(err: ExtractionError) -> Self {
        match err {
            ExtractionError::MissingInput => Self::MissingImage,
            ExtractionError::InvalidInput(detail) => Self::UnprocessableImage {
                message: F::FAILURE_MESSAGE,
                detail,
            },
            ExtractionError::Inference(detail) => Self::ExtractionFailed {
                message: F::FAILURE_MESSAGE,
                detail,
            },
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidBody { status, .. } => *status,
            Self::MissingImage => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::UnprocessableImage { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::ExtractionFailed { .. } => StatusCode::BAD_GATEWAY,
        }
    }

    /// Get a user-safe error message (without implementation details).
    fn user_message(&self) -> String {
        match self {
            Self::InvalidBody { status, .. } if *status == StatusCode::PAYLOAD_TOO_LARGE => {
                "Image is too large.".into()
            }
            Self::InvalidBody { .. } => "Invalid request body".into(),
            Self::NotFound(_) => "Resource not found".into(),
            Self::MissingImage => MISSING_IMAGE_MESSAGE.into(),
            Self::UnprocessableImage { message, .. } | Self::ExtractionFailed { message, .. } => {
                (*message).into()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.user_message();

        match status {
            StatusCode::BAD_GATEWAY => {
                tracing::error!("error={}", self);
            }
            StatusCode::BAD_REQUEST
            | StatusCode::PAYLOAD_TOO_LARGE
            | StatusCode::UNPROCESSABLE_ENTITY => {
                tracing::warn!("error={}", self);
            }
            _ => {
                tracing::info!("error={}", self);
            }
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidBody {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}
