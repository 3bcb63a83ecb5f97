use crate::presentation::http::state::AppState;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

#[derive(Serialize)]
struct HealthResponse<'a> {
    status: &'static str,
    version: &'static str,
    inference_model: &'a str,
}

// Liveness only; the inference provider is not probed.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let response = HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        inference_model: state.inference.model(),
    };

    (StatusCode::OK, Json(response)).into_response()
}
