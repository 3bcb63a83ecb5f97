use crate::{
    application::extract_fields::dto::ExtractionRequest,
    domain::extraction::{ExtractionFields, LicensePlateExtraction, VisitorIdExtraction},
    presentation::http::{errors::AppError, state::AppState},
};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

async fn run<F: ExtractionFields>(
    state: &AppState,
    body: Result<Json<ExtractionRequest>, JsonRejection>,
) -> Result<Json<F>, AppError> {
    let Json(request) = body?;
    let fields = state
        .extractor
        .execute::<F>(&request.photo)
        .await
        .map_err(AppError::from_extraction::<F>)?;
    Ok(Json(fields))
}

pub async fn extract_license_plate(
    State(state): State<AppState>,
    body: Result<Json<ExtractionRequest>, JsonRejection>,
) -> Result<Json<LicensePlateExtraction>, AppError> {
    run(&state, body).await
}

pub async fn extract_visitor_info(
    State(state): State<AppState>,
    body: Result<Json<ExtractionRequest>, JsonRejection>,
) -> Result<Json<VisitorIdExtraction>, AppError> {
    run(&state, body).await
}
