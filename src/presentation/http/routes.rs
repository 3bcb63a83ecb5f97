use super::{
    errors::AppError,
    handlers::{extraction, health},
    middleware::request_id::request_id_middleware,
    state::AppState,
};
use axum::{
    Router,
    extract::{DefaultBodyLimit, OriginalUri},
    middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config.max_body_bytes;

    let extraction_routes = Router::new()
        .route(
            "/api/v1/extractions/license-plate",
            post(extraction::extract_license_plate),
        )
        .route(
            "/api/v1/extractions/visitor-id",
            post(extraction::extract_visitor_info),
        )
        .layer(DefaultBodyLimit::max(body_limit));

    Router::new()
        // Health
        .route("/health", get(health::health_check))
        // Extraction flows
        .merge(extraction_routes)
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}

async fn not_found(OriginalUri(uri): OriginalUri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}
