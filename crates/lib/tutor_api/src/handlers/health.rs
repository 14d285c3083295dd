//! Health endpoint.

use axum::Json;
use axum::extract::State;
use tutor_core::models::ask::HealthResponse;

use crate::AppState;

/// `GET /api/health`: reports version and whether the Gemini key is set.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        version: tutor_core::version().to_string(),
        api_key_configured: state.tutor.is_configured(),
    })
}
