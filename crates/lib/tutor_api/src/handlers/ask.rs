// @zen-component: TUTOR-AskHandler
//
//! Ask handler: relays a learner question to the tutor.

use axum::Json;
use axum::extract::State;
use tracing::info;
use tutor_core::models::ask::{AskRequest, AskResponse};

use crate::AppState;

/// `POST /api/Tutor/ask`: answer a question.
///
/// Always `200`. Relay problems are reported inside `answer`, and a missing
/// question is relayed as an empty one.
pub async fn ask_handler(
    State(state): State<AppState>,
    Json(body): Json<AskRequest>,
) -> Json<AskResponse> {
    info!(question_len = body.question.len(), "tutor question received");
    let answer = state.tutor.ask(&body.question).await;

    Json(AskResponse { answer })
}
