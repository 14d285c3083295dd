//! # tutor_api
//!
//! HTTP API library for the AI tutor relay.

pub mod config;
pub mod handlers;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tutor_core::relay::{GeminiRelay, Tutor};
use tutor_core::{ASK_PATH, HEALTH_PATH};

use crate::config::ApiConfig;
use crate::handlers::{ask, health};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Answers learner questions.
    pub tutor: Arc<dyn Tutor>,
}

impl AppState {
    /// State backed by the Gemini relay described in `config`.
    pub fn from_config(config: &ApiConfig) -> Self {
        let tutor = Arc::new(GeminiRelay::new(config.relay.clone()));
        Self { tutor }
    }
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(HEALTH_PATH, get(health::health))
        .route(ASK_PATH, post(ask::ask_handler))
        .layer(cors)
        .with_state(state)
}
