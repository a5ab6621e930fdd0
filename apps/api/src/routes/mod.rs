pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::comparison::handlers as comparison;
use crate::extraction::handlers as extraction;
use crate::scoring::handlers as scoring;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis API
        .route("/api/v1/analysis/score", post(scoring::handle_score))
        .route("/api/v1/analysis/run", post(scoring::handle_run))
        .route("/api/v1/analysis/extract", post(extraction::handle_extract))
        // Comparison API
        .route("/api/v1/runs/diff", post(comparison::handle_diff))
        .route("/api/v1/experiments", post(comparison::handle_experiment))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
