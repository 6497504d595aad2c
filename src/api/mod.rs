mod error;
mod summaries;
mod validation;

use std::sync::Arc;

use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::ai::SummaryGenerator;
use crate::db::Repository;

pub use error::{ApiError, FieldError};

#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<Repository>,
    /// `None` disables background summary generation (used by tests).
    pub generator: Option<Arc<SummaryGenerator>>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Build the application router. Routes are registered with and without the
/// trailing slash since axum does not redirect between the two.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/summaries",
            get(summaries::read_all_summaries).post(summaries::create_summary),
        )
        .route(
            "/summaries/",
            get(summaries::read_all_summaries).post(summaries::create_summary),
        )
        .route(
            "/summaries/{id}",
            get(summaries::read_summary)
                .put(summaries::update_summary)
                .delete(summaries::delete_summary),
        )
        .route(
            "/summaries/{id}/",
            get(summaries::read_summary)
                .put(summaries::update_summary)
                .delete(summaries::delete_summary),
        )
        .route("/health", get(health))
        .with_state(state)
}
