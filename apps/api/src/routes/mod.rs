pub mod health;

use axum::{extract::DefaultBodyLimit, routing::get, routing::post, Router};

use crate::state::AppState;
use crate::{analysis, extraction, report};

pub fn build_router(state: AppState) -> Router {
    let upload_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        // Documents
        .route(
            "/api/v1/documents/extract",
            post(extraction::handlers::handle_extract).layer(upload_limit),
        )
        // Jobs
        .route(
            "/api/v1/jobs/requirements",
            post(analysis::handlers::handle_job_requirements),
        )
        .route(
            "/api/v1/jobs/analyze",
            post(analysis::handlers::handle_analyze_job),
        )
        // Analyses and reports
        .route("/api/v1/analyses", post(analysis::handlers::handle_analysis))
        .route("/api/v1/reports", post(report::handlers::handle_report))
        .with_state(state)
}
