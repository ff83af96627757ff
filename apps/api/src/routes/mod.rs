pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::application::handlers as application;
use crate::catalog::handlers as catalog;
use crate::contact::handlers as contact;
use crate::state::AppState;

/// Headroom above the attachment limit for the text fields and multipart framing.
const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;

/// Body limit for the application route, never overflowing for huge attachment limits.
fn upload_limit(max_attachment_bytes: usize) -> usize {
    max_attachment_bytes.saturating_add(MULTIPART_OVERHEAD_BYTES)
}

pub fn build_router(state: AppState) -> Router {
    let upload_limit = upload_limit(state.config.max_attachment_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        // Job catalog
        .route("/api/v1/jobs", get(catalog::handle_list_jobs))
        .route("/api/v1/jobs/facets", get(catalog::handle_job_facets))
        .route("/api/v1/jobs/:index", get(catalog::handle_get_job))
        // Applications
        .route(
            "/api/v1/jobs/:index/questions",
            get(application::handle_get_questions),
        )
        .route(
            "/api/v1/jobs/:index/applications",
            post(application::handle_submit_application)
                .layer(DefaultBodyLimit::max(upload_limit)),
        )
        // Contact form
        .route("/api/v1/contact", post(contact::handle_contact))
        .with_state(state)
}
