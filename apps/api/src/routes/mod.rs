pub mod health;
pub mod upload;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
    Router,
};

use crate::matching::handlers as matching;
use crate::session::handlers as session;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        // Stateless pipeline
        .route("/api/v1/extract", post(matching::handle_extract))
        .route("/api/v1/match", post(matching::handle_match))
        // Interactive session
        .route("/api/v1/session", get(session::handle_get_session))
        .route(
            "/api/v1/session/job-description",
            put(session::handle_set_job_description),
        )
        .route(
            "/api/v1/session/resumes",
            post(session::handle_upload_resumes),
        )
        .route(
            "/api/v1/session/resumes/:index",
            delete(session::handle_remove_resume),
        )
        .route("/api/v1/session/analyze", post(session::handle_analyze))
        .route("/api/v1/session/reset", post(session::handle_reset))
        .route(
            "/api/v1/session/notifications",
            get(session::handle_list_notifications),
        )
        .route(
            "/api/v1/session/notifications/:id",
            delete(session::handle_dismiss_notification),
        )
        .layer(body_limit)
        .with_state(state)
}
