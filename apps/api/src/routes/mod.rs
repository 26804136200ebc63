pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::auth::handlers as session;
use crate::listings::handlers as jobs;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Session
        .route("/api/v1/session", get(session::handle_get_session))
        .route("/api/v1/session/login", post(session::handle_login))
        .route("/api/v1/session/logout", post(session::handle_logout))
        // Board
        .route(
            "/api/v1/jobs",
            get(jobs::handle_list_jobs).post(jobs::handle_create_job),
        )
        .route("/api/v1/jobs/:id", get(jobs::handle_get_job))
        .route("/api/v1/tags", get(jobs::handle_list_tags))
        .route("/api/v1/filters", get(jobs::handle_filter_options))
        .route("/api/v1/stats", get(jobs::handle_stats))
        .with_state(state)
}
