pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::review::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/review",
            post(handlers::handle_review).delete(handlers::handle_close),
        )
        .route("/api/v1/review/preview", get(handlers::handle_preview))
        .route("/api/v1/review/refine", post(handlers::handle_refine))
        .with_state(state)
}
