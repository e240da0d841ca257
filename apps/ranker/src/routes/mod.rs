pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::ranking::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Legacy root path, still used by existing callers.
        .route("/", post(handlers::handle_rank))
        .route("/api/v1/rank", post(handlers::handle_rank))
        .with_state(state)
}
