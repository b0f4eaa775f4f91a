pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::assistant::handlers;
use crate::state::AppState;
use crate::stats::handlers as stats_handlers;

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/ai/chat", post(handlers::handle_chat))
        .route("/ai/feedback", post(handlers::handle_feedback))
        .route("/ai/queries/:id", get(handlers::handle_get_query))
        .route(
            "/stats/:session_id",
            get(stats_handlers::handle_get_stats).post(stats_handlers::handle_update_stats),
        );

    Router::new()
        .route("/health", get(health::health_handler))
        .nest("/api", api)
        .with_state(state)
}
