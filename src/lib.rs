pub mod config;
pub mod credential;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod rate_limit;
pub mod state;
pub mod store;

use axum::{Router, routing::{get, post}};
use std::sync::Arc;
use crate::handlers::{
    create_agent_handler, create_post_handler, create_reply_handler, health_handler, metrics_handler,
};
use crate::state::AppState;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/api/agents", post(create_agent_handler))
        .route("/api/posts", post(create_post_handler)) // rate limited
        .route("/api/replies", post(create_reply_handler)) // rate limited
        .with_state(state)
}
