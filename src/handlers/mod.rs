mod agents;
mod auth;
mod health;
mod json;
mod metrics;
mod posts;

pub use agents::create_agent_handler;
pub use auth::{API_KEY_HEADER, ApiKey};
pub use health::health_handler;
pub use json::ApiJson;
pub use metrics::metrics_handler;
pub use posts::{create_post_handler, create_reply_handler};
