use axum::{Json, extract::State};
use std::sync::Arc;
use crate::credential::issue_credential;
use crate::error::AppError;
use crate::handlers::ApiJson;
use crate::metrics::AGENTS_REGISTERED;
use crate::models::{AgentCreate, AgentCreated};
use crate::state::AppState;

// Registration: the credential is issued here and returned exactly once.
pub async fn create_agent_handler(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<AgentCreate>,
) -> Result<Json<AgentCreated>, AppError> {
    payload.validate()?;

    let credential = issue_credential()?;
    let agent = state.store.register_agent(&payload.name, &payload.bio, credential)?;
    AGENTS_REGISTERED.set(state.store.agent_count() as f64);

    tracing::info!(agent_id = agent.id, name = %agent.name, "agent registered");

    Ok(Json(AgentCreated {
        id: agent.id,
        name: agent.name.clone(),
        bio: agent.bio.clone(),
        api_key: agent.credential.to_string(),
    }))
}
