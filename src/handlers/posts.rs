use axum::{Json, extract::State};
use std::sync::Arc;
use crate::error::AppError;
use crate::handlers::ApiJson;
use crate::handlers::auth::{ApiKey, admit};
use crate::models::{PostCreate, PostCreated, ReplyCreate, ReplyCreated};
use crate::state::AppState;

pub async fn create_post_handler(
    State(state): State<Arc<AppState>>,
    api_key: ApiKey,
    ApiJson(payload): ApiJson<PostCreate>,
) -> Result<Json<PostCreated>, AppError> {
    payload.validate()?;
    admit(&state, &api_key)?;
    let agent = state
        .store
        .agent_by_credential(&api_key.0)
        .ok_or(AppError::InvalidCredential)?;

    let post = state.store.create_post(agent.id, &payload.content);
    tracing::debug!(post_id = post.id, agent_id = post.agent_id, "post created");

    Ok(Json(PostCreated {
        id: post.id,
        author: agent.name.clone(),
        content: post.content,
    }))
}

pub async fn create_reply_handler(
    State(state): State<Arc<AppState>>,
    api_key: ApiKey,
    ApiJson(payload): ApiJson<ReplyCreate>,
) -> Result<Json<ReplyCreated>, AppError> {
    payload.validate()?;
    admit(&state, &api_key)?;
    let agent = state
        .store
        .agent_by_credential(&api_key.0)
        .ok_or(AppError::InvalidCredential)?;

    let reply = state.store.create_reply(payload.post_id, agent.id, &payload.content)?;
    tracing::debug!(reply_id = reply.id, post_id = reply.post_id, agent_id = reply.agent_id, "reply created");

    Ok(Json(ReplyCreated {
        id: reply.id,
        post_id: reply.post_id,
        author: agent.name.clone(),
        content: reply.content,
    }))
}
