use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::api::error::AgentError;
use crate::api::state::AppState;
use crate::domain::{ChatMessage, ChatReply};

pub async fn chat_handler(
    State(state): State<AppState>,
    payload: Result<Json<ChatMessage>, JsonRejection>,
) -> Result<Json<ChatReply>, AgentError> {
    let agent = state.agent.as_ref().ok_or(AgentError::NotConfigured)?;

    let Json(message) = payload.map_err(|rejection| AgentError::InvalidBody(rejection.body_text()))?;

    let data = agent.send(&message).await.map_err(AgentError::Upstream)?;

    Ok(Json(ChatReply::from_agent_response(data)))
}
