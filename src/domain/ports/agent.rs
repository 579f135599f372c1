use crate::domain::{errors::DomainError, ChatMessage};
use async_trait::async_trait;
use serde_json::Value;

#[async_trait]
pub trait AgentClient: Send + Sync {
    /// Sends one message and returns the agent's raw JSON response.
    async fn send(&self, message: &ChatMessage) -> Result<Value, DomainError>;
}
