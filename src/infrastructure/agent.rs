use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde_json::Value;
use tracing::instrument;

use crate::domain::{ports::AgentClient, ChatMessage, DomainError};
use crate::infrastructure::{config::AgentConfig, http_client};

/// Client for an agent deployed behind an AI Foundry HTTP endpoint.
pub struct FoundryAgent {
    client: Client,
    config: AgentConfig,
}

impl FoundryAgent {
    pub fn new(config: AgentConfig) -> Result<Self, DomainError> {
        Ok(Self {
            client: http_client(config.timeout)?,
            config,
        })
    }
}

#[async_trait]
impl AgentClient for FoundryAgent {
    #[instrument(skip(self, message), fields(conversation_id = ?message.conversation_id))]
    async fn send(&self, message: &ChatMessage) -> Result<Value, DomainError> {
        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(self.config.api_key.expose_secret())
            .json(message)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }
}
