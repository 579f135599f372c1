pub mod agent;
pub mod azure;
pub mod config;
pub mod telemetry;

pub use agent::FoundryAgent;
pub use azure::{AzureDocumentAnalyzer, AzureSearchClient, AzureSpeechRecognizer};
pub use config::{
    AgentConfig, AppConfig, ConfigError, CorsConfig, DocumentConfig, FrontendConfig,
    SearchConfig, ServerConfig, SpeechConfig, DEFAULT_API_PORT, DEFAULT_CHAT_PORT,
};

use std::time::Duration;

use crate::domain::DomainError;

pub(crate) fn http_client(timeout: Duration) -> Result<reqwest::Client, DomainError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| DomainError::internal(format!("Failed to create HTTP client: {e}")))
}
