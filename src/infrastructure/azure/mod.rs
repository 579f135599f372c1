//! Azure AI service clients speaking the public REST APIs.

mod document_intelligence;
mod search;
mod speech;

pub use document_intelligence::AzureDocumentAnalyzer;
pub use search::AzureSearchClient;
pub use speech::AzureSpeechRecognizer;

use reqwest::Response;
use serde::Deserialize;

use crate::domain::DomainError;

pub(crate) const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ServiceError,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ServiceError {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ServiceError {
    pub(crate) fn describe(&self) -> String {
        match (&self.code, &self.message) {
            (Some(code), Some(message)) => format!("({code}) {message}"),
            (None, Some(message)) => message.clone(),
            (Some(code), None) => code.clone(),
            (None, None) => "unknown service error".to_string(),
        }
    }
}

/// Passes successful responses through; turns anything else into an
/// `ExternalService` error carrying the service's own error message.
pub(crate) async fn ensure_success(response: Response) -> Result<Response, DomainError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let detail = serde_json::from_str::<ErrorEnvelope>(&body)
        .map(|envelope| envelope.error.describe())
        .unwrap_or(body);

    Err(DomainError::external(format!(
        "{} {}: {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("error"),
        detail
    )))
}
