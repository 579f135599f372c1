use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::domain::DomainError;

pub const SEARCH_NOT_CONFIGURED: &str = "Search service is not configured.";
pub const DOCUMENTS_NOT_CONFIGURED: &str = "Document intelligence service is not configured.";
pub const SPEECH_NOT_CONFIGURED: &str = "Speech service is not configured.";

/// Errors of the EduVoice routes, rendered as `{"error": "..."}`.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    NotConfigured(&'static str),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotConfigured(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Domain(DomainError::Validation(_) | DomainError::NoSpeechRecognized) => {
                StatusCode::BAD_REQUEST
            }
            Self::Domain(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, status = status.as_u16(), "request failed");
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub const AGENT_NOT_CONFIGURED: &str = "Foundry agent configuration is missing.";
pub const AGENT_UNREACHABLE: &str = "Error communicating with AI agent";

/// Errors of the chat route, rendered as `{"detail": "..."}`.
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Foundry agent configuration is missing.")]
    NotConfigured,

    #[error("{0}")]
    InvalidBody(String),

    #[error("Error communicating with AI agent")]
    Upstream(#[source] DomainError),
}

impl AgentError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotConfigured => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for AgentError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let Self::Upstream(source) = &self {
            tracing::error!(error = %source, "agent call failed");
        }

        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_map_to_statuses() {
        let cases = [
            (DomainError::validation("bad"), StatusCode::BAD_REQUEST),
            (DomainError::NoSpeechRecognized, StatusCode::BAD_REQUEST),
            (
                DomainError::RecognitionFailed {
                    status: "Error".into(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (DomainError::external("boom"), StatusCode::INTERNAL_SERVER_ERROR),
            (DomainError::timeout("slow"), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status(), expected);
        }
    }

    #[test]
    fn test_external_message_is_passed_through() {
        let err = ApiError::from(DomainError::external("403 Forbidden: (Forbidden) bad key"));
        assert_eq!(err.to_string(), "403 Forbidden: (Forbidden) bad key");
    }

    #[test]
    fn test_agent_messages_are_fixed() {
        assert_eq!(AgentError::NotConfigured.to_string(), AGENT_NOT_CONFIGURED);
    }

    #[test]
    fn test_agent_upstream_hides_cause() {
        let err = AgentError::Upstream(DomainError::external("connection refused"));
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.to_string(), AGENT_UNREACHABLE);
    }
}
