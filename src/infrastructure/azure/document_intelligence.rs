use async_trait::async_trait;
use reqwest::{header, Client, Response};
use secrecy::ExposeSecret;
use serde::Deserialize;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, instrument, warn};

use super::{ensure_success, ServiceError, SUBSCRIPTION_KEY_HEADER};
use crate::domain::{ports::DocumentAnalyzer, DomainError, UploadedFile};
use crate::infrastructure::{config::DocumentConfig, http_client};

const OPERATION_LOCATION: &str = "operation-location";

/// Runs the prebuilt layout model as a long-running operation: submit, then
/// poll the returned `Operation-Location` until it settles.
pub struct AzureDocumentAnalyzer {
    client: Client,
    config: DocumentConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeOperation {
    status: String,
    #[serde(default)]
    analyze_result: Option<AnalyzeResult>,
    #[serde(default)]
    error: Option<ServiceError>,
}

#[derive(Debug, Default, Deserialize)]
struct AnalyzeResult {
    #[serde(default)]
    pages: Vec<Page>,
}

#[derive(Debug, Default, Deserialize)]
struct Page {
    #[serde(default)]
    lines: Vec<Line>,
}

#[derive(Debug, Deserialize)]
struct Line {
    content: String,
}

impl AnalyzeResult {
    fn text(&self) -> String {
        self.pages
            .iter()
            .flat_map(|page| page.lines.iter())
            .map(|line| line.content.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl AzureDocumentAnalyzer {
    pub fn new(config: DocumentConfig) -> Result<Self, DomainError> {
        Ok(Self {
            client: http_client(config.timeout)?,
            config,
        })
    }

    fn analyze_url(&self) -> String {
        format!(
            "{}/formrecognizer/documentModels/{}:analyze?api-version={}",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model_id,
            self.config.api_version
        )
    }

    async fn begin_analyze(&self, document: &UploadedFile) -> Result<String, DomainError> {
        let content_type = document
            .content_type
            .as_deref()
            .unwrap_or("application/octet-stream");

        let response = self
            .client
            .post(self.analyze_url())
            .header(SUBSCRIPTION_KEY_HEADER, self.config.api_key.expose_secret())
            .header(header::CONTENT_TYPE, content_type)
            .body(document.bytes.clone())
            .send()
            .await?;

        let response = ensure_success(response).await?;
        response
            .headers()
            .get(OPERATION_LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned)
            .ok_or_else(|| {
                DomainError::external("Analyze request accepted without an Operation-Location")
            })
    }

    async fn poll_until_done(&self, operation_url: &str) -> Result<AnalyzeResult, DomainError> {
        let deadline = Instant::now() + self.config.poll_timeout;

        loop {
            let response = self
                .client
                .get(operation_url)
                .header(SUBSCRIPTION_KEY_HEADER, self.config.api_key.expose_secret())
                .send()
                .await?;
            let response = ensure_success(response).await?;
            let wait = retry_after(&response)
                .unwrap_or(self.config.poll_interval)
                .max(self.config.poll_interval);
            let operation: AnalyzeOperation = response.json().await?;

            match operation.status.as_str() {
                "succeeded" => {
                    return Ok(operation.analyze_result.unwrap_or_default());
                }
                "notStarted" | "running" => {
                    if Instant::now() + wait > deadline {
                        return Err(DomainError::timeout(format!(
                            "document analysis still {} after {}s",
                            operation.status,
                            self.config.poll_timeout.as_secs()
                        )));
                    }
                    debug!(status = %operation.status, wait_ms = wait.as_millis() as u64, "analysis pending");
                    tokio::time::sleep(wait).await;
                }
                status => {
                    let reason = operation
                        .error
                        .map(|e| e.describe())
                        .unwrap_or_else(|| format!("analysis {status}"));
                    warn!(%status, %reason, "document analysis ended without a result");
                    return Err(DomainError::external(reason));
                }
            }
        }
    }
}

fn retry_after(response: &Response) -> Option<Duration> {
    response
        .headers()
        .get(header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

#[async_trait]
impl DocumentAnalyzer for AzureDocumentAnalyzer {
    #[instrument(skip(self, document), fields(bytes = document.len(), model = %self.config.model_id))]
    async fn extract_text(&self, document: &UploadedFile) -> Result<String, DomainError> {
        let operation_url = self.begin_analyze(document).await?;
        let result = self.poll_until_done(&operation_url).await?;
        Ok(result.text())
    }
}
