use crate::domain::{errors::DomainError, UploadedFile};
use async_trait::async_trait;

#[async_trait]
pub trait DocumentAnalyzer: Send + Sync {
    /// Returns the text of every recognised line, one per line.
    async fn extract_text(&self, document: &UploadedFile) -> Result<String, DomainError>;
}
