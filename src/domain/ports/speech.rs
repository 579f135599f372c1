use crate::domain::{errors::DomainError, UploadedFile};
use async_trait::async_trait;

#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    async fn recognize_once(&self, audio: &UploadedFile) -> Result<String, DomainError>;
}
