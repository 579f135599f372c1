use crate::domain::{errors::DomainError, SearchHit};
use async_trait::async_trait;

#[async_trait]
pub trait SearchIndex: Send + Sync {
    async fn search(&self, query: &str, top: usize) -> Result<Vec<SearchHit>, DomainError>;
}
