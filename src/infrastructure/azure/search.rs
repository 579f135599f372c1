use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use super::ensure_success;
use crate::domain::{ports::SearchIndex, DomainError, SearchHit};
use crate::infrastructure::{config::SearchConfig, http_client};

pub struct AzureSearchClient {
    client: Client,
    config: SearchConfig,
}

#[derive(Debug, Serialize)]
struct SearchBody<'a> {
    search: &'a str,
    top: usize,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    value: Vec<Map<String, Value>>,
}

impl AzureSearchClient {
    pub fn new(config: SearchConfig) -> Result<Self, DomainError> {
        Ok(Self {
            client: http_client(config.timeout)?,
            config,
        })
    }

    fn search_url(&self) -> String {
        format!(
            "{}/indexes/{}/docs/search?api-version={}",
            self.config.endpoint.trim_end_matches('/'),
            self.config.index_name,
            self.config.api_version
        )
    }
}

#[async_trait]
impl SearchIndex for AzureSearchClient {
    #[instrument(skip(self), fields(index = %self.config.index_name))]
    async fn search(&self, query: &str, top: usize) -> Result<Vec<SearchHit>, DomainError> {
        let response = self
            .client
            .post(self.search_url())
            .header("api-key", self.config.api_key.expose_secret())
            .json(&SearchBody { search: query, top })
            .send()
            .await?;

        let body: SearchResponse = ensure_success(response).await?.json().await?;
        debug!(hits = body.value.len(), "search completed");

        Ok(body.value.into_iter().map(SearchHit::from_document).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::Secret;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> AzureSearchClient {
        AzureSearchClient::new(SearchConfig {
            endpoint: format!("{}/", server.uri()),
            api_key: Secret::new("search-key".to_string()),
            index_name: "lessons".to_string(),
            api_version: "2023-11-01".to_string(),
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_search_maps_documents_to_hits() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/indexes/lessons/docs/search"))
            .and(query_param("api-version", "2023-11-01"))
            .and(header("api-key", "search-key"))
            .and(body_json(json!({ "search": "volcanoes", "top": 5 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "value": [
                    { "@search.score": 3.1, "id": "a", "title": "Volcanoes" },
                    { "@search.score": 1.2, "id": "b", "title": "Plate tectonics" }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let hits = client_for(&server).search("volcanoes", 5).await.unwrap();

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].field("id"), Some(&json!("a")));
        assert_eq!(hits[0].score(), Some(3.1));
        assert_eq!(hits[1].field("title"), Some(&json!("Plate tectonics")));
    }

    #[tokio::test]
    async fn test_search_surfaces_service_error_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "error": { "code": "Forbidden", "message": "Invalid api-key" }
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).search("anything", 5).await.unwrap_err();

        assert!(matches!(err, DomainError::ExternalService(_)));
        assert!(err.to_string().contains("(Forbidden) Invalid api-key"));
    }
}
