use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Relevance field the search service attaches to every document.
pub const SEARCH_SCORE_FIELD: &str = "@search.score";

/// Body of `POST /search`, parsed leniently.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: Option<String>,
}

impl SearchRequest {
    /// Invalid JSON, a non-object body, or a non-string `query` all yield
    /// an empty request rather than an error.
    pub fn from_body(body: &[u8]) -> Self {
        let value: Value = serde_json::from_slice(body).unwrap_or(Value::Null);
        let query = value
            .get("query")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_owned);

        Self { query }
    }
}

/// A matched document with `@search.score` moved to `score`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchHit(pub Map<String, Value>);

impl SearchHit {
    pub fn from_document(mut document: Map<String, Value>) -> Self {
        let score = document.remove(SEARCH_SCORE_FIELD).unwrap_or(Value::Null);
        document.insert("score".to_string(), score);
        Self(document)
    }

    pub fn score(&self) -> Option<f64> {
        self.0.get("score").and_then(Value::as_f64)
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }
}
