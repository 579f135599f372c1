use axum::{body::Bytes, extract::State, Json};
use serde::Serialize;

use crate::api::error::{ApiError, SEARCH_NOT_CONFIGURED};
use crate::api::state::AppState;
use crate::domain::{SearchHit, SearchRequest};

/// Number of documents returned per query.
pub const SEARCH_TOP: usize = 5;

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: Vec<SearchHit>,
}

pub async fn search_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SearchResponse>, ApiError> {
    let search = state
        .search
        .as_ref()
        .ok_or(ApiError::NotConfigured(SEARCH_NOT_CONFIGURED))?;

    let query = SearchRequest::from_body(&body)
        .query
        .ok_or_else(|| ApiError::bad_request("No query provided."))?;

    let results = search.search(&query, SEARCH_TOP).await?;
    tracing::debug!(query = %query, hits = results.len(), "search served");

    Ok(Json(SearchResponse { results }))
}
