use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use serde::Serialize;

use crate::api::error::{ApiError, DOCUMENTS_NOT_CONFIGURED};
use crate::api::extractors::file_field;
use crate::api::state::AppState;

#[derive(Debug, Serialize)]
pub struct TextResponse {
    pub text: String,
}

pub async fn analyze_document(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<TextResponse>, ApiError> {
    let analyzer = state
        .documents
        .as_ref()
        .ok_or(ApiError::NotConfigured(DOCUMENTS_NOT_CONFIGURED))?;

    let document = file_field(multipart)
        .await?
        .ok_or_else(|| ApiError::bad_request("No file uploaded."))?;

    tracing::info!(
        file_name = document.file_name.as_deref().unwrap_or("-"),
        bytes = document.len(),
        "analyzing document"
    );
    let text = analyzer.extract_text(&document).await?;

    Ok(Json(TextResponse { text }))
}
