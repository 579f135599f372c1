use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};

use super::documents::TextResponse;
use crate::api::error::{ApiError, SPEECH_NOT_CONFIGURED};
use crate::api::extractors::file_field;
use crate::api::state::AppState;

/// Audio is held in memory and streamed to the recognizer; nothing touches
/// the filesystem, so concurrent uploads never share a path.
pub async fn speech_to_text(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<TextResponse>, ApiError> {
    let recognizer = state
        .speech
        .as_ref()
        .ok_or(ApiError::NotConfigured(SPEECH_NOT_CONFIGURED))?;

    let audio = file_field(multipart)
        .await?
        .ok_or_else(|| ApiError::bad_request("No audio file uploaded."))?;

    tracing::info!(bytes = audio.len(), ogg = audio.is_ogg(), "transcribing audio");
    let text = recognizer.recognize_once(&audio).await?;

    Ok(Json(TextResponse { text }))
}
