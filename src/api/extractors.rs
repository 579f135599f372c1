use axum::extract::{multipart::MultipartRejection, Multipart};
use axum::http::StatusCode;
use tracing::debug;

use crate::api::error::ApiError;
use crate::domain::UploadedFile;

pub const FILE_FIELD: &str = "file";

/// Pulls the `file` part out of a multipart body.
///
/// Only a part carrying a filename counts as an upload. A body that is not
/// multipart, is malformed, or has no such `file` part yields `Ok(None)`; callers answer that with their own 400 message. Only an
/// upload over the body limit is an error.
pub async fn file_field(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Option<UploadedFile>, ApiError> {
    let mut multipart = match multipart {
        Ok(multipart) => multipart,
        Err(rejection) => {
            debug!(%rejection, "request is not multipart");
            return Ok(None);
        }
    };

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return Ok(None),
            Err(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                return Err(ApiError::PayloadTooLarge(e.body_text()));
            }
            Err(e) => {
                debug!(error = %e, "malformed multipart body");
                return Ok(None);
            }
        };

        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let Some(file_name) = field.file_name().map(str::to_owned) else {
            debug!("`file` part has no filename, ignoring");
            continue;
        };

        let content_type = field.content_type().map(str::to_owned);
        return match field.bytes().await {
            Ok(bytes) => Ok(Some(UploadedFile {
                file_name: Some(file_name),
                content_type,
                bytes: bytes.to_vec(),
            })),
            Err(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                Err(ApiError::PayloadTooLarge(e.body_text()))
            }
            Err(e) => {
                debug!(error = %e, "failed to read uploaded file");
                Ok(None)
            }
        };
    }
}
