use axum::{
    Json,
    extract::{Multipart, State},
};
use tax_core::{Document, DocumentParseResult};
use tracing::{info, warn};

use crate::errors::ApiError;
use crate::state::AppState;

const FILE_FIELD: &str = "file";

/// POST /api/upload
///
/// Expects a multipart form with a `file` part. The part must carry a file
/// name and an allowed content type; its size is capped by the config.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<DocumentParseResult>, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field
            .file_name()
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .ok_or_else(|| ApiError::Validation("No file provided".to_string()))?;
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();

        info!(%filename, %content_type, "processing upload");

        if !state.config.accepts_content_type(&content_type) {
            warn!(%filename, %content_type, "rejected upload");
            return Err(ApiError::Validation(format!(
                "Unsupported file type: {content_type}"
            )));
        }

        let bytes = field.bytes().await?;
        let max = state.config.max_upload_bytes;
        if bytes.len() > max {
            return Err(ApiError::PayloadTooLarge(format!(
                "File too large. Maximum size: {max} bytes"
            )));
        }

        let document = Document {
            filename,
            content_type,
            bytes: bytes.to_vec(),
        };
        let result = state.parser.extract_financial_data(&document).await?;

        info!(
            filename = %result.filename,
            success = result.success,
            confidence = result.confidence_score,
            "document parsed"
        );
        return Ok(Json(result));
    }

    Err(ApiError::Validation("No file provided".to_string()))
}
