use axum::{
    Json,
    extract::{
        multipart::MultipartError,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tax_core::CapabilityError;
use thiserror::Error;

/// Error type returned by every handler.
///
/// Rendered as `{"error": {"code", "message"}}` with a matching status.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

impl From<CapabilityError> for ApiError {
    fn from(err: CapabilityError) -> Self {
        match err {
            CapabilityError::UnsupportedContentType(t) => ApiError::UnsupportedMediaType(format!(
                "no parser available for content type {t}"
            )),
            CapabilityError::Extraction(msg) => ApiError::UnprocessableEntity(msg),
            CapabilityError::InvalidQuery(msg) => ApiError::Validation(msg),
            CapabilityError::Unavailable(msg) => ApiError::Unavailable(msg),
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        match err.status() {
            StatusCode::PAYLOAD_TOO_LARGE => ApiError::PayloadTooLarge(err.body_text()),
            _ => ApiError::Validation(err.body_text()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection.status() {
            StatusCode::PAYLOAD_TOO_LARGE => ApiError::PayloadTooLarge(rejection.body_text()),
            StatusCode::UNSUPPORTED_MEDIA_TYPE => {
                ApiError::UnsupportedMediaType(rejection.body_text())
            }
            _ => ApiError::Validation(rejection.body_text()),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            ApiError::PayloadTooLarge(msg) => {
                (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE", msg.clone())
            }
            ApiError::UnsupportedMediaType(msg) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "UNSUPPORTED_MEDIA_TYPE",
                msg.clone(),
            ),
            ApiError::UnprocessableEntity(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNPROCESSABLE_ENTITY",
                msg.clone(),
            ),
            ApiError::Unavailable(msg) => {
                tracing::warn!("capability unavailable: {msg}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "SERVICE_UNAVAILABLE",
                    msg.clone(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn capability_errors_map_to_statuses() {
        let cases = [
            (
                CapabilityError::UnsupportedContentType("image/png".to_string()),
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ),
            (
                CapabilityError::Extraction("bad bytes".to_string()),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                CapabilityError::InvalidQuery("empty".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                CapabilityError::Unavailable("offline".to_string()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::from(err).into_response().status(), status);
        }
    }

    #[test]
    fn not_found_renders_404() {
        let response = ApiError::NotFound("No route for /nope".to_string()).into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
