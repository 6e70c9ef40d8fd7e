use axum::{Json, extract::rejection::JsonRejection, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use thiserror::Error as ThisError;

/// A required submission field that failed the presence checks.
///
/// Produced before any store interaction; the field name is part of the
/// client-facing error text.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum ValidationError {
    #[error("{field} is required")]
    MissingField { field: &'static str },

    #[error("{field} must not be empty")]
    BlankField { field: &'static str },
}

#[derive(Debug, ThisError)]
pub enum LetterboxError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Request body did not parse as the expected JSON shape.
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// Path id segment did not parse as an integer.
    #[error("invalid message id: {0}")]
    InvalidId(String),

    #[error("contact message {id} not found")]
    NotFound { id: i64 },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<JsonRejection> for LetterboxError {
    fn from(rejection: JsonRejection) -> Self {
        LetterboxError::InvalidBody(rejection.body_text())
    }
}

impl IntoResponse for LetterboxError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            LetterboxError::Validation(_)
            | LetterboxError::InvalidBody(_)
            | LetterboxError::InvalidId(_) => StatusCode::BAD_REQUEST,

            LetterboxError::NotFound { .. } => StatusCode::NOT_FOUND,

            // The API contract surfaces storage failures on write/list as 400,
            // never as an unhandled crash of the request.
            LetterboxError::Database(_) | LetterboxError::Io(_) => StatusCode::BAD_REQUEST,
        };

        match &self {
            LetterboxError::Database(e) => {
                tracing::error!(error = %e, "request failed against the store");
            }
            LetterboxError::Io(e) => {
                tracing::error!(error = %e, "request failed on store IO");
            }
            other => {
                tracing::warn!(status = %status, error = %other, "request rejected");
            }
        }

        (
            status,
            Json(ApiErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// Standardized API error response body: `{"error": "<description>"}`.
#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[test]
    fn validation_is_400() {
        let err = LetterboxError::from(ValidationError::MissingField { field: "name" });
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_is_404() {
        let err = LetterboxError::NotFound { id: 999_999 };
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn blank_field_names_the_field() {
        let err = ValidationError::BlankField { field: "mobile" };
        assert_eq!(err.to_string(), "mobile must not be empty");
    }

    #[tokio::test]
    async fn body_is_a_json_error_object() {
        let response = LetterboxError::NotFound { id: 7 }.into_response();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("failed to read response body");
        let body: serde_json::Value =
            serde_json::from_slice(&bytes).expect("error body was not JSON");
        assert_eq!(body["error"], "contact message 7 not found");
    }
}
