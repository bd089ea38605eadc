//! Service error types with HTTP status code mapping.
//!
//! [`ServiceError`] is the central error type of the service. Each variant
//! maps to a specific HTTP status code and structured JSON error response.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{EntryId, ToolId};
use crate::persistence::RepositoryError;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 1001,
///     "message": "nameKurz must not be empty"
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category   | HTTP Status               |
/// |-----------|------------|---------------------------|
/// | 1000–1999 | Client     | 400 Bad Request           |
/// | 2000–2999 | Not Found  | 404 Not Found             |
/// | 3000–3999 | Server     | 500 Internal Server Error |
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// A required field is missing, empty, or too long.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The referenced tool does not exist.
    #[error("tool {0} does not exist")]
    Reference(ToolId),

    /// The id in the path disagrees with the id in the body.
    #[error("path id {path} does not match body id {body}")]
    Mismatch {
        /// Id taken from the request path.
        path: uuid::Uuid,
        /// Id taken from the request body.
        body: uuid::Uuid,
    },

    /// Tool with the given id was not found.
    #[error("tool not found: {0}")]
    ToolNotFound(ToolId),

    /// Changelog entry with the given id was not found.
    #[error("changelog entry not found: {0}")]
    EntryNotFound(EntryId),

    /// Malformed request body or path parameter.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A concurrent write conflicted and the record still exists.
    #[error("concurrent update conflict: {0}")]
    ConflictFatal(String),

    /// Persistence layer failure.
    #[error("persistence error: {0}")]
    Persistence(String),
}

impl ServiceError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1000,
            Self::Validation(_) => 1001,
            Self::Reference(_) => 1002,
            Self::Mismatch { .. } => 1003,
            Self::ToolNotFound(_) => 2001,
            Self::EntryNotFound(_) => 2002,
            Self::Persistence(_) => 3001,
            Self::ConflictFatal(_) => 3002,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_)
            | Self::Validation(_)
            | Self::Reference(_)
            | Self::Mismatch { .. } => StatusCode::BAD_REQUEST,
            Self::ToolNotFound(_) | Self::EntryNotFound(_) => StatusCode::NOT_FOUND,
            Self::ConflictFatal(_) | Self::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Conflict(msg) => Self::ConflictFatal(msg),
            RepositoryError::ForeignKey(msg) | RepositoryError::Storage(msg) => {
                Self::Persistence(msg)
            }
        }
    }
}

impl From<JsonRejection> for ServiceError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ServiceError {
    fn from(rejection: PathRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, code = self.error_code(), "request failed");
        }
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_bad_request() {
        let errors = [
            ServiceError::Validation("version must not be empty".to_string()),
            ServiceError::Reference(ToolId::new()),
            ServiceError::Mismatch {
                path: uuid::Uuid::new_v4(),
                body: uuid::Uuid::new_v4(),
            },
            ServiceError::InvalidRequest("bad json".to_string()),
        ];
        for err in errors {
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
            assert!(err.error_code() < 2000);
        }
    }

    #[test]
    fn not_found_maps_to_404() {
        assert_eq!(
            ServiceError::ToolNotFound(ToolId::new()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ServiceError::EntryNotFound(EntryId::new()).status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn conflict_is_a_server_error() {
        let err = ServiceError::from(RepositoryError::Conflict("row changed".to_string()));
        assert!(matches!(err, ServiceError::ConflictFatal(_)));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn server_errors_use_3xxx_codes() {
        let persistence = ServiceError::from(RepositoryError::Storage("io".to_string()));
        assert_eq!(persistence.error_code(), 3001);
        assert_eq!(persistence.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let conflict = ServiceError::ConflictFatal("row changed".to_string());
        assert_eq!(conflict.error_code(), 3002);
    }

    #[test]
    fn reference_message_names_the_tool() {
        let id = ToolId::new();
        let msg = ServiceError::Reference(id).to_string();
        assert!(msg.contains(&id.to_string()));
    }

    #[tokio::test]
    async fn response_body_has_code_and_message() {
        let response = ServiceError::Validation("nameKurz must not be empty".to_string())
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let Ok(bytes) = axum::body::to_bytes(response.into_body(), 4096).await else {
            panic!("body read failed");
        };
        let Ok(json) = serde_json::from_slice::<serde_json::Value>(&bytes) else {
            panic!("body is not json");
        };
        assert_eq!(json["error"]["code"], 1001);
        assert_eq!(
            json["error"]["message"],
            "validation failed: nameKurz must not be empty"
        );
    }
}
