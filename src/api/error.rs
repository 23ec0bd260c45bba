//! HTTP mapping of domain errors
//!
//! Every failure leaves the API as `{"error": <message>, "code": <CODE>}`.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::domain::DomainError;

/// Error type returned by every handler and extractor.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The request could not be decoded (body, path or query).
    #[error("Bad request: {0}")]
    BadRequest(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// 500 bodies only carry the cause in development builds.
fn internal(detail: &str) -> (StatusCode, &'static str, String) {
    tracing::error!(error = %detail, "Unexpected failure");
    let message = if cfg!(debug_assertions) {
        detail.to_string()
    } else {
        "An internal error occurred".to_string()
    };
    (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", message)
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            ApiError::Domain(err) => match err {
                DomainError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                DomainError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
                DomainError::RelatedMissing(msg) => (
                    StatusCode::NOT_FOUND,
                    "RELATED_RECORD_MISSING",
                    msg.clone(),
                ),
                DomainError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                DomainError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                DomainError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                DomainError::Database(_) | DomainError::Internal(_) => internal(&err.to_string()),
            },
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn related_missing_is_a_404_with_its_own_code() {
        let err = ApiError::from(DomainError::RelatedMissing("Book 9 not found".into()));
        let (status, code, message) = err.parts();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(code, "RELATED_RECORD_MISSING");
        assert_eq!(message, "Book 9 not found");
    }

    #[test]
    fn conflict_and_validation_statuses() {
        let (status, code, _) = ApiError::from(DomainError::Conflict("dup".into())).parts();
        assert_eq!((status, code), (StatusCode::CONFLICT, "CONFLICT"));

        let (status, code, _) = ApiError::BadRequest("bad json".into()).parts();
        assert_eq!((status, code), (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"));
    }

    #[test]
    fn storage_failures_become_500() {
        let (status, code, _) =
            ApiError::from(DomainError::Database("disk I/O error".into())).parts();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(code, "INTERNAL_ERROR");
    }
}
