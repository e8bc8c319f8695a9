//! API error type and its HTTP mapping.
//!
//! Every handler failure flows through `ApiError` and comes out as an
//! `{"error": ...}` JSON body with the matching status code; nothing here is
//! fatal to the process.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use vatrack_core::db::DatabaseError;

use crate::relay::RelayError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("Not authorized")]
    Unauthorized,

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("{0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error(transparent)]
    Relay(#[from] RelayError),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Database(DatabaseError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Internal(_) | Self::Database(_) | Self::Relay(RelayError::NotConfigured) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Relay(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(
            ApiError::Validation("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::MethodNotAllowed.status_code(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            ApiError::Database(DatabaseError::NotFound("Client c1".into())).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Relay(RelayError::NotConfigured).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::Relay(RelayError::Rejected { status: 500 }).status_code(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn relay_errors_keep_their_exact_messages() {
        let err = ApiError::Relay(RelayError::NotConfigured);
        assert_eq!(err.to_string(), "GHL_WEBHOOK_URL not configured");
    }
}
