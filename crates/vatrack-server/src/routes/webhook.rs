//! Pass-through endpoint for the external CRM webhook.
//!
//! Exists so the browser never calls the CRM directly (cross-origin, and the
//! target URL stays out of the client bundle). Upstream status and body are
//! mirrored verbatim.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

use super::AppState;
use crate::error::ApiError;
use crate::relay::RelayError;

/// `POST /api/ghl-webhook`
pub async fn proxy(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> Result<Response, ApiError> {
    let (status, text) = state.relay.forward(&body).await.inspect_err(|e| {
        if let RelayError::Unreachable(source) = e {
            error!(error = %source, "GHL webhook proxy error");
        }
    })?;

    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
    Ok((status, text).into_response())
}

/// Any non-POST method on the webhook route.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
