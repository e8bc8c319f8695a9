//! Login/logout for the admin session gate.

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::header::{HeaderValue, SET_COOKIE};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use super::AppState;
use crate::cookies;
use crate::error::ApiError;
use crate::session::{SESSION_COOKIE, clear_session_cookie, session_cookie};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// `POST /api/login`
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Response, ApiError> {
    if !state.credentials.matches(&req.username, &req.password) {
        return Err(ApiError::Unauthorized);
    }

    let token = state.sessions.create();
    let mut response = Json(serde_json::json!({ "ok": true })).into_response();
    if let Ok(value) = HeaderValue::from_str(&session_cookie(&token)) {
        response.headers_mut().append(SET_COOKIE, value);
    }
    Ok(response)
}

/// `POST /api/logout`
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = cookies::request_cookie(&headers, SESSION_COOKIE) {
        state.sessions.revoke(&token);
    }

    let mut response = Json(serde_json::json!({ "ok": true })).into_response();
    if let Ok(value) = HeaderValue::from_str(&clear_session_cookie()) {
        response.headers_mut().append(SET_COOKIE, value);
    }
    response
}

/// Guard for admin-only handlers: a valid session cookie must be present.
pub fn require_session(state: &AppState, headers: &HeaderMap) -> Result<(), ApiError> {
    let token =
        cookies::request_cookie(headers, SESSION_COOKIE).ok_or(ApiError::Unauthorized)?;
    if state.sessions.is_valid(&token) {
        Ok(())
    } else {
        Err(ApiError::Unauthorized)
    }
}
