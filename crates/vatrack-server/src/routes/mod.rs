//! HTTP routes for the vatrack server.

mod auth;
mod clients;
mod pages;
mod webhook;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;

use crate::relay::WebhookRelay;
use crate::session::{AdminCredentials, SessionStore};
use crate::storage::Database;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub relay: Arc<WebhookRelay>,
    pub sessions: SessionStore,
    pub credentials: AdminCredentials,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::dashboard))
        .route("/api/login", post(auth::login))
        .route("/api/logout", post(auth::logout))
        .route("/api/clients", post(clients::register).get(clients::list))
        .route("/api/clients/{id}/hire", post(clients::confirm_hire))
        .route("/api/clients/{id}/payout", post(clients::trigger_payout))
        .route(
            "/api/ghl-webhook",
            post(webhook::proxy).fallback(webhook::method_not_allowed),
        )
        // Any other path serves the dashboard shell (single-page fallback).
        .fallback(pages::dashboard)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
