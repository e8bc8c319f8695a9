//! Client registration and the two admin actions.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;
use vatrack_core::attribution;
use vatrack_core::status::{HireType, ParseError, PayoutStatus, VaName};

use super::AppState;
use super::auth::require_session;
use crate::cookies::BrowserCookies;
use crate::error::ApiError;
use crate::relay::{CrmEvent, WebhookRelay};
use crate::storage::{Client, NewClient};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub va_name: String,
    #[serde(default)]
    pub hire_type: String,
}

/// Client record plus its derived dashboard status.
#[derive(Debug, Serialize)]
pub struct ClientResponse {
    #[serde(flatten)]
    pub client: Client,
    pub payout_status: PayoutStatus,
}

impl From<Client> for ClientResponse {
    fn from(client: Client) -> Self {
        let payout_status = client.payout_status();
        Self {
            client,
            payout_status,
        }
    }
}

fn bad_field(e: ParseError) -> ApiError {
    ApiError::Validation(e.to_string())
}

/// `POST /api/clients` — self-registration. Attribution is stamped from the
/// request cookies; the lead event is fire-and-forget.
pub async fn register(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<ClientResponse>, ApiError> {
    // Required-field check only; no email format or duplicate check.
    if req.name.trim().is_empty()
        || req.email.trim().is_empty()
        || req.va_name.trim().is_empty()
        || req.hire_type.trim().is_empty()
    {
        return Err(ApiError::Validation("Please fill in all fields.".into()));
    }
    let va_name: VaName = req.va_name.parse().map_err(bad_field)?;
    let hire_type: HireType = req.hire_type.parse().map_err(bad_field)?;

    let jar = BrowserCookies::from_request(&headers);
    let attribution = attribution::load(&jar);

    let id = Uuid::new_v4().to_string();
    let client = state
        .db
        .create_client(&NewClient {
            id: &id,
            name: req.name.trim(),
            email: req.email.trim(),
            va_name: va_name.as_str(),
            hire_type: hire_type.as_str(),
            affiliate_id: attribution.affiliate_id.as_deref(),
        })
        .await?;

    info!(
        client_id = %client.id,
        affiliate = client.affiliate_id.as_deref().unwrap_or("-"),
        "Client registered"
    );

    // Lead notification never blocks registration.
    notify_detached(
        &state.relay,
        CrmEvent::new_lead(&client, attribution.fingerprint),
        "lead",
    );

    Ok(Json(client.into()))
}

/// `GET /api/clients` — full listing, newest first. Admin only.
pub async fn list(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<ClientResponse>>, ApiError> {
    require_session(&state, &headers)?;

    let clients = state.db.list_clients().await?;
    Ok(Json(clients.into_iter().map(Into::into).collect()))
}

/// `POST /api/clients/{id}/hire` — confirm a hire. Admin only.
pub async fn confirm_hire(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<ClientResponse>, ApiError> {
    require_session(&state, &headers)?;

    if !state.db.mark_hired(&id).await? {
        return Err(vatrack_core::db::DatabaseError::NotFound(format!("Client {id}")).into());
    }
    let client = state.db.get_client(&id).await?;

    info!(client_id = %client.id, "Hire confirmed");

    // CRM hire confirmation is fire-and-forget, like the lead event.
    notify_detached(&state.relay, CrmEvent::customer(&client), "customer");

    Ok(Json(client.into()))
}

/// `POST /api/clients/{id}/payout` — trigger the affiliate payout. Admin only.
///
/// The relay call comes first: the paid flag is only set after the CRM
/// accepted the payout event. On any relay failure the record stays unpaid.
pub async fn trigger_payout(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<ClientResponse>, ApiError> {
    require_session(&state, &headers)?;

    let client = state.db.get_client(&id).await?;
    if client.affiliate_id.is_none() {
        return Err(ApiError::Conflict(
            "Client has no affiliate attribution".into(),
        ));
    }
    if !client.is_hired {
        return Err(ApiError::Conflict("Client has not been hired yet".into()));
    }
    if client.is_paid {
        return Err(ApiError::Conflict("Payout already triggered".into()));
    }

    let hire_type: HireType = client
        .hire_type
        .parse()
        .map_err(|e: ParseError| ApiError::Internal(e.to_string()))?;
    let amount = hire_type.payout_amount();

    state
        .relay
        .notify(&CrmEvent::payout(&client, amount))
        .await?;

    if !state.db.mark_paid(&id).await? {
        // Lost a race with a concurrent trigger; the record is already paid.
        return Err(ApiError::Conflict("Payout already triggered".into()));
    }

    info!(client_id = %id, amount, "Payout triggered");

    let client = state.db.get_client(&id).await?;
    Ok(Json(client.into()))
}

/// Spawn a webhook notification that must not block or fail the caller.
fn notify_detached(relay: &Arc<WebhookRelay>, event: CrmEvent, kind: &'static str) {
    let relay = Arc::clone(relay);
    tokio::spawn(async move {
        if let Err(e) = relay.notify(&event).await {
            warn!(error = %e, kind, "CRM webhook notification failed");
        }
    });
}
