//! Relay client for the external CRM webhook.
//!
//! The CRM URL stays server-side; the browser only ever talks to this
//! process. The relay adds no business logic: `forward` mirrors upstream
//! status and body verbatim, `notify` is the internal variant used by the
//! registration and payout flows.

use serde::Serialize;
use thiserror::Error;

use crate::storage::Client;

/// Relay errors, distinguished so the payout flow can surface actionable
/// messages.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("GHL_WEBHOOK_URL not configured")]
    NotConfigured,

    #[error("Failed to reach GHL webhook")]
    Unreachable(#[source] reqwest::Error),

    #[error("GHL webhook returned status {status}")]
    Rejected { status: u16 },
}

/// Stage of the referral funnel reported to the CRM.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    NewLead,
    Customer,
    Payout,
}

/// Payload sent to the CRM webhook. Absent fields are omitted from the JSON.
#[derive(Debug, Serialize)]
pub struct CrmEvent {
    pub event: EventKind,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affiliate_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payout_amount: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl CrmEvent {
    /// Lead event sent right after registration.
    pub fn new_lead(client: &Client, fingerprint: Option<String>) -> Self {
        Self {
            event: EventKind::NewLead,
            email: client.email.clone(),
            name: Some(client.name.clone()),
            affiliate_id: client.affiliate_id.clone(),
            fingerprint,
            payout_amount: None,
            status: None,
        }
    }

    /// Customer event sent when the admin confirms a hire.
    pub fn customer(client: &Client) -> Self {
        Self {
            event: EventKind::Customer,
            email: client.email.clone(),
            name: Some(client.name.clone()),
            affiliate_id: client.affiliate_id.clone(),
            fingerprint: None,
            payout_amount: None,
            status: Some("hired".to_string()),
        }
    }

    /// Payout event; must be accepted by the CRM before the paid flag is set.
    pub fn payout(client: &Client, amount: i64) -> Self {
        Self {
            event: EventKind::Payout,
            email: client.email.clone(),
            name: Some(client.name.clone()),
            affiliate_id: client.affiliate_id.clone(),
            fingerprint: None,
            payout_amount: Some(amount),
            status: Some("paid".to_string()),
        }
    }
}

/// Forwards JSON payloads to the configured CRM webhook URL.
pub struct WebhookRelay {
    http: reqwest::Client,
    url: Option<String>,
}

impl WebhookRelay {
    /// Create a relay client. `url` is the CRM webhook target; when `None`
    /// every call fails fast with [`RelayError::NotConfigured`].
    pub fn new(url: Option<String>) -> Result<Self, reqwest::Error> {
        // reqwest is built with rustls-no-provider; make sure a crypto
        // provider is installed. The `Err` case means one already was.
        let _ = rustls::crypto::ring::default_provider().install_default();

        let http = reqwest::Client::builder().build()?;
        let url = url.filter(|u| !u.is_empty());
        Ok(Self { http, url })
    }

    fn target(&self) -> Result<&str, RelayError> {
        self.url.as_deref().ok_or(RelayError::NotConfigured)
    }

    /// Whether a target URL is configured.
    pub const fn is_configured(&self) -> bool {
        self.url.is_some()
    }

    /// Transparent pass-through: POST the body verbatim, mirror upstream
    /// status code and raw body text. No retry on transport failure.
    pub async fn forward(&self, body: &serde_json::Value) -> Result<(u16, String), RelayError> {
        let url = self.target()?;

        let resp = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(RelayError::Unreachable)?;

        let status = resp.status().as_u16();
        let text = resp.text().await.map_err(RelayError::Unreachable)?;
        Ok((status, text))
    }

    /// Send a funnel event. Unlike [`forward`](Self::forward), a non-2xx
    /// upstream status is an error.
    pub async fn notify(&self, event: &CrmEvent) -> Result<(), RelayError> {
        let url = self.target()?;

        let resp = self
            .http
            .post(url)
            .json(event)
            .send()
            .await
            .map_err(RelayError::Unreachable)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(RelayError::Rejected {
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_client(affiliate: Option<&str>) -> Client {
        Client {
            id: "c1".into(),
            name: "Jane Doe".into(),
            email: "jane@x.com".into(),
            va_name: "VA Beta".into(),
            hire_type: "Full-Time".into(),
            affiliate_id: affiliate.map(str::to_string),
            is_hired: false,
            is_paid: false,
            created_at: 0,
        }
    }

    #[test]
    fn lead_event_serialization() {
        let event = CrmEvent::new_lead(&sample_client(Some("aff-42")), Some("fp-1".into()));
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["event"], "new_lead");
        assert_eq!(json["email"], "jane@x.com");
        assert_eq!(json["affiliate_id"], "aff-42");
        assert_eq!(json["fingerprint"], "fp-1");
        assert!(json.get("payout_amount").is_none());
    }

    #[test]
    fn payout_event_carries_amount() {
        let event = CrmEvent::payout(&sample_client(Some("aff-42")), 300);
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["event"], "payout");
        assert_eq!(json["payout_amount"], 300);
        assert_eq!(json["status"], "paid");
    }

    #[test]
    fn absent_affiliate_is_omitted() {
        let event = CrmEvent::new_lead(&sample_client(None), None);
        let json = serde_json::to_value(&event).unwrap();

        assert!(json.get("affiliate_id").is_none());
        assert!(json.get("fingerprint").is_none());
    }

    #[tokio::test]
    async fn unconfigured_relay_fails_fast() {
        let relay = WebhookRelay::new(None).unwrap();
        assert!(!relay.is_configured());

        let err = relay.forward(&serde_json::json!({})).await.unwrap_err();
        assert!(matches!(err, RelayError::NotConfigured));
        assert_eq!(err.to_string(), "GHL_WEBHOOK_URL not configured");
    }

    #[tokio::test]
    async fn empty_url_counts_as_unconfigured() {
        let relay = WebhookRelay::new(Some(String::new())).unwrap();
        assert!(!relay.is_configured());
    }
}
