//! Data models for the client registry.

use serde::{Deserialize, Serialize};
use vatrack_core::status::{PayoutStatus, payout_status};

/// A registered VA client.
///
/// `affiliate_id` is fixed at creation; later admin actions only ever touch
/// the `is_hired` and `is_paid` flags, and only forward.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Client {
    pub id: String,
    pub name: String,
    pub email: String,
    pub va_name: String,
    pub hire_type: String,
    pub affiliate_id: Option<String>,
    pub is_hired: bool,
    pub is_paid: bool,
    pub created_at: i64,
}

impl Client {
    /// Derived payout status for the dashboard.
    pub fn payout_status(&self) -> PayoutStatus {
        payout_status(self.affiliate_id.is_some(), self.is_hired, self.is_paid)
    }
}
