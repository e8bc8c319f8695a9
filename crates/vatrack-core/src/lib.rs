//! `vatrack` Core Library
//!
//! Shared functionality for vatrack components:
//! - Referral attribution capture (query string -> storage port)
//! - Hire/payout domain types and the derived dashboard status
//! - SQLite pool helpers and common database errors
//! - Tracing initialization

pub mod attribution;
pub mod db;
pub mod status;
pub mod tracing_init;

pub use attribution::{AttributionState, AttributionStore};
pub use status::{HireType, PayoutStatus, VaName};
