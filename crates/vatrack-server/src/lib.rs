//! vatrack server library.
//!
//! Affiliate referral tracking and VA client registration: client registry
//! (SQLite), CRM webhook relay, attribution capture, and the admin session
//! gate, all behind one axum router.

pub mod cookies;
pub mod error;
pub mod relay;
pub mod routes;
pub mod session;
pub mod storage;
