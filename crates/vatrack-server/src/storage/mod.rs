//! SQLite-backed client registry.

mod db;
mod models;
mod queries;
#[cfg(test)]
mod tests;

pub use db::Database;
pub use models::Client;
pub use queries::NewClient;
