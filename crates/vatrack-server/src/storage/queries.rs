//! Database queries for the client registry.

use vatrack_core::db::{DatabaseError, unix_timestamp};

use super::db::Database;
use super::models::Client;

/// Fields required to insert a client record.
#[derive(Debug)]
pub struct NewClient<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub email: &'a str,
    pub va_name: &'a str,
    pub hire_type: &'a str,
    pub affiliate_id: Option<&'a str>,
}

impl Database {
    /// Insert a new client record with both flags unset.
    pub async fn create_client(&self, params: &NewClient<'_>) -> Result<Client, DatabaseError> {
        let now = unix_timestamp();

        sqlx::query(
            "INSERT INTO clients (id, name, email, va_name, hire_type, affiliate_id, is_hired, is_paid, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, 0, 0, ?)",
        )
        .bind(params.id)
        .bind(params.name)
        .bind(params.email)
        .bind(params.va_name)
        .bind(params.hire_type)
        .bind(params.affiliate_id)
        .bind(now)
        .execute(self.pool())
        .await?;

        self.get_client(params.id).await
    }

    /// Get a client by ID.
    pub async fn get_client(&self, id: &str) -> Result<Client, DatabaseError> {
        sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool())
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("Client {id}")))
    }

    /// List all clients, newest first.
    pub async fn list_clients(&self) -> Result<Vec<Client>, DatabaseError> {
        let clients = sqlx::query_as::<_, Client>(
            "SELECT * FROM clients ORDER BY created_at DESC, rowid DESC",
        )
        .fetch_all(self.pool())
        .await?;

        Ok(clients)
    }

    /// Confirm a hire. Repeating the call is a no-op.
    ///
    /// Returns `false` when no such client exists.
    pub async fn mark_hired(&self, id: &str) -> Result<bool, DatabaseError> {
        let result = sqlx::query("UPDATE clients SET is_hired = 1 WHERE id = ?")
            .bind(id)
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Confirm a payout.
    ///
    /// The update is conditional: the store itself rejects pay-before-hire
    /// and double-pay, so a caller bypassing the dashboard cannot produce an
    /// `is_paid && !is_hired` row. Returns whether a row changed.
    pub async fn mark_paid(&self, id: &str) -> Result<bool, DatabaseError> {
        let result =
            sqlx::query("UPDATE clients SET is_paid = 1 WHERE id = ? AND is_hired = 1 AND is_paid = 0")
                .bind(id)
                .execute(self.pool())
                .await?;

        Ok(result.rows_affected() > 0)
    }
}
