//! Storage layer tests for the client registry.

use vatrack_core::status::PayoutStatus;

use super::db::Database;
use super::queries::NewClient;

async fn test_db() -> Database {
    Database::open_in_memory().await.unwrap()
}

fn new_client<'a>(id: &'a str, affiliate_id: Option<&'a str>) -> NewClient<'a> {
    NewClient {
        id,
        name: "Jane Doe",
        email: "jane@x.com",
        va_name: "VA Beta",
        hire_type: "Full-Time",
        affiliate_id,
    }
}

#[tokio::test]
async fn create_and_get_client() {
    let db = test_db().await;
    let client = db.create_client(&new_client("c1", Some("aff-42"))).await.unwrap();

    assert_eq!(client.id, "c1");
    assert_eq!(client.name, "Jane Doe");
    assert_eq!(client.affiliate_id.as_deref(), Some("aff-42"));
    assert!(!client.is_hired);
    assert!(!client.is_paid);
    assert_eq!(client.payout_status(), PayoutStatus::AwaitingHire);
}

#[tokio::test]
async fn client_without_affiliate_is_not_applicable() {
    let db = test_db().await;
    let client = db.create_client(&new_client("c1", None)).await.unwrap();

    assert_eq!(client.affiliate_id, None);
    assert_eq!(client.payout_status(), PayoutStatus::NotApplicable);
}

#[tokio::test]
async fn get_missing_client_is_not_found() {
    let db = test_db().await;
    assert!(db.get_client("nope").await.is_err());
}

#[tokio::test]
async fn list_clients_newest_first() {
    let db = test_db().await;
    db.create_client(&new_client("c1", None)).await.unwrap();
    db.create_client(&new_client("c2", None)).await.unwrap();
    db.create_client(&new_client("c3", None)).await.unwrap();

    let clients = db.list_clients().await.unwrap();
    let ids: Vec<&str> = clients.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, ["c3", "c2", "c1"]);
}

#[tokio::test]
async fn mark_hired_is_idempotent() {
    let db = test_db().await;
    db.create_client(&new_client("c1", Some("aff-42"))).await.unwrap();

    assert!(db.mark_hired("c1").await.unwrap());
    assert!(db.mark_hired("c1").await.unwrap());
    assert!(!db.mark_hired("missing").await.unwrap());

    let client = db.get_client("c1").await.unwrap();
    assert!(client.is_hired);
    assert_eq!(client.payout_status(), PayoutStatus::ReadyForPayout);
}

#[tokio::test]
async fn mark_paid_requires_prior_hire() {
    let db = test_db().await;
    db.create_client(&new_client("c1", Some("aff-42"))).await.unwrap();

    // Pay-before-hire is rejected at the store boundary.
    assert!(!db.mark_paid("c1").await.unwrap());
    assert!(!db.get_client("c1").await.unwrap().is_paid);

    db.mark_hired("c1").await.unwrap();
    assert!(db.mark_paid("c1").await.unwrap());

    let client = db.get_client("c1").await.unwrap();
    assert!(client.is_paid);
    assert_eq!(client.payout_status(), PayoutStatus::Paid);
}

#[tokio::test]
async fn mark_paid_fires_at_most_once() {
    let db = test_db().await;
    db.create_client(&new_client("c1", Some("aff-42"))).await.unwrap();
    db.mark_hired("c1").await.unwrap();

    assert!(db.mark_paid("c1").await.unwrap());
    assert!(!db.mark_paid("c1").await.unwrap());
}

#[tokio::test]
async fn affiliate_id_survives_admin_actions() {
    let db = test_db().await;
    db.create_client(&new_client("c1", Some("aff-42"))).await.unwrap();
    db.mark_hired("c1").await.unwrap();
    db.mark_paid("c1").await.unwrap();

    let client = db.get_client("c1").await.unwrap();
    assert_eq!(client.affiliate_id.as_deref(), Some("aff-42"));
}

#[tokio::test]
async fn open_persists_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("registry.db");

    {
        let db = Database::open(&path).await.unwrap();
        db.create_client(&new_client("c1", None)).await.unwrap();
    }

    let db = Database::open(&path).await.unwrap();
    assert_eq!(db.list_clients().await.unwrap().len(), 1);
}
