//! JSON snapshot persistence of the in-memory store.

use std::fs;

use chrono::{Duration, Utc};
use oracle_core::{Account, CollectionEntry, SubscriptionPlan, sample_catalog};
use oracle_store::{MemoryStore, Store, StoreError};
use tempfile::TempDir;

#[test]
fn snapshot_round_trip_preserves_state() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("oracle.json");
    let now = Utc::now();

    let store = MemoryStore::new();
    let deck = sample_catalog(now);
    store.insert_catalog_items(deck.clone()).unwrap();
    let account = Account::new("seer@example.com", now)
        .with_subscription(SubscriptionPlan::Monthly, Some(now + Duration::days(30)));
    let id = account.id;
    store.insert_account(account).unwrap();
    let entry = store
        .commit_draw(None, CollectionEntry::new(id, deck[3].id, now))
        .unwrap();
    store.save_json(&path).unwrap();

    let restored = MemoryStore::load_json(&path).unwrap();
    let account = restored.get_account(id).unwrap();
    assert_eq!(account.last_access_at, Some(now));
    assert_eq!(account.subscription_plan, Some(SubscriptionPlan::Monthly));
    assert_eq!(restored.list_catalog().unwrap(), deck);
    assert_eq!(restored.list_collection_entries(id).unwrap(), vec![entry]);
}

#[test]
fn malformed_timestamp_is_reported_as_corrupt() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("oracle.json");
    fs::write(
        &path,
        r#"{
  "accounts": [{
    "id": "6f1c3f8e-2b1d-4e55-9a51-0c8b8d1f2a10",
    "email": "seer@example.com",
    "created_at": "yesterday-ish",
    "subscription_active": true,
    "subscription_plan": "monthly",
    "subscription_expires_at": null,
    "last_access_at": null
  }],
  "catalog": [],
  "entries": []
}"#,
    )
    .unwrap();

    assert!(matches!(
        MemoryStore::load_json(&path),
        Err(StoreError::Corrupt(_))
    ));
}

#[test]
fn missing_snapshot_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    assert!(matches!(
        MemoryStore::load_json(&dir.path().join("absent.json")),
        Err(StoreError::Io(_))
    ));
}
