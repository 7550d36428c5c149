//! DocumentStore interface tests.
//!
//! These tests verify the contract of the DocumentStore trait.
//! Each storage implementation should run these tests, starting from a
//! store that has never been written.

use chrono::{DateTime, NaiveDate, Utc};

use qrpulse::model::{Action, Document, Event, Winner};
use qrpulse::storage::DocumentStore;

pub fn at(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339)
        .expect("valid timestamp")
        .with_timezone(&Utc)
}

/// Create a test event with the usual point and reward values.
pub fn make_event(id: &str, action: Action, user_name: Option<&str>, ts: &str) -> Event {
    Event {
        id: id.to_string(),
        action,
        qr_id: "table-3".to_string(),
        timestamp: at(ts),
        ip: Some("192.0.2.10".to_string()),
        user_agent: Some("Mozilla/5.0".to_string()),
        user_name: user_name.map(String::from),
        phone: None,
        user_id: Some(format!("user-{}", id)),
        points: action.points(),
        reward: action.reward(),
    }
}

// =============================================================================
// DocumentStore::load tests
// =============================================================================

pub async fn test_load_fresh_is_seeded<S: DocumentStore>(store: &S, today: NaiveDate) {
    let doc = store.load().await.expect("load should succeed");
    assert!(doc.events.is_empty(), "fresh store should have no events");
    assert_eq!(doc, Document::seeded(today));
}

// =============================================================================
// DocumentStore::save tests
// =============================================================================

pub async fn test_save_round_trip<S: DocumentStore>(store: &S) {
    let mut doc = store.load().await.expect("load should succeed");
    doc.events = vec![
        make_event("3", Action::Review, Some("김민수"), "2024-03-15T03:10:00Z"),
        make_event("2", Action::Coupon, None, "2024-03-15T03:05:00Z"),
        make_event("1", Action::Qr, None, "2024-03-15T03:00:00Z"),
    ];
    doc.campaigns[0].add_winner(Winner {
        participant_id: "user-3".to_string(),
        name: "김민수".to_string(),
        timestamp: at("2024-03-15T04:00:00Z"),
    });

    store.save(&doc).await.expect("save should succeed");

    let loaded = store.load().await.expect("load should succeed");
    assert_eq!(loaded, doc);
}

pub async fn test_save_preserves_order<S: DocumentStore>(store: &S) {
    let loaded = store.load().await.expect("load should succeed");
    let ids: Vec<&str> = loaded.events.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["3", "2", "1"], "events stay newest-first");
    assert_eq!(loaded.events[0].user_name(), Some("김민수"));
}

pub async fn test_save_replaces<S: DocumentStore>(store: &S) {
    let mut doc = store.load().await.expect("load should succeed");
    doc.events.truncate(1);
    doc.campaigns.truncate(1);

    store.save(&doc).await.expect("save should succeed");

    let loaded = store.load().await.expect("load should succeed");
    assert_eq!(loaded.events.len(), 1);
    assert_eq!(loaded.campaigns.len(), 1);
    assert_eq!(loaded.campaigns[0].current_winners, 1);
}

pub async fn test_save_empty_document<S: DocumentStore>(store: &S) {
    store
        .save(&Document::default())
        .await
        .expect("save should succeed");

    let loaded = store.load().await.expect("load should succeed");
    assert!(loaded.events.is_empty());
    assert!(loaded.campaigns.is_empty(), "saved empty list is kept as-is");
}

/// Run all DocumentStore tests against a store implementation.
#[macro_export]
macro_rules! run_document_store_tests {
    ($store:expr, $today:expr) => {
        use $crate::storage::document_store_tests::*;

        // load tests
        test_load_fresh_is_seeded($store, $today).await;
        println!("  test_load_fresh_is_seeded: PASSED");

        // save tests
        test_save_round_trip($store).await;
        println!("  test_save_round_trip: PASSED");

        test_save_preserves_order($store).await;
        println!("  test_save_preserves_order: PASSED");

        test_save_replaces($store).await;
        println!("  test_save_replaces: PASSED");

        test_save_empty_document($store).await;
        println!("  test_save_empty_document: PASSED");
    };
}
