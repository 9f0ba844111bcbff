//! One-time seed import scenarios.

#![allow(clippy::unwrap_used)]

use localshop_core::SeedState;
use localshop_integration_tests::{JsonSeedSource, UnreachableSeedSource};
use localshop_storefront::services::{MergeSummary, SeedOutcome};
use localshop_storefront::state::AppState;

fn bob_list() -> JsonSeedSource {
    JsonSeedSource(serde_json::json!([
        {"name": "Bob", "email": "bob@x.com", "password": "p2"}
    ]))
}

#[tokio::test]
async fn test_seed_keeps_existing_local_user() {
    let state = AppState::in_memory();
    state.registry().register("Bob Local", "bob@x.com", "mine").unwrap();

    let outcome = state.seeder().seed_once(&bob_list()).await.unwrap();

    assert_eq!(
        outcome,
        SeedOutcome::Merged(MergeSummary {
            added: 0,
            skipped: 1
        })
    );
    let users = state.registry().list();
    assert_eq!(users.len(), 1);
    assert_eq!(users.first().unwrap().name, "Bob Local");
    assert!(state.registry().authenticate("bob@x.com", "mine").is_some());
    assert!(state.registry().authenticate("bob@x.com", "p2").is_none());
}

#[tokio::test]
async fn test_seed_twice_never_duplicates() {
    let state = AppState::in_memory();

    state.seeder().seed_once(&bob_list()).await.unwrap();
    let second = state.seeder().seed_once(&bob_list()).await.unwrap();

    assert_eq!(second, SeedOutcome::AlreadySeeded);
    assert_eq!(state.registry().list().len(), 1);
}

#[tokio::test]
async fn test_unreachable_source_still_marks_seeded() {
    let state = AppState::in_memory();
    assert_eq!(state.seeder().state(), SeedState::Pending);

    let outcome = state.seeder().seed_once(&UnreachableSeedSource).await.unwrap();

    assert_eq!(outcome, SeedOutcome::Failed);
    assert_eq!(state.seeder().state(), SeedState::Seeded);
    assert!(state.registry().list().is_empty());

    // A reachable source later is not consulted.
    let later = state.seeder().seed_once(&bob_list()).await.unwrap();
    assert_eq!(later, SeedOutcome::AlreadySeeded);
    assert!(state.registry().list().is_empty());
}

#[tokio::test]
async fn test_malformed_seed_payload_is_ignored() {
    let state = AppState::in_memory();
    let source = JsonSeedSource(serde_json::json!({"users": []}));

    let outcome = state.seeder().seed_once(&source).await.unwrap();
    assert_eq!(outcome, SeedOutcome::Failed);
    assert_eq!(state.seeder().state(), SeedState::Seeded);
}
