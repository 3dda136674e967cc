// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use activity_signup::config::{Config, SeedMode};
use activity_signup::db::{FirestoreDb, InMemoryStore};
use activity_signup::routes::create_router;
use activity_signup::services::{seed, DirectoryService};
use activity_signup::AppState;
use std::sync::Arc;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create an in-memory store holding the seed activities.
#[allow(dead_code)]
pub async fn seeded_store() -> InMemoryStore {
    let store = InMemoryStore::new();
    seed(&store, SeedMode::IfEmpty)
        .await
        .expect("Seeding in-memory store failed");
    store
}

/// Create a test app over a seeded in-memory store.
/// Returns the router and the store backing it.
#[allow(dead_code)]
pub async fn create_test_app() -> (axum::Router, InMemoryStore) {
    create_test_app_with_config(Config::default()).await
}

#[allow(dead_code)]
pub async fn create_test_app_with_config(config: Config) -> (axum::Router, InMemoryStore) {
    let store = seeded_store().await;
    let directory = DirectoryService::new(Arc::new(store.clone()))
        .with_capacity_enforcement(config.enforce_capacity);

    let state = Arc::new(AppState { config, directory });

    (create_router(state), store)
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&body).expect("Body is not JSON")
}
