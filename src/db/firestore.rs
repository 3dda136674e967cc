// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper implementing the activity repository.
//!
//! Each activity is one document in the `activities` collection, keyed by
//! its URL-encoded name. Roster changes are read-modify-write transactions
//! on that single document: the read goes through the transaction, so a
//! concurrent commit to the same document makes Firestore retry the edit
//! against fresh data.

use crate::db::{collections, ActivityRepository, RosterEdit, RosterUpdate};
use crate::error::AppError;
use crate::models::Activity;
use async_trait::async_trait;

// Firestore limits batch/transaction writes to 500 operations.
// We use a safe limit of 400 to allow headroom.
const BATCH_SIZE: usize = 400;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

/// Document ID for an activity. Names may contain characters Firestore
/// does not allow in IDs (notably `/`).
fn document_id(name: &str) -> String {
    urlencoding::encode(name).into_owned()
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    /// Batch delete documents by ID using transactions.
    async fn batch_delete(&self, doc_ids: &[String], collection: &str) -> Result<(), AppError> {
        let client = self.get_client()?;

        for chunk in doc_ids.chunks(BATCH_SIZE) {
            let mut transaction = client
                .begin_transaction()
                .await
                .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

            for doc_id in chunk {
                client
                    .fluent()
                    .delete()
                    .from(collection)
                    .document_id(doc_id)
                    .add_to_transaction(&mut transaction)
                    .map_err(|e| {
                        AppError::Database(format!(
                            "Failed to add deletion to transaction for {}: {}",
                            collection, e
                        ))
                    })?;
            }

            transaction.commit().await.map_err(|e| {
                AppError::Database(format!("Failed to commit batch deletion: {}", e))
            })?;
        }

        Ok(())
    }
}

#[async_trait]
impl ActivityRepository for FirestoreDb {
    async fn find_by_name(&self, name: &str) -> Result<Option<Activity>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::ACTIVITIES)
            .obj()
            .one(&document_id(name))
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn list_all(&self) -> Result<Vec<Activity>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::ACTIVITIES)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn update_roster(&self, name: &str, edit: RosterEdit) -> Result<RosterUpdate, AppError> {
        let client = self.get_client()?;
        let doc_id = document_id(name);

        // `db` is scoped to the transaction; the closure may run again on contention.
        let outcome = client
            .run_transaction(|db, transaction| {
                let doc_id = doc_id.clone();
                let edit = edit.clone();
                Box::pin(async move {
                    let current: Option<Activity> = db
                        .fluent()
                        .select()
                        .by_id_in(collections::ACTIVITIES)
                        .obj()
                        .one(&doc_id)
                        .await?;

                    let Some(mut activity) = current else {
                        return Ok(RosterUpdate::Unchanged);
                    };

                    let outcome = edit.apply(&mut activity);
                    if outcome == RosterUpdate::Applied {
                        db.fluent()
                            .update()
                            .in_col(collections::ACTIVITIES)
                            .document_id(&doc_id)
                            .object(&activity)
                            .add_to_transaction(transaction)?;
                    }

                    Ok(outcome)
                })
            })
            .await
            .map_err(|e| AppError::Database(format!("Roster transaction failed: {}", e)))?;

        tracing::debug!(activity = name, ?edit, ?outcome, "Roster update");
        Ok(outcome)
    }

    async fn insert(&self, activity: &Activity) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::ACTIVITIES)
            .document_id(document_id(&activity.name))
            .object(activity)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    async fn clear(&self) -> Result<usize, AppError> {
        let doc_ids: Vec<String> = self
            .list_all()
            .await?
            .iter()
            .map(|activity| document_id(&activity.name))
            .collect();

        self.batch_delete(&doc_ids, collections::ACTIVITIES).await?;

        tracing::debug!(count = doc_ids.len(), "Deleted activities");
        Ok(doc_ids.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_id_encodes_reserved_characters() {
        assert_eq!(document_id("Chess Club"), "Chess%20Club");
        assert_eq!(document_id("Arts/Crafts"), "Arts%2FCrafts");
    }

    #[tokio::test]
    async fn test_offline_client_reports_database_error() {
        let db = FirestoreDb::new_mock();
        let err = db.find_by_name("Chess Club").await.unwrap_err();
        assert!(matches!(err, AppError::Database(_)));

        let err = db
            .append_participant("Chess Club", "new@mergington.edu", false)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Database(_)));
    }
}
