// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer: the activity repository and its backends.

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::InMemoryStore;

use crate::error::AppError;
use crate::models::Activity;
use async_trait::async_trait;

/// Collection names as constants.
pub mod collections {
    pub const ACTIVITIES: &str = "activities";
}

/// A change to one activity's roster, applied atomically by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterEdit {
    /// Append `email` unless present. With `enforce_capacity`, refuse when the
    /// roster already holds `max_participants` entries.
    Append {
        email: String,
        enforce_capacity: bool,
    },
    /// Remove every occurrence of `email`.
    Remove { email: String },
}

/// Outcome of a roster edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterUpdate {
    Applied,
    /// Nothing changed: the activity is gone, or the edit was already in effect.
    Unchanged,
    /// The roster is at capacity.
    Full,
}

impl RosterEdit {
    /// Apply the edit to the current document contents.
    ///
    /// Backends call this with the document locked (or inside a transaction),
    /// so the capacity check and the write see the same roster.
    pub fn apply(&self, activity: &mut Activity) -> RosterUpdate {
        match self {
            RosterEdit::Append {
                email,
                enforce_capacity,
            } => {
                if activity.has_participant(email) {
                    RosterUpdate::Unchanged
                } else if *enforce_capacity && activity.is_full() {
                    RosterUpdate::Full
                } else {
                    activity.participants.push(email.clone());
                    RosterUpdate::Applied
                }
            }
            RosterEdit::Remove { email } => {
                let before = activity.participants.len();
                activity.participants.retain(|p| p != email);
                if activity.participants.len() == before {
                    RosterUpdate::Unchanged
                } else {
                    RosterUpdate::Applied
                }
            }
        }
    }
}

/// Store operations needed by the activity directory.
///
/// Roster updates are atomic per activity document.
#[async_trait]
pub trait ActivityRepository: Send + Sync {
    /// Look up an activity by its exact name.
    async fn find_by_name(&self, name: &str) -> Result<Option<Activity>, AppError>;

    /// Fetch every activity, in no particular order.
    async fn list_all(&self) -> Result<Vec<Activity>, AppError>;

    /// Atomically apply `edit` to the named activity's roster.
    async fn update_roster(&self, name: &str, edit: RosterEdit) -> Result<RosterUpdate, AppError>;

    /// Append `email` to the roster unless it is already present.
    async fn append_participant(
        &self,
        name: &str,
        email: &str,
        enforce_capacity: bool,
    ) -> Result<RosterUpdate, AppError> {
        let edit = RosterEdit::Append {
            email: email.to_string(),
            enforce_capacity,
        };
        self.update_roster(name, edit).await
    }

    /// Remove every occurrence of `email` from the roster.
    async fn remove_participant(
        &self,
        name: &str,
        email: &str,
    ) -> Result<RosterUpdate, AppError> {
        let edit = RosterEdit::Remove {
            email: email.to_string(),
        };
        self.update_roster(name, edit).await
    }

    /// Create or overwrite an activity.
    async fn insert(&self, activity: &Activity) -> Result<(), AppError>;

    /// Delete every activity. Returns the number deleted.
    async fn clear(&self) -> Result<usize, AppError>;
}
