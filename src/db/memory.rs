// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process activity store.
//!
//! Used by tests and for local development without Firestore. Each roster
//! update runs under the map entry's write lock, so updates to a single
//! activity are atomic.

use crate::db::{ActivityRepository, RosterEdit, RosterUpdate};
use crate::error::AppError;
use crate::models::Activity;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

/// Activity store backed by a concurrent map keyed by activity name.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    activities: Arc<DashMap<String, Activity>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored activities.
    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }
}

#[async_trait]
impl ActivityRepository for InMemoryStore {
    async fn find_by_name(&self, name: &str) -> Result<Option<Activity>, AppError> {
        Ok(self.activities.get(name).map(|entry| entry.value().clone()))
    }

    async fn list_all(&self) -> Result<Vec<Activity>, AppError> {
        Ok(self
            .activities
            .iter()
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn update_roster(&self, name: &str, edit: RosterEdit) -> Result<RosterUpdate, AppError> {
        let Some(mut entry) = self.activities.get_mut(name) else {
            return Ok(RosterUpdate::Unchanged);
        };
        Ok(edit.apply(&mut entry))
    }

    async fn insert(&self, activity: &Activity) -> Result<(), AppError> {
        self.activities.insert(activity.name.clone(), activity.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<usize, AppError> {
        let count = self.activities.len();
        self.activities.clear();
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn debate_team() -> Activity {
        Activity {
            name: "Debate Team".to_string(),
            description: "Develop public speaking and argumentation skills".to_string(),
            schedule: "Wednesdays, 4:00 PM - 5:30 PM".to_string(),
            max_participants: 14,
            participants: vec!["james@mergington.edu".to_string()],
        }
    }

    #[tokio::test]
    async fn test_append_is_noop_for_duplicate_or_missing() {
        let store = InMemoryStore::new();
        store.insert(&debate_team()).await.unwrap();

        assert_eq!(
            store
                .append_participant("Debate Team", "harper@mergington.edu", false)
                .await
                .unwrap(),
            RosterUpdate::Applied
        );
        assert_eq!(
            store
                .append_participant("Debate Team", "harper@mergington.edu", false)
                .await
                .unwrap(),
            RosterUpdate::Unchanged
        );
        assert_eq!(
            store
                .append_participant("Robotics", "harper@mergington.edu", false)
                .await
                .unwrap(),
            RosterUpdate::Unchanged
        );

        let stored = store.find_by_name("Debate Team").await.unwrap().unwrap();
        assert_eq!(
            stored.participants,
            vec!["james@mergington.edu", "harper@mergington.edu"]
        );
    }

    #[tokio::test]
    async fn test_remove_reports_change() {
        let store = InMemoryStore::new();
        store.insert(&debate_team()).await.unwrap();

        assert_eq!(
            store
                .remove_participant("Debate Team", "ghost@mergington.edu")
                .await
                .unwrap(),
            RosterUpdate::Unchanged
        );
        assert_eq!(
            store
                .remove_participant("Debate Team", "james@mergington.edu")
                .await
                .unwrap(),
            RosterUpdate::Applied
        );

        let stored = store.find_by_name("Debate Team").await.unwrap().unwrap();
        assert!(stored.participants.is_empty());
    }

    #[tokio::test]
    async fn test_clear_returns_count() {
        let store = InMemoryStore::new();
        store.insert(&debate_team()).await.unwrap();
        assert_eq!(store.len(), 1);

        assert_eq!(store.clear().await.unwrap(), 1);
        assert!(store.is_empty());
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_appends_are_not_lost() {
        let store = InMemoryStore::new();
        let mut activity = debate_team();
        activity.participants.clear();
        store.insert(&activity).await.unwrap();

        let mut handles = vec![];
        for i in 0..20 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .append_participant(
                        "Debate Team",
                        &format!("student{}@mergington.edu", i),
                        false,
                    )
                    .await
            }));
        }
        for handle in handles {
            assert_eq!(handle.await.unwrap().unwrap(), RosterUpdate::Applied);
        }

        let stored = store.find_by_name("Debate Team").await.unwrap().unwrap();
        assert_eq!(stored.participants.len(), 20);
    }

    #[tokio::test]
    async fn test_concurrent_appends_stop_at_capacity() {
        let store = InMemoryStore::new();
        let mut activity = debate_team();
        activity.participants.clear();
        activity.max_participants = 3;
        store.insert(&activity).await.unwrap();

        let mut handles = vec![];
        for i in 0..10 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .append_participant(
                        "Debate Team",
                        &format!("student{}@mergington.edu", i),
                        true,
                    )
                    .await
            }));
        }

        let mut applied = 0;
        for handle in handles {
            match handle.await.unwrap().unwrap() {
                RosterUpdate::Applied => applied += 1,
                RosterUpdate::Full => {}
                RosterUpdate::Unchanged => panic!("distinct emails never collide"),
            }
        }

        assert_eq!(applied, 3);
        let stored = store.find_by_name("Debate Team").await.unwrap().unwrap();
        assert_eq!(stored.participants.len(), 3);
    }
}
