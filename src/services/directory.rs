// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity directory service.
//!
//! Lists activities and handles signup/unregister requests. Every rule is a
//! check against a single activity document followed by one atomic roster
//! update in the repository.

use crate::db::{ActivityRepository, RosterUpdate};
use crate::error::{AppError, Result};
use crate::models::Activity;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Store-agnostic activity directory.
#[derive(Clone)]
pub struct DirectoryService {
    repo: Arc<dyn ActivityRepository>,
    enforce_capacity: bool,
}

impl DirectoryService {
    pub fn new(repo: Arc<dyn ActivityRepository>) -> Self {
        Self {
            repo,
            enforce_capacity: false,
        }
    }

    /// Reject signups for activities whose roster is at `max_participants`.
    pub fn with_capacity_enforcement(mut self, enforce: bool) -> Self {
        self.enforce_capacity = enforce;
        self
    }

    /// All activities keyed by name.
    pub async fn list_activities(&self) -> Result<BTreeMap<String, Activity>> {
        let activities = self.repo.list_all().await?;
        tracing::debug!(count = activities.len(), "Listed activities");

        Ok(activities
            .into_iter()
            .map(|activity| (activity.name.clone(), activity))
            .collect())
    }

    /// Add `email` to the roster of `activity_name`.
    ///
    /// Returns the confirmation message.
    pub async fn signup(&self, activity_name: &str, email: &str) -> Result<String> {
        let activity = self.find(activity_name).await?;

        if activity.has_participant(email) {
            tracing::warn!(
                activity = activity_name,
                email,
                "Signup rejected: already registered"
            );
            return Err(AppError::AlreadyRegistered);
        }

        if self.enforce_capacity && activity.is_full() {
            tracing::warn!(
                activity = activity_name,
                email,
                max_participants = activity.max_participants,
                "Signup rejected: activity full"
            );
            return Err(AppError::ActivityFull);
        }

        // The store re-checks duplicates and capacity against the roster it writes.
        match self
            .repo
            .append_participant(activity_name, email, self.enforce_capacity)
            .await?
        {
            RosterUpdate::Applied => {}
            RosterUpdate::Full => {
                tracing::warn!(
                    activity = activity_name,
                    email,
                    "Signup rejected: activity filled concurrently"
                );
                return Err(AppError::ActivityFull);
            }
            RosterUpdate::Unchanged => {
                tracing::error!(
                    activity = activity_name,
                    email,
                    "Signup write applied no change"
                );
                return Err(AppError::WriteFailure);
            }
        }

        tracing::info!(activity = activity_name, email, "Student signed up");
        Ok(format!("Signed up {} for {}", email, activity_name))
    }

    /// Remove `email` from the roster of `activity_name`.
    ///
    /// Returns the confirmation message.
    pub async fn unregister(&self, activity_name: &str, email: &str) -> Result<String> {
        let activity = self.find(activity_name).await?;

        if !activity.has_participant(email) {
            tracing::warn!(
                activity = activity_name,
                email,
                "Unregister rejected: not registered"
            );
            return Err(AppError::NotRegistered);
        }

        if self.repo.remove_participant(activity_name, email).await? != RosterUpdate::Applied {
            tracing::error!(
                activity = activity_name,
                email,
                "Unregister write applied no change"
            );
            return Err(AppError::WriteFailure);
        }

        tracing::info!(activity = activity_name, email, "Student unregistered");
        Ok(format!("Unregistered {} from {}", email, activity_name))
    }

    async fn find(&self, activity_name: &str) -> Result<Activity> {
        self.repo
            .find_by_name(activity_name)
            .await?
            .ok_or_else(|| {
                tracing::warn!(activity = activity_name, "Activity not found");
                AppError::NotFound
            })
    }
}
