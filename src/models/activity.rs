// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity model for storage and API.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Stored activity record.
///
/// The same shape is stored in the document store and returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "static/generated/")
)]
pub struct Activity {
    /// Activity name (unique, also the basis of the document ID)
    pub name: String,
    pub description: String,
    /// Human-readable meeting times, e.g. "Fridays, 3:30 PM - 5:00 PM"
    pub schedule: String,
    pub max_participants: u32,
    /// Student emails in signup order
    pub participants: Vec<String>,
}

impl Activity {
    /// Whether `email` is on the roster.
    pub fn has_participant(&self, email: &str) -> bool {
        self.participants.iter().any(|p| p == email)
    }

    /// Whether the roster has reached `max_participants`.
    pub fn is_full(&self) -> bool {
        self.participants.len() >= self.max_participants as usize
    }
}
