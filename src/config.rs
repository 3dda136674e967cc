// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is loaded first if present.

use std::env;
use std::str::FromStr;

/// Which backing store holds the activity documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// Google Cloud Firestore (or the emulator if `FIRESTORE_EMULATOR_HOST` is set)
    Firestore,
    /// In-process store; contents are lost on shutdown
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "firestore" => Ok(Self::Firestore),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown store backend '{}'", other)),
        }
    }
}

/// How activities are seeded at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedMode {
    /// Insert the demo activities only if the store holds none.
    #[default]
    IfEmpty,
    /// Wipe every activity (and all signups), then insert the demo activities.
    Reset,
    /// Leave the store untouched.
    Skip,
}

impl FromStr for SeedMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "if-empty" | "if_empty" => Ok(Self::IfEmpty),
            "reset" => Ok(Self::Reset),
            "skip" | "none" => Ok(Self::Skip),
            other => Err(format!("unknown seed mode '{}'", other)),
        }
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// GCP project ID (Firestore)
    pub gcp_project_id: String,
    /// Frontend origin allowed by CORS
    pub frontend_url: String,
    /// Directory served under `/static`
    pub static_dir: String,
    /// Activity store backend
    pub store: StoreBackend,
    /// Startup seeding behavior
    pub seed_mode: SeedMode,
    /// Reject signups once an activity reaches `max_participants`
    pub enforce_capacity: bool,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            port: 8000,
            gcp_project_id: "test-project".to_string(),
            frontend_url: "http://localhost:8000".to_string(),
            static_dir: "static".to_string(),
            store: StoreBackend::Memory,
            seed_mode: SeedMode::IfEmpty,
            enforce_capacity: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Build configuration from a variable lookup (the environment, in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            port: parse_var(&lookup, "PORT", 8000)?,
            gcp_project_id: lookup("GCP_PROJECT_ID").unwrap_or_else(|| "local-dev".to_string()),
            frontend_url: lookup("FRONTEND_URL")
                .unwrap_or_else(|| "http://localhost:8000".to_string()),
            static_dir: lookup("STATIC_DIR").unwrap_or_else(|| "static".to_string()),
            store: parse_var(&lookup, "ACTIVITY_STORE", StoreBackend::Firestore)?,
            seed_mode: parse_var(&lookup, "SEED_MODE", SeedMode::IfEmpty)?,
            enforce_capacity: match lookup("ENFORCE_CAPACITY") {
                Some(v) => parse_bool(&v).ok_or(ConfigError::Invalid {
                    var: "ENFORCE_CAPACITY",
                    reason: format!("expected a boolean, got '{}'", v),
                })?,
                None => false,
            },
        })
    }
}

/// Parse an optional variable, falling back to `default` when unset.
fn parse_var<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(var) {
        Some(v) => v.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            reason: format!("'{}': {}", v, e),
        }),
        None => Ok(default),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}
