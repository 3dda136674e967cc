// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity Signup: Mergington High School extracurricular activities
//!
//! This crate provides the backend API for listing activities and
//! signing students up for them (or removing them) by email.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use services::DirectoryService;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub directory: DirectoryService,
}
