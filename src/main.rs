// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity Signup API Server
//!
//! Lists Mergington High School extracurricular activities and lets
//! students sign up or unregister by email.

use activity_signup::{
    config::{Config, StoreBackend},
    db::{ActivityRepository, FirestoreDb, InMemoryStore},
    services::{self, DirectoryService},
    AppState,
};
use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging()?;

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        port = config.port,
        store = ?config.store,
        seed_mode = ?config.seed_mode,
        enforce_capacity = config.enforce_capacity,
        "Starting Activity Signup API"
    );

    let repo: Arc<dyn ActivityRepository> = match config.store {
        StoreBackend::Firestore => Arc::new(
            FirestoreDb::new(&config.gcp_project_id)
                .await
                .context("Failed to connect to Firestore")?,
        ),
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; signups are lost on shutdown");
            Arc::new(InMemoryStore::new())
        }
    };

    services::seed(repo.as_ref(), config.seed_mode)
        .await
        .with_context(|| format!("Failed to seed activities ({:?})", config.seed_mode))?;

    let directory =
        DirectoryService::new(repo).with_capacity_enforcement(config.enforce_capacity);

    let state = Arc::new(AppState {
        config: config.clone(),
        directory,
    });

    let app = activity_signup::routes::create_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(address = %addr, static_dir = %config.static_dir, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() -> anyhow::Result<()> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("activity_signup=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
