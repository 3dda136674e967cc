// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity listing and signup routes.

use crate::error::Result;
use crate::models::Activity;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Activity routes (public).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/activities", get(list_activities))
        .route("/activities/{activity_name}/signup", post(signup))
        .route("/activities/{activity_name}/unregister", delete(unregister))
}

/// Student identified by the `email` query parameter.
#[derive(Deserialize)]
struct EmailQuery {
    email: String,
}

/// Confirmation returned by signup and unregister.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "static/generated/")
)]
pub struct MessageResponse {
    pub message: String,
}

/// List every activity, keyed by name.
async fn list_activities(
    State(state): State<Arc<AppState>>,
) -> Result<Json<BTreeMap<String, Activity>>> {
    Ok(Json(state.directory.list_activities().await?))
}

/// Sign a student up for an activity.
async fn signup(
    State(state): State<Arc<AppState>>,
    Path(activity_name): Path<String>,
    Query(query): Query<EmailQuery>,
) -> Result<Json<MessageResponse>> {
    let message = state
        .directory
        .signup(&activity_name, &query.email)
        .await?;
    Ok(Json(MessageResponse { message }))
}

/// Remove a student from an activity.
async fn unregister(
    State(state): State<Arc<AppState>>,
    Path(activity_name): Path<String>,
    Query(query): Query<EmailQuery>,
) -> Result<Json<MessageResponse>> {
    let message = state
        .directory
        .unregister(&activity_name, &query.email)
        .await?;
    Ok(Json(MessageResponse { message }))
}
