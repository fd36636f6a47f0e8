// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for authenticated users.

use crate::error::Result;
use crate::middleware::auth::{AuthUser, Role};
use crate::models::{MarathonProgress, MarathonSummary, UserStat};
use crate::AppState;
use axum::{extract::State, routing::get, Extension, Json, Router};
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// API routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(get_me))
        .route("/api/my-progress", get(get_my_progress))
        .route("/api/my-summaries", get(get_my_summaries))
        .route("/api/ranking", get(get_ranking))
}

// ─── User Profile ────────────────────────────────────────────

/// Current user response (taken from the session token).
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub role: Role,
}

async fn get_me(Extension(user): Extension<AuthUser>) -> Json<UserResponse> {
    Json(UserResponse {
        id: user.user_id,
        name: user.name,
        role: user.role,
    })
}

// ─── Progress ────────────────────────────────────────────────

/// Every marathon the caller joined, as raw progress records.
async fn get_my_progress(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<MarathonProgress>>> {
    Ok(Json(
        state.progress_service.get_for_user(&user.user_id).await?,
    ))
}

/// Completion summary for every marathon the caller joined.
async fn get_my_summaries(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<MarathonSummary>>> {
    Ok(Json(
        state
            .ranking_service
            .summaries_for_user(&user.user_id)
            .await?,
    ))
}

// ─── Ranking ─────────────────────────────────────────────────

async fn get_ranking(State(state): State<Arc<AppState>>) -> Result<Json<Vec<UserStat>>> {
    Ok(Json(state.ranking_service.rankings().await?))
}
