// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Admin-only inspection and reset routes.

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::{MarathonProgress, TaskDetail};
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{delete, get},
    Extension, Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/progress/all", get(get_all_progress))
        .route(
            "/api/admin/progress/{user_id}/{marathon_id}/tasks/{task_id}",
            get(get_task_detail),
        )
        .route("/api/admin/users/{user_id}/data", delete(reset_user_data))
}

async fn get_all_progress(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<MarathonProgress>>> {
    user.require_admin()?;
    Ok(Json(state.progress_service.get_all().await?))
}

/// Note, photo and completion of one participant's task.
async fn get_task_detail(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path((user_id, marathon_id, task_id)): Path<(String, String, String)>,
) -> Result<Json<TaskDetail>> {
    user.require_admin()?;

    tracing::debug!(
        admin_id = %user.user_id,
        user_id = %user_id,
        marathon_id = %marathon_id,
        task_id = %task_id,
        "Inspecting task detail"
    );

    Ok(Json(
        state
            .progress_service
            .lookup_task_detail(&user_id, &marathon_id, &task_id)
            .await?,
    ))
}

#[derive(Serialize)]
pub struct ResetResponse {
    pub deleted: usize,
}

/// Remove all progress records, goals and authored marathons of a user.
async fn reset_user_data(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(user_id): Path<String>,
) -> Result<Json<ResetResponse>> {
    user.require_admin()?;

    tracing::info!(admin_id = %user.user_id, user_id = %user_id, "Admin-initiated data reset");
    let deleted = state.db.reset_user_data(&user_id).await?;

    Ok(Json(ResetResponse { deleted }))
}
