// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Marathon templates and the caller's progress in them.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{
    Marathon, MarathonProgress, MarathonType, ProgressSummary, Round, Task, TaskPatch,
};
use crate::time_utils::now_rfc3339;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/marathons", get(list_marathons).post(create_marathon))
        .route(
            "/api/marathons/{id}",
            get(get_marathon).delete(delete_marathon),
        )
        .route("/api/marathons/{id}/progress", get(get_progress))
        .route("/api/marathons/{id}/summary", get(get_summary))
        .route("/api/marathons/{id}/subscribe", post(subscribe))
        .route("/api/marathons/{id}/task", post(update_task))
}

// ─── Templates ───────────────────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
pub struct TaskInput {
    #[validate(length(min = 1, max = 100))]
    pub id: String,
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub text: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RoundInput {
    #[validate(length(min = 1, max = 100))]
    pub id: String,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub title: String,
    #[serde(default)]
    #[validate(nested)]
    pub tasks: Vec<TaskInput>,
}

/// New marathon template. Round and task ids are chosen by the author.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateMarathonRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 5000))]
    pub description: String,
    #[serde(rename = "type", default)]
    pub marathon_type: MarathonType,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    #[validate(nested)]
    pub rounds: Vec<RoundInput>,
}

impl CreateMarathonRequest {
    fn into_marathon(self, author: &AuthUser, created_at: String) -> Marathon {
        Marathon {
            id: uuid::Uuid::new_v4().to_string(),
            name: self.name,
            description: self.description,
            marathon_type: self.marathon_type,
            start_date: self.start_date,
            end_date: self.end_date,
            rounds: self
                .rounds
                .into_iter()
                .map(|r| Round {
                    id: r.id,
                    title: r.title,
                    tasks: r
                        .tasks
                        .into_iter()
                        .map(|t| Task {
                            id: t.id,
                            text: t.text,
                        })
                        .collect(),
                })
                .collect(),
            created_by: author.user_id.clone(),
            created_by_name: author.name.clone(),
            created_at,
        }
    }
}

#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

async fn list_marathons(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Marathon>>> {
    Ok(Json(state.db.list_marathons().await?))
}

async fn create_marathon(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    payload: std::result::Result<Json<CreateMarathonRequest>, JsonRejection>,
) -> Result<Json<Marathon>> {
    let Json(request) = payload?;
    request.validate()?;

    let marathon = request.into_marathon(&user, now_rfc3339());
    state.db.set_marathon(&marathon).await?;

    tracing::info!(
        user_id = %user.user_id,
        marathon_id = %marathon.id,
        rounds = marathon.rounds.len(),
        tasks = marathon.total_tasks(),
        "Marathon created"
    );

    Ok(Json(marathon))
}

/// A missing template is "nothing to show" (`null`), not an error.
async fn get_marathon(
    State(state): State<Arc<AppState>>,
    Path(marathon_id): Path<String>,
) -> Result<Json<Option<Marathon>>> {
    Ok(Json(state.db.get_marathon(&marathon_id).await?))
}

/// Delete a template (author or admin). Progress records are left in place.
async fn delete_marathon(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(marathon_id): Path<String>,
) -> Result<Json<SuccessResponse>> {
    let Some(marathon) = state.db.get_marathon(&marathon_id).await? else {
        return Ok(Json(SuccessResponse { success: true }));
    };

    if marathon.created_by != user.user_id && !user.is_admin() {
        return Err(AppError::Forbidden(
            "Only the author or an admin can delete a marathon".to_string(),
        ));
    }

    state.db.delete_marathon(&marathon_id).await?;
    tracing::info!(user_id = %user.user_id, marathon_id = %marathon_id, "Marathon deleted");

    Ok(Json(SuccessResponse { success: true }))
}

// ─── Progress ────────────────────────────────────────────────

async fn get_progress(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(marathon_id): Path<String>,
) -> Result<Json<MarathonProgress>> {
    Ok(Json(
        state
            .progress_service
            .get_one(&user.user_id, &marathon_id)
            .await?,
    ))
}

async fn get_summary(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(marathon_id): Path<String>,
) -> Result<Json<Option<ProgressSummary>>> {
    Ok(Json(
        state
            .ranking_service
            .marathon_summary(&user.user_id, &marathon_id)
            .await?,
    ))
}

async fn subscribe(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(marathon_id): Path<String>,
) -> Result<Json<MarathonProgress>> {
    Ok(Json(
        state
            .progress_service
            .subscribe(&user.user_id, &user.name, &marathon_id)
            .await?,
    ))
}

/// Task update body. Fields that are present overwrite, even when `false`
/// or empty; absent (or `null`) fields are left alone.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdateRequest {
    #[serde(default)]
    #[validate(length(max = 200))]
    pub task_id: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
}

impl TaskUpdateRequest {
    /// Split into the target task id and the patch to apply.
    fn into_patch(self) -> Result<(String, TaskPatch)> {
        self.validate()?;

        let task_id = self
            .task_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| AppError::BadRequest("taskId is required".to_string()))?;

        Ok((
            task_id,
            TaskPatch {
                completed: self.completed,
                note: self.note,
                photo: self.photo,
            },
        ))
    }
}

async fn update_task(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(marathon_id): Path<String>,
    payload: std::result::Result<Json<TaskUpdateRequest>, JsonRejection>,
) -> Result<Json<MarathonProgress>> {
    let Json(request) = payload?;
    let (task_id, patch) = request.into_patch()?;

    Ok(Json(
        state
            .progress_service
            .apply_task_update(&user.user_id, &user.name, &marathon_id, &task_id, &patch)
            .await?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::Role;

    fn author() -> AuthUser {
        AuthUser {
            user_id: "u1".to_string(),
            name: "Ana".to_string(),
            role: Role::Participant,
        }
    }

    #[test]
    fn test_create_request_builds_template() {
        let json = r#"{
            "name": "12 Dias",
            "type": "12_dias",
            "rounds": [{"id": "1", "title": "Round 1", "tasks": [{"id": "1-1", "text": "Montar a árvore"}]}]
        }"#;
        let request: CreateMarathonRequest = serde_json::from_str(json).unwrap();
        request.validate().unwrap();

        let marathon = request.into_marathon(&author(), "2025-12-01T00:00:00Z".to_string());

        assert!(!marathon.id.is_empty());
        assert_eq!(marathon.marathon_type, MarathonType::DozeDias);
        assert_eq!(marathon.created_by, "u1");
        assert_eq!(marathon.created_by_name, "Ana");
        assert_eq!(marathon.total_tasks(), 1);
    }

    #[test]
    fn test_create_request_rejects_empty_task_id() {
        let json = r#"{"name": "X", "rounds": [{"id": "1", "tasks": [{"id": ""}]}]}"#;
        let request: CreateMarathonRequest = serde_json::from_str(json).unwrap();

        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_request_allows_duplicate_task_ids() {
        let json = r#"{"name": "X", "rounds": [
            {"id": "1", "tasks": [{"id": "a"}]},
            {"id": "2", "tasks": [{"id": "a"}]}
        ]}"#;
        let request: CreateMarathonRequest = serde_json::from_str(json).unwrap();

        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_task_update_presence() {
        let request: TaskUpdateRequest =
            serde_json::from_str(r#"{"taskId": "A", "completed": false, "photo": ""}"#).unwrap();

        let (task_id, patch) = request.into_patch().unwrap();
        assert_eq!(task_id, "A");
        assert_eq!(patch.completed, Some(false));
        assert_eq!(patch.photo.as_deref(), Some(""));
        assert_eq!(patch.note, None);
    }

    #[test]
    fn test_task_update_null_fields_are_absent() {
        let request: TaskUpdateRequest =
            serde_json::from_str(r#"{"taskId": "A", "completed": null, "note": null}"#).unwrap();

        let (_, patch) = request.into_patch().unwrap();
        assert_eq!(patch, TaskPatch::default());
    }

    #[test]
    fn test_task_update_requires_task_id() {
        for body in [
            r#"{"completed": true}"#,
            r#"{"taskId": null, "completed": true}"#,
            r#"{"taskId": ""}"#,
        ] {
            let request: TaskUpdateRequest = serde_json::from_str(body).unwrap();
            assert!(
                matches!(request.into_patch(), Err(AppError::BadRequest(_))),
                "{} should be rejected",
                body
            );
        }
    }
}
