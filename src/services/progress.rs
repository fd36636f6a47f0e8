// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Subscription registry and task state merger.
//!
//! Handles the per-user overlay workflow:
//! 1. Find or create the (user, marathon) progress record
//! 2. Upsert one task entry with presence-based patch semantics
//! 3. Persist the whole record
//!
//! Marathon and task ids are never validated against the templates.

use crate::db::FirestoreDb;
use crate::error::Result;
use crate::models::{MarathonProgress, TaskDetail, TaskPatch};

#[derive(Clone)]
pub struct ProgressService {
    db: FirestoreDb,
}

impl ProgressService {
    pub fn new(db: FirestoreDb) -> Self {
        Self { db }
    }

    /// Join a marathon. Idempotent: an existing record is returned unchanged.
    pub async fn subscribe(
        &self,
        user_id: &str,
        user_name: &str,
        marathon_id: &str,
    ) -> Result<MarathonProgress> {
        let (progress, created) = self
            .db
            .find_or_create_progress(user_id, user_name, marathon_id)
            .await?;

        if created {
            tracing::info!(user_id, marathon_id, "User subscribed to marathon");
        } else {
            tracing::debug!(user_id, marathon_id, "Already subscribed");
        }

        Ok(progress)
    }

    /// The user's record, or an unsaved empty default when none exists.
    pub async fn get_one(&self, user_id: &str, marathon_id: &str) -> Result<MarathonProgress> {
        Ok(self
            .db
            .get_progress(user_id, marathon_id)
            .await?
            .unwrap_or_else(|| MarathonProgress::transient(user_id, marathon_id)))
    }

    pub async fn get_for_user(&self, user_id: &str) -> Result<Vec<MarathonProgress>> {
        self.db.list_progress_for_user(user_id).await
    }

    pub async fn get_all(&self) -> Result<Vec<MarathonProgress>> {
        self.db.list_all_progress().await
    }

    /// Apply a partial task update and return the full updated record.
    ///
    /// A task update alone is enough to create the subscription. Concurrent
    /// updates to the same record are last-writer-wins.
    pub async fn apply_task_update(
        &self,
        user_id: &str,
        user_name: &str,
        marathon_id: &str,
        task_id: &str,
        patch: &TaskPatch,
    ) -> Result<MarathonProgress> {
        let (mut progress, _) = self
            .db
            .find_or_create_progress(user_id, user_name, marathon_id)
            .await?;

        progress.user_name = user_name.to_string();
        progress.apply_task_update(task_id, patch);
        self.db.set_progress(&progress).await?;

        tracing::info!(
            user_id,
            marathon_id,
            task_id,
            completed = ?patch.completed,
            note_set = patch.note.is_some(),
            photo_set = patch.photo.is_some(),
            "Task state updated"
        );

        Ok(progress)
    }

    /// Read one task of one user's overlay (admin inspection).
    pub async fn lookup_task_detail(
        &self,
        user_id: &str,
        marathon_id: &str,
        task_id: &str,
    ) -> Result<TaskDetail> {
        let progress = self.db.get_progress(user_id, marathon_id).await?;
        Ok(TaskDetail::lookup(progress.as_ref(), task_id))
    }
}
