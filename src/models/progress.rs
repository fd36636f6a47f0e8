// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-user marathon progress (sparse overlay over a template).
//!
//! A progress record only holds entries for tasks the user has touched.
//! Task ids are looked up flat within one marathon; they are never checked
//! against the template.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// State of one touched task.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct TaskState {
    pub task_id: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub note: String,
    /// Empty, or a self-contained image payload (e.g. a data URL)
    #[serde(default)]
    pub photo: String,
}

/// Partial update for one task. `Some` means the caller supplied the field,
/// even when the value is `false` or empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    pub completed: Option<bool>,
    pub note: Option<String>,
    pub photo: Option<String>,
}

/// A user's progress in one marathon.
///
/// Stored in `marathon_progress`, keyed by [`MarathonProgress::doc_id`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct MarathonProgress {
    /// Document ID. `None` for the unsaved default returned to readers
    /// who never subscribed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub user_id: String,
    /// Display name of the owner, refreshed on every task update
    #[serde(default)]
    pub user_name: String,
    pub marathon_id: String,
    #[serde(default)]
    pub tasks: Vec<TaskState>,
}

impl MarathonProgress {
    /// Unsaved, empty record. Observably identical to a subscription with
    /// no touched tasks.
    pub fn transient(user_id: &str, marathon_id: &str) -> Self {
        Self {
            id: None,
            user_id: user_id.to_string(),
            user_name: String::new(),
            marathon_id: marathon_id.to_string(),
            tasks: Vec::new(),
        }
    }

    /// Fresh record ready to be persisted at its deterministic document ID.
    pub fn new(user_id: &str, marathon_id: &str) -> Self {
        Self {
            id: Some(Self::doc_id(user_id, marathon_id)),
            ..Self::transient(user_id, marathon_id)
        }
    }

    /// Document ID for a (user, marathon) pair.
    ///
    /// Both parts are percent-encoded so the `:` separator is unambiguous,
    /// which makes the pair a unique key at the storage layer.
    pub fn doc_id(user_id: &str, marathon_id: &str) -> String {
        format!(
            "{}:{}",
            urlencoding::encode(user_id),
            urlencoding::encode(marathon_id)
        )
    }

    pub fn task(&self, task_id: &str) -> Option<&TaskState> {
        self.tasks.iter().find(|t| t.task_id == task_id)
    }

    /// Upsert one task by id.
    ///
    /// Existing entry: only fields present in the patch are overwritten.
    /// New entry: absent fields take their defaults.
    pub fn apply_task_update(&mut self, task_id: &str, patch: &TaskPatch) {
        if let Some(existing) = self.tasks.iter_mut().find(|t| t.task_id == task_id) {
            if let Some(completed) = patch.completed {
                existing.completed = completed;
            }
            if let Some(note) = &patch.note {
                existing.note = note.clone();
            }
            if let Some(photo) = &patch.photo {
                existing.photo = photo.clone();
            }
        } else {
            self.tasks.push(TaskState {
                task_id: task_id.to_string(),
                completed: patch.completed.unwrap_or(false),
                note: patch.note.clone().unwrap_or_default(),
                photo: patch.photo.clone().unwrap_or_default(),
            });
        }
    }
}
