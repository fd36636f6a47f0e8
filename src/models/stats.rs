// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Progress aggregation: per-marathon completion and the cross-user ranking.
//!
//! Aggregates are computed on read by joining templates with the per-user
//! overlays. Completion state lives only in the overlays.

use serde::Serialize;
use std::collections::HashMap;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::{Goal, GoalStatus, Marathon, MarathonProgress};

/// Points for each completed goal.
pub const POINTS_PER_GOAL: u32 = 10;
/// Points for each completed marathon task.
pub const POINTS_PER_TASK: u32 = 5;

/// Completion of one marathon for one user.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSummary {
    pub completed_count: u32,
    pub total_count: u32,
    pub percentage: f64,
}

impl ProgressSummary {
    /// Walk the template's task ids and look each one up in the overlay.
    ///
    /// Entries for task ids that are no longer in the template are not
    /// counted.
    pub fn compute(marathon: &Marathon, progress: &MarathonProgress) -> Self {
        let total_count = marathon.total_tasks() as u32;
        let completed_count = marathon
            .task_ids()
            .filter(|id| progress.task(id).is_some_and(|t| t.completed))
            .count() as u32;

        let percentage = if total_count == 0 {
            0.0
        } else {
            f64::from(completed_count) / f64::from(total_count) * 100.0
        };

        Self {
            completed_count,
            total_count,
            percentage,
        }
    }
}

/// Per-marathon summary for a user's dashboard.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct MarathonSummary {
    pub marathon_id: String,
    pub marathon_name: String,
    #[serde(flatten)]
    pub summary: ProgressSummary,
}

/// Admin view of a single task in a user's overlay.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TaskDetail {
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

impl TaskDetail {
    /// Passthrough read; `completed: false` with no note or photo when the
    /// record or the entry is missing.
    pub fn lookup(progress: Option<&MarathonProgress>, task_id: &str) -> Self {
        progress
            .and_then(|p| p.task(task_id))
            .map(|t| Self {
                completed: t.completed,
                note: Some(t.note.clone()),
                photo: Some(t.photo.clone()),
            })
            .unwrap_or_default()
    }
}

/// One ranking row.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct UserStat {
    pub user_id: String,
    /// Display name from the first goal or progress record that carries one
    pub name: String,
    pub total_goals: u32,
    pub completed_goals: u32,
    pub marathon_tasks: u32,
    pub completed_marathon_tasks: u32,
    pub total_completed: u32,
    pub points: u32,
}

/// Accumulates rows in first-appearance order.
#[derive(Default)]
struct RankingBuilder {
    index: HashMap<String, usize>,
    rows: Vec<UserStat>,
}

impl RankingBuilder {
    fn row(&mut self, user_id: &str, name: &str) -> &mut UserStat {
        let next = self.rows.len();
        let idx = *self.index.entry(user_id.to_string()).or_insert(next);
        if idx == next {
            self.rows.push(UserStat {
                user_id: user_id.to_string(),
                ..Default::default()
            });
        }

        let row = &mut self.rows[idx];
        if row.name.is_empty() {
            row.name = name.to_string();
        }
        row
    }
}

/// Build the points ranking.
///
/// Goals count for their creator. Marathon tasks count for the subscriber
/// whose overlay marks them completed, joined against the current template.
/// Rows are sorted by points, descending; ties keep first-appearance order
/// (goals first, then progress records).
pub fn compute_rankings(
    goals: &[Goal],
    marathons: &[Marathon],
    progress: &[MarathonProgress],
) -> Vec<UserStat> {
    let templates: HashMap<&str, &Marathon> =
        marathons.iter().map(|m| (m.id.as_str(), m)).collect();
    let mut builder = RankingBuilder::default();

    for goal in goals.iter().filter(|g| !g.created_by.is_empty()) {
        let row = builder.row(&goal.created_by, &goal.created_by_name);
        row.total_goals += 1;
        if goal.status == GoalStatus::Concluido {
            row.completed_goals += 1;
            row.points += POINTS_PER_GOAL;
        }
    }

    for record in progress.iter().filter(|p| !p.user_id.is_empty()) {
        let row = builder.row(&record.user_id, &record.user_name);
        // Orphaned overlays still place the user in the ranking
        if let Some(marathon) = templates.get(record.marathon_id.as_str()) {
            let summary = ProgressSummary::compute(marathon, record);
            row.marathon_tasks += summary.total_count;
            row.completed_marathon_tasks += summary.completed_count;
            row.points += summary.completed_count * POINTS_PER_TASK;
        }
    }

    let mut rows = builder.rows;
    for row in &mut rows {
        row.total_completed = row.completed_goals + row.completed_marathon_tasks;
    }
    rows.sort_by(|a, b| b.points.cmp(&a.points));
    rows
}
