// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Marathon challenge templates.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Themed category of a marathon. Informational only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum MarathonType {
    #[serde(rename = "filmes_natal")]
    FilmesNatal,
    #[serde(rename = "literaria")]
    Literaria,
    #[serde(rename = "12_dias")]
    DozeDias,
    #[default]
    #[serde(rename = "personalizada")]
    Personalizada,
}

/// A single checklist item. The id is author-assigned and only unique
/// within its marathon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Task {
    pub id: String,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Round {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

/// Shared challenge template stored in Firestore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Marathon {
    /// Generated at creation (also used as document ID)
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub marathon_type: MarathonType,
    /// Calendar date the challenge opens (informational)
    #[serde(default)]
    pub start_date: Option<String>,
    /// Calendar date the challenge closes (informational)
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub rounds: Vec<Round>,
    /// Author user ID
    pub created_by: String,
    /// Author display name at creation time
    #[serde(default)]
    pub created_by_name: String,
    /// Creation timestamp (RFC 3339, UTC)
    pub created_at: String,
}

impl Marathon {
    /// Number of tasks across all rounds.
    pub fn total_tasks(&self) -> usize {
        self.rounds.iter().map(|r| r.tasks.len()).sum()
    }

    /// Task ids in template order (rounds first, then tasks).
    pub fn task_ids(&self) -> impl Iterator<Item = &str> {
        self.rounds
            .iter()
            .flat_map(|r| r.tasks.iter().map(|t| t.id.as_str()))
    }
}
