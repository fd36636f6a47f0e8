// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Personal goal model (read by the ranking).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    #[default]
    NaoIniciado,
    EmProgresso,
    Concluido,
}

/// Goal stored in Firestore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    /// Generated at creation (also used as document ID)
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub status: GoalStatus,
    #[serde(default)]
    pub completed_date: Option<String>,
    /// Owner user ID
    pub created_by: String,
    /// Owner display name at creation time
    #[serde(default)]
    pub created_by_name: String,
    /// Creation timestamp (RFC 3339, UTC)
    pub created_at: String,
}
