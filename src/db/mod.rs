// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer (Firestore).

pub mod firestore;

pub use firestore::FirestoreDb;

/// Collection names as constants.
pub mod collections {
    /// Marathon templates (keyed by generated marathon id)
    pub const MARATHONS: &str = "marathons";
    /// Per-user progress overlays (keyed by `userId:marathonId`)
    pub const MARATHON_PROGRESS: &str = "marathon_progress";
    pub const GOALS: &str = "goals";
}
