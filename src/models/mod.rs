// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod goal;
pub mod marathon;
pub mod progress;
pub mod stats;

pub use goal::{Goal, GoalStatus};
pub use marathon::{Marathon, MarathonType, Round, Task};
pub use progress::{MarathonProgress, TaskPatch, TaskState};
pub use stats::{MarathonSummary, ProgressSummary, TaskDetail, UserStat};
