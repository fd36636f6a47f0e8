// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod progress;
pub mod ranking;

pub use progress::ProgressService;
pub use ranking::RankingService;
