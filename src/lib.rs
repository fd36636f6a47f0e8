// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Missão de Natal: seasonal goals and group marathon challenges
//!
//! This crate provides the backend API for marathon templates, each
//! participant's private progress in them, and the points ranking.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::FirestoreDb;
use services::{ProgressService, RankingService};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub progress_service: ProgressService,
    pub ranking_service: RankingService,
}

impl AppState {
    /// Wire services around an already connected database.
    pub fn new(config: Config, db: FirestoreDb) -> Self {
        Self {
            progress_service: ProgressService::new(db.clone()),
            ranking_service: RankingService::new(db.clone()),
            config,
            db,
        }
    }
}
