// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Progress aggregation over stored templates and overlays.

use crate::db::FirestoreDb;
use crate::error::Result;
use crate::models::stats::compute_rankings;
use crate::models::{MarathonProgress, MarathonSummary, ProgressSummary, UserStat};
use std::collections::HashMap;

#[derive(Clone)]
pub struct RankingService {
    db: FirestoreDb,
}

impl RankingService {
    pub fn new(db: FirestoreDb) -> Self {
        Self { db }
    }

    /// Completion of one marathon for one user.
    ///
    /// `None` when the template does not exist.
    pub async fn marathon_summary(
        &self,
        user_id: &str,
        marathon_id: &str,
    ) -> Result<Option<ProgressSummary>> {
        let (marathon, progress) = tokio::try_join!(
            self.db.get_marathon(marathon_id),
            self.db.get_progress(user_id, marathon_id),
        )?;

        Ok(marathon.map(|m| {
            let progress =
                progress.unwrap_or_else(|| MarathonProgress::transient(user_id, marathon_id));
            ProgressSummary::compute(&m, &progress)
        }))
    }

    /// Summaries for every marathon the user joined. Records whose template
    /// was deleted are skipped.
    pub async fn summaries_for_user(&self, user_id: &str) -> Result<Vec<MarathonSummary>> {
        let (marathons, records) = tokio::try_join!(
            self.db.list_marathons(),
            self.db.list_progress_for_user(user_id),
        )?;

        let templates: HashMap<&str, _> = marathons.iter().map(|m| (m.id.as_str(), m)).collect();

        Ok(records
            .iter()
            .filter_map(|record| {
                let marathon = templates.get(record.marathon_id.as_str())?;
                Some(MarathonSummary {
                    marathon_id: marathon.id.clone(),
                    marathon_name: marathon.name.clone(),
                    summary: ProgressSummary::compute(marathon, record),
                })
            })
            .collect())
    }

    /// Points ranking across all users.
    pub async fn rankings(&self) -> Result<Vec<UserStat>> {
        let (goals, marathons, progress) = tokio::try_join!(
            self.db.list_all_goals(),
            self.db.list_marathons(),
            self.db.list_all_progress(),
        )?;

        let rankings = compute_rankings(&goals, &marathons, &progress);

        tracing::debug!(
            goals = goals.len(),
            marathons = marathons.len(),
            progress_records = progress.len(),
            users = rankings.len(),
            "Rankings computed"
        );

        Ok(rankings)
    }
}
