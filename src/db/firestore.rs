// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Marathons (shared challenge templates)
//! - Marathon progress (per-user overlays, one document per user/marathon)
//! - Goals (read for the ranking)

use crate::db::collections;
use crate::error::AppError;
use crate::models::{Goal, Marathon, MarathonProgress};
use firestore::errors::FirestoreError;

// Firestore limits batch/transaction writes to 500 operations.
// We use a safe limit of 400 to allow headroom.
const BATCH_SIZE: usize = 400;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    // ─── Marathon Operations ─────────────────────────────────────

    pub async fn get_marathon(&self, marathon_id: &str) -> Result<Option<Marathon>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::MARATHONS)
            .obj()
            .one(marathon_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// All marathons, newest first.
    pub async fn list_marathons(&self) -> Result<Vec<Marathon>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::MARATHONS)
            .order_by([("created_at", firestore::FirestoreQueryDirection::Descending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create or replace a marathon template.
    pub async fn set_marathon(&self, marathon: &Marathon) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::MARATHONS)
            .document_id(&marathon.id)
            .object(marathon)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Delete a template. Progress overlays that reference it are kept.
    pub async fn delete_marathon(&self, marathon_id: &str) -> Result<(), AppError> {
        self.get_client()?
            .fluent()
            .delete()
            .from(collections::MARATHONS)
            .document_id(marathon_id)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Progress Operations ─────────────────────────────────────

    /// Get the progress record for a (user, marathon) pair, if persisted.
    pub async fn get_progress(
        &self,
        user_id: &str,
        marathon_id: &str,
    ) -> Result<Option<MarathonProgress>, AppError> {
        let doc_id = MarathonProgress::doc_id(user_id, marathon_id);

        let record: Option<MarathonProgress> = self
            .get_client()?
            .fluent()
            .select()
            .by_id_in(collections::MARATHON_PROGRESS)
            .obj()
            .one(&doc_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(record.map(|mut p| {
            p.id.get_or_insert(doc_id);
            p
        }))
    }

    /// Atomically find or create the progress record for a pair.
    ///
    /// The record lives at a deterministic document ID and is created with a
    /// create-only write, so concurrent callers can never produce two
    /// records. The loser of a creation race reads the winner's record.
    ///
    /// Returns the record and whether this call created it.
    pub async fn find_or_create_progress(
        &self,
        user_id: &str,
        user_name: &str,
        marathon_id: &str,
    ) -> Result<(MarathonProgress, bool), AppError> {
        if let Some(existing) = self.get_progress(user_id, marathon_id).await? {
            return Ok((existing, false));
        }

        let fresh = MarathonProgress {
            user_name: user_name.to_string(),
            ..MarathonProgress::new(user_id, marathon_id)
        };
        let doc_id = MarathonProgress::doc_id(user_id, marathon_id);

        let inserted: Result<MarathonProgress, FirestoreError> = self
            .get_client()?
            .fluent()
            .insert()
            .into(collections::MARATHON_PROGRESS)
            .document_id(&doc_id)
            .object(&fresh)
            .execute()
            .await;

        match inserted {
            Ok(_) => Ok((fresh, true)),
            Err(FirestoreError::DataConflictError(_)) => {
                tracing::debug!(
                    user_id,
                    marathon_id,
                    "Progress record created concurrently, reading existing"
                );
                let existing = self.get_progress(user_id, marathon_id).await?.ok_or_else(|| {
                    AppError::Database(format!("Progress record {} vanished after conflict", doc_id))
                })?;
                Ok((existing, false))
            }
            Err(e) => Err(AppError::Database(e.to_string())),
        }
    }

    /// Write the whole progress record (all task entries are replaced).
    pub async fn set_progress(&self, progress: &MarathonProgress) -> Result<(), AppError> {
        let doc_id = MarathonProgress::doc_id(&progress.user_id, &progress.marathon_id);

        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::MARATHON_PROGRESS)
            .document_id(&doc_id)
            .object(progress)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// All progress records owned by a user.
    pub async fn list_progress_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<MarathonProgress>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::MARATHON_PROGRESS)
            .filter(|q| q.for_all([q.field("userId").eq(user_id)]))
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Every progress record of every user.
    pub async fn list_all_progress(&self) -> Result<Vec<MarathonProgress>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::MARATHON_PROGRESS)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    // ─── Goal Operations ─────────────────────────────────────────

    /// Create or replace a goal.
    pub async fn set_goal(&self, goal: &Goal) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::GOALS)
            .document_id(&goal.id)
            .object(goal)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// All goals in creation order (the ranking's tie order depends on it).
    pub async fn list_all_goals(&self) -> Result<Vec<Goal>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::GOALS)
            .order_by([("created_at", firestore::FirestoreQueryDirection::Ascending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    // ─── Helper Methods ────────────────────────────────────────────

    /// Helper to batch delete documents using transactions.
    async fn batch_delete<T, F>(
        &self,
        items: &[T],
        collection: &str,
        id_extractor: F,
    ) -> Result<(), AppError>
    where
        F: Fn(&T) -> String,
    {
        let client = self.get_client()?;

        for chunk in items.chunks(BATCH_SIZE) {
            let mut transaction = client
                .begin_transaction()
                .await
                .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

            for item in chunk {
                let doc_id = id_extractor(item);
                client
                    .fluent()
                    .delete()
                    .from(collection)
                    .document_id(&doc_id)
                    .add_to_transaction(&mut transaction)
                    .map_err(|e| {
                        AppError::Database(format!(
                            "Failed to add deletion to transaction for {}: {}",
                            collection, e
                        ))
                    })?;
            }

            transaction.commit().await.map_err(|e| {
                AppError::Database(format!("Failed to commit batch deletion: {}", e))
            })?;
        }

        Ok(())
    }

    // ─── Bulk Reset ──────────────────────────────────────────────

    /// Delete every progress record, goal and authored marathon of a user.
    ///
    /// Returns the number of documents deleted.
    pub async fn reset_user_data(&self, user_id: &str) -> Result<usize, AppError> {
        let mut deleted_count = 0;

        // 1. Progress overlays
        let progress = self.list_progress_for_user(user_id).await?;
        self.batch_delete(
            &progress,
            collections::MARATHON_PROGRESS,
            |p: &MarathonProgress| MarathonProgress::doc_id(&p.user_id, &p.marathon_id),
        )
        .await?;
        deleted_count += progress.len();
        tracing::debug!(user_id, count = progress.len(), "Deleted progress records");

        // 2. Goals
        let goals: Vec<Goal> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::GOALS)
            .filter(|q| q.for_all([q.field("created_by").eq(user_id)]))
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        self.batch_delete(&goals, collections::GOALS, |g: &Goal| g.id.clone())
            .await?;
        deleted_count += goals.len();
        tracing::debug!(user_id, count = goals.len(), "Deleted goals");

        // 3. Authored marathons
        let marathons: Vec<Marathon> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::MARATHONS)
            .filter(|q| q.for_all([q.field("created_by").eq(user_id)]))
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        self.batch_delete(&marathons, collections::MARATHONS, |m: &Marathon| {
            m.id.clone()
        })
        .await?;
        deleted_count += marathons.len();
        tracing::debug!(user_id, count = marathons.len(), "Deleted marathons");

        tracing::info!(user_id, deleted_count, "User data reset complete");

        Ok(deleted_count)
    }
}
