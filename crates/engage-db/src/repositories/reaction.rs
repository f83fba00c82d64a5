//! PostgreSQL implementation of ReactionRepository
//!
//! `set_reaction` is the one multi-step write in the system: the ledger
//! branch and its compensating counter adjustments commit or roll back
//! together, and the existing row is locked so same-user writes on the
//! same target serialize.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use std::collections::HashMap;
use tracing::instrument;

use engage_core::entities::{Reaction, ReactionChange};
use engage_core::traits::{ReactionRepository, RepoResult};
use engage_core::value_objects::{ReactionKind, TargetKind, TargetRef, UserId};

use crate::models::ReactionModel;

use super::counter::apply_delta;
use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of ReactionRepository
#[derive(Clone)]
pub struct PgReactionRepository {
    pool: PgPool,
}

impl PgReactionRepository {
    /// Create a new PgReactionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReactionRepository for PgReactionRepository {
    #[instrument(skip(self))]
    async fn find(&self, user_id: UserId, target: TargetRef) -> RepoResult<Option<Reaction>> {
        let result = sqlx::query_as::<_, ReactionModel>(
            r#"
            SELECT target_kind, target_id, user_id, kind, created_at
            FROM reactions
            WHERE target_kind = $1 AND target_id = $2 AND user_id = $3
            "#,
        )
        .bind(target.kind.as_str())
        .bind(target.id)
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Reaction::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_target(&self, target: TargetRef) -> RepoResult<Vec<Reaction>> {
        let results = sqlx::query_as::<_, ReactionModel>(
            r#"
            SELECT target_kind, target_id, user_id, kind, created_at
            FROM reactions
            WHERE target_kind = $1 AND target_id = $2
            ORDER BY created_at DESC
            "#,
        )
        .bind(target.kind.as_str())
        .bind(target.id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(Reaction::try_from).collect()
    }

    #[instrument(skip(self, targets))]
    async fn find_for_targets(
        &self,
        user_id: UserId,
        targets: &[TargetRef],
    ) -> RepoResult<HashMap<TargetRef, ReactionKind>> {
        let mut by_kind: HashMap<TargetKind, Vec<i64>> = HashMap::new();
        for target in targets {
            by_kind.entry(target.kind).or_default().push(target.id);
        }

        let mut result = HashMap::new();
        for (target_kind, ids) in by_kind {
            let rows = sqlx::query_as::<_, (i64, String)>(
                r#"
                SELECT target_id, kind
                FROM reactions
                WHERE user_id = $1 AND target_kind = $2 AND target_id = ANY($3)
                "#,
            )
            .bind(user_id.into_inner())
            .bind(target_kind.as_str())
            .bind(&ids)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

            for (target_id, kind) in rows {
                let kind: ReactionKind = kind.parse()?;
                result.insert(TargetRef::new(target_kind, target_id), kind);
            }
        }

        Ok(result)
    }

    #[instrument(skip(self))]
    async fn set_reaction(
        &self,
        user_id: UserId,
        target: TargetRef,
        kind: ReactionKind,
    ) -> RepoResult<ReactionChange> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Lock the existing row (if any) so a second set_reaction from
        // the same user on the same target waits here instead of
        // branching on stale state.
        let existing: Option<String> = sqlx::query_scalar(
            r#"
            SELECT kind FROM reactions
            WHERE target_kind = $1 AND target_id = $2 AND user_id = $3
            FOR UPDATE
            "#,
        )
        .bind(target.kind.as_str())
        .bind(target.id)
        .bind(user_id.into_inner())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let existing = existing
            .map(|raw| raw.parse::<ReactionKind>())
            .transpose()?;

        let change = match existing {
            None => {
                sqlx::query(
                    r#"
                    INSERT INTO reactions (target_kind, target_id, user_id, kind, created_at)
                    VALUES ($1, $2, $3, $4, $5)
                    "#,
                )
                .bind(target.kind.as_str())
                .bind(target.id)
                .bind(user_id.into_inner())
                .bind(kind.as_str())
                .bind(Utc::now())
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    map_unique_violation(e, || engage_core::DomainError::ReactionAlreadyExists {
                        target,
                    })
                })?;

                ReactionChange::fresh(kind)
            }
            Some(current) if current == kind => {
                sqlx::query(
                    r#"
                    DELETE FROM reactions
                    WHERE target_kind = $1 AND target_id = $2 AND user_id = $3
                    "#,
                )
                .bind(target.kind.as_str())
                .bind(target.id)
                .bind(user_id.into_inner())
                .execute(&mut *tx)
                .await
                .map_err(map_db_error)?;

                ReactionChange::toggled_off(current)
            }
            Some(current) => {
                sqlx::query(
                    r#"
                    UPDATE reactions SET kind = $4
                    WHERE target_kind = $1 AND target_id = $2 AND user_id = $3
                    "#,
                )
                .bind(target.kind.as_str())
                .bind(target.id)
                .bind(user_id.into_inner())
                .bind(kind.as_str())
                .execute(&mut *tx)
                .await
                .map_err(map_db_error)?;

                ReactionChange::switched(current, kind)
            }
        };

        // Compensating snapshot writes ride the same transaction; a
        // failure here rolls the ledger branch back too.
        for (bucket, delta) in change.counter_deltas() {
            apply_delta(&mut *tx, target, bucket, delta).await?;
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(change)
    }
}
