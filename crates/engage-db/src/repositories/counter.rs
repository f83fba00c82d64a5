//! PostgreSQL implementation of CounterRepository
//!
//! The counter table is the denormalized snapshot; every adjustment is a
//! single atomic upsert executed inside Postgres, clamped at zero so a
//! decrement that outruns its increment cannot drive a bucket negative.

use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashMap;
use tracing::instrument;

use engage_core::entities::{CounterDelta, ReactionRollup};
use engage_core::traits::{CounterRepository, RepoResult};
use engage_core::value_objects::{ReactionKind, TargetKind, TargetRef};

use crate::models::{CounterModel, ReactorNameModel};

use super::error::map_db_error;

/// Apply a single clamped counter adjustment through any executor.
///
/// Shared between the standalone `adjust` port operation and the
/// reaction repository's transaction, so the compensating writes of a
/// ledger mutation go through the same statement.
pub(crate) async fn apply_delta<'e, E>(
    executor: E,
    target: TargetRef,
    kind: ReactionKind,
    delta: CounterDelta,
) -> RepoResult<()>
where
    E: sqlx::PgExecutor<'e>,
{
    sqlx::query(
        r#"
        INSERT INTO reaction_counters (target_kind, target_id, kind, count)
        VALUES ($1, $2, $3, GREATEST($4, 0))
        ON CONFLICT (target_kind, target_id, kind)
        DO UPDATE SET count = GREATEST(reaction_counters.count + $4, 0)
        "#,
    )
    .bind(target.kind.as_str())
    .bind(target.id)
    .bind(kind.as_str())
    .bind(delta.as_i64())
    .execute(executor)
    .await
    .map_err(map_db_error)?;

    Ok(())
}

/// PostgreSQL implementation of CounterRepository
#[derive(Clone)]
pub struct PgCounterRepository {
    pool: PgPool,
}

impl PgCounterRepository {
    /// Create a new PgCounterRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CounterRepository for PgCounterRepository {
    #[instrument(skip(self))]
    async fn adjust(
        &self,
        target: TargetRef,
        kind: ReactionKind,
        delta: CounterDelta,
    ) -> RepoResult<()> {
        apply_delta(&self.pool, target, kind, delta).await
    }

    #[instrument(skip(self, targets))]
    async fn rollup_for(
        &self,
        targets: &[TargetRef],
        reactor_preview: usize,
    ) -> RepoResult<HashMap<TargetRef, ReactionRollup>> {
        // Every requested target gets an entry, empty targets included,
        // so batched and single reads merge identically.
        let mut result: HashMap<TargetRef, ReactionRollup> = targets
            .iter()
            .map(|target| (*target, ReactionRollup::default()))
            .collect();

        let mut by_kind: HashMap<TargetKind, Vec<i64>> = HashMap::new();
        for target in targets {
            by_kind.entry(target.kind).or_default().push(target.id);
        }

        for (target_kind, ids) in by_kind {
            let counters = sqlx::query_as::<_, CounterModel>(
                r#"
                SELECT target_id, kind, count
                FROM reaction_counters
                WHERE target_kind = $1 AND target_id = ANY($2) AND count > 0
                "#,
            )
            .bind(target_kind.as_str())
            .bind(&ids)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

            for row in counters {
                let kind: ReactionKind = row.kind.parse()?;
                let entry = result
                    .entry(TargetRef::new(target_kind, row.target_id))
                    .or_default();
                entry.counts.set(kind, row.count);
            }

            // Ledger rows are unique per (user, target), so ranking by
            // recency already yields distinct reactors.
            let names = sqlx::query_as::<_, ReactorNameModel>(
                r#"
                SELECT target_id, display_name
                FROM (
                    SELECT r.target_id, p.display_name,
                           ROW_NUMBER() OVER (
                               PARTITION BY r.target_id
                               ORDER BY r.created_at DESC
                           ) AS rank
                    FROM reactions r
                    JOIN profiles p ON p.user_id = r.user_id
                    WHERE r.target_kind = $1 AND r.target_id = ANY($2)
                ) ranked
                WHERE rank <= $3
                ORDER BY target_id, rank
                "#,
            )
            .bind(target_kind.as_str())
            .bind(&ids)
            .bind(reactor_preview as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

            for row in names {
                let entry = result
                    .entry(TargetRef::new(target_kind, row.target_id))
                    .or_default();
                entry.recent_reactors.push(row.display_name);
            }
        }

        Ok(result)
    }
}
