//! PostgreSQL implementation of EngagementRepository
//!
//! Uniqueness per (lead, CA) is enforced at write time: the insert is
//! `ON CONFLICT DO NOTHING` followed by a read-back, so a repeat view
//! returns the original engagement untouched.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use engage_core::entities::LeadEngagement;
use engage_core::error::DomainError;
use engage_core::traits::{EngagementRepository, RepoResult};
use engage_core::value_objects::UserId;

use crate::models::LeadEngagementModel;

use super::error::map_db_error;

const ENGAGEMENT_COLUMNS: &str =
    "lead_id, ca_id, viewed_at, is_hidden, hidden_at, notes, updated_at";

/// PostgreSQL implementation of EngagementRepository
#[derive(Clone)]
pub struct PgEngagementRepository {
    pool: PgPool,
}

impl PgEngagementRepository {
    /// Create a new PgEngagementRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EngagementRepository for PgEngagementRepository {
    #[instrument(skip(self))]
    async fn record(
        &self,
        lead_id: i64,
        ca_id: UserId,
        viewed_at: DateTime<Utc>,
    ) -> RepoResult<LeadEngagement> {
        sqlx::query(
            r#"
            INSERT INTO lead_engagements (lead_id, ca_id, viewed_at, is_hidden, updated_at)
            VALUES ($1, $2, $3, FALSE, $3)
            ON CONFLICT (lead_id, ca_id) DO NOTHING
            "#,
        )
        .bind(lead_id)
        .bind(ca_id.into_inner())
        .bind(viewed_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        // Read back whichever row survived: ours, or the earlier view's.
        self.find(lead_id, ca_id).await?.ok_or_else(|| {
            DomainError::DatabaseError("engagement row missing after insert".to_string())
        })
    }

    #[instrument(skip(self))]
    async fn find(&self, lead_id: i64, ca_id: UserId) -> RepoResult<Option<LeadEngagement>> {
        let result = sqlx::query_as::<_, LeadEngagementModel>(&format!(
            "SELECT {ENGAGEMENT_COLUMNS} FROM lead_engagements WHERE lead_id = $1 AND ca_id = $2"
        ))
        .bind(lead_id)
        .bind(ca_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(LeadEngagement::from))
    }

    #[instrument(skip(self))]
    async fn count_distinct_viewers(&self, lead_id: i64) -> RepoResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(DISTINCT ca_id) FROM lead_engagements WHERE lead_id = $1
            "#,
        )
        .bind(lead_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(count)
    }

    #[instrument(skip(self))]
    async fn find_by_ca(&self, ca_id: UserId) -> RepoResult<Vec<LeadEngagement>> {
        let results = sqlx::query_as::<_, LeadEngagementModel>(&format!(
            "SELECT {ENGAGEMENT_COLUMNS} FROM lead_engagements \
             WHERE ca_id = $1 ORDER BY viewed_at DESC"
        ))
        .bind(ca_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(LeadEngagement::from).collect())
    }

    #[instrument(skip(self))]
    async fn set_hidden(
        &self,
        lead_id: i64,
        ca_id: UserId,
        hidden: bool,
    ) -> RepoResult<LeadEngagement> {
        let result = sqlx::query_as::<_, LeadEngagementModel>(&format!(
            "UPDATE lead_engagements \
             SET is_hidden = $3, \
                 hidden_at = CASE WHEN $3 THEN NOW() ELSE NULL END, \
                 updated_at = NOW() \
             WHERE lead_id = $1 AND ca_id = $2 \
             RETURNING {ENGAGEMENT_COLUMNS}"
        ))
        .bind(lead_id)
        .bind(ca_id.into_inner())
        .bind(hidden)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result
            .map(LeadEngagement::from)
            .ok_or(DomainError::EngagementNotFound { lead_id, ca_id })
    }

    #[instrument(skip(self, notes))]
    async fn update_notes(
        &self,
        lead_id: i64,
        ca_id: UserId,
        notes: Option<String>,
    ) -> RepoResult<LeadEngagement> {
        let result = sqlx::query_as::<_, LeadEngagementModel>(&format!(
            "UPDATE lead_engagements \
             SET notes = $3, updated_at = NOW() \
             WHERE lead_id = $1 AND ca_id = $2 \
             RETURNING {ENGAGEMENT_COLUMNS}"
        ))
        .bind(lead_id)
        .bind(ca_id.into_inner())
        .bind(notes)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result
            .map(LeadEngagement::from)
            .ok_or(DomainError::EngagementNotFound { lead_id, ca_id })
    }
}
