//! Engagement service
//!
//! Records "CA viewed lead" events and maintains the CA-private
//! engagement state (hide flag, notes). View recording is best-effort
//! telemetry: a failure never gates the CA's access to the lead, so it
//! is logged and surfaced as non-fatal.

use chrono::Utc;
use tracing::{info, instrument, warn};

use engage_core::entities::LeadEngagement;
use engage_core::error::DomainError;
use engage_core::value_objects::UserId;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Engagement service
pub struct EngagementService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> EngagementService<'a> {
    /// Create a new EngagementService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Record that a CA viewed a lead.
    ///
    /// Idempotent per (lead, CA): a repeat view returns the original
    /// engagement and leaves the distinct-viewer count unchanged.
    #[instrument(skip(self))]
    pub async fn record_lead_view(
        &self,
        lead_id: i64,
        ca_id: UserId,
    ) -> ServiceResult<LeadEngagement> {
        match self
            .ctx
            .engagement_repo()
            .record(lead_id, ca_id, Utc::now())
            .await
        {
            Ok(engagement) => {
                info!(lead_id, ca_id = %ca_id, "Lead view recorded");
                Ok(engagement)
            }
            Err(err) => {
                // Non-fatal telemetry: callers show the lead regardless
                warn!(lead_id, ca_id = %ca_id, error = %err, "Lead view recording failed");
                Err(err.into())
            }
        }
    }

    /// Number of distinct CAs that viewed a lead ("N CAs viewed").
    /// Display only; never used for access control.
    #[instrument(skip(self))]
    pub async fn distinct_viewers(&self, lead_id: i64) -> ServiceResult<i64> {
        Ok(self
            .ctx
            .engagement_repo()
            .count_distinct_viewers(lead_id)
            .await?)
    }

    /// One CA's engagement with one lead, if any
    #[instrument(skip(self))]
    pub async fn engagement(
        &self,
        lead_id: i64,
        ca_id: UserId,
    ) -> ServiceResult<Option<LeadEngagement>> {
        Ok(self.ctx.engagement_repo().find(lead_id, ca_id).await?)
    }

    /// A CA's engagement list for the dashboard, newest view first.
    /// Hidden entries are filtered out unless requested.
    #[instrument(skip(self))]
    pub async fn engagements_for_ca(
        &self,
        ca_id: UserId,
        include_hidden: bool,
    ) -> ServiceResult<Vec<LeadEngagement>> {
        let engagements = self.ctx.engagement_repo().find_by_ca(ca_id).await?;
        if include_hidden {
            return Ok(engagements);
        }
        Ok(engagements.into_iter().filter(|e| !e.is_hidden).collect())
    }

    /// Hide a lead from the CA's working list
    #[instrument(skip(self))]
    pub async fn hide_lead(&self, lead_id: i64, ca_id: UserId) -> ServiceResult<LeadEngagement> {
        let engagement = self
            .ctx
            .engagement_repo()
            .set_hidden(lead_id, ca_id, true)
            .await?;
        info!(lead_id, ca_id = %ca_id, "Lead hidden");
        Ok(engagement)
    }

    /// Bring a hidden lead back
    #[instrument(skip(self))]
    pub async fn unhide_lead(&self, lead_id: i64, ca_id: UserId) -> ServiceResult<LeadEngagement> {
        let engagement = self
            .ctx
            .engagement_repo()
            .set_hidden(lead_id, ca_id, false)
            .await?;
        info!(lead_id, ca_id = %ca_id, "Lead unhidden");
        Ok(engagement)
    }

    /// Replace the CA-private notes on an engagement (None clears)
    #[instrument(skip(self, notes))]
    pub async fn update_notes(
        &self,
        lead_id: i64,
        ca_id: UserId,
        notes: Option<String>,
    ) -> ServiceResult<LeadEngagement> {
        let max = self.ctx.settings().notes_max_chars;
        if let Some(ref text) = notes {
            if text.chars().count() > max {
                return Err(DomainError::NotesTooLong { max }.into());
            }
        }

        Ok(self
            .ctx
            .engagement_repo()
            .update_notes(lead_id, ca_id, notes)
            .await?)
    }
}
