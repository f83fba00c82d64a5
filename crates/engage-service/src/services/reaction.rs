//! Reaction service
//!
//! Server-side reaction semantics: the three-way toggle against the
//! ledger and the summary reads callers render from.

use std::collections::HashMap;

use tracing::{info, instrument};

use engage_core::value_objects::{ReactionKind, TargetRef, UserId};

use crate::dto::{ReactionSummaryResponse, ReactorResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Reaction service
pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    /// Create a new ReactionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Apply a reaction press against the ledger.
    ///
    /// Returns the resulting reaction: `Some(kind)` after a fresh
    /// reaction or a kind change, `None` after a toggle-off. Counter
    /// compensation happens inside the ledger write; any persistence
    /// error surfaces to the caller with no implicit retry.
    #[instrument(skip(self))]
    pub async fn toggle_reaction(
        &self,
        user_id: UserId,
        target: TargetRef,
        kind: ReactionKind,
    ) -> ServiceResult<Option<ReactionKind>> {
        let change = self
            .ctx
            .reaction_repo()
            .set_reaction(user_id, target, kind)
            .await?;

        let branch = if change.is_toggle_off() {
            "toggle_off"
        } else if change.is_switch() {
            "switch"
        } else {
            "fresh"
        };
        info!(
            user_id = %user_id,
            target = %target,
            kind = %kind,
            branch,
            "Reaction applied"
        );

        Ok(change.current)
    }

    /// All reactions on a target, newest first ("who reacted")
    #[instrument(skip(self))]
    pub async fn reactions_for(&self, target: TargetRef) -> ServiceResult<Vec<ReactorResponse>> {
        let reactions = self.ctx.reaction_repo().find_by_target(target).await?;
        Ok(reactions.iter().map(ReactorResponse::from).collect())
    }

    /// One user's current reaction to one target
    #[instrument(skip(self))]
    pub async fn my_reaction(
        &self,
        user_id: UserId,
        target: TargetRef,
    ) -> ServiceResult<Option<ReactionKind>> {
        let reaction = self.ctx.reaction_repo().find(user_id, target).await?;
        Ok(reaction.map(|r| r.kind))
    }

    /// Summary for one target: counts, my reaction, reactor preview
    #[instrument(skip(self))]
    pub async fn summary(
        &self,
        user_id: UserId,
        target: TargetRef,
    ) -> ServiceResult<ReactionSummaryResponse> {
        let mut summaries = self.summaries(user_id, &[target]).await?;
        summaries
            .remove(&target)
            .ok_or_else(|| super::error::ServiceError::internal("summary missing for target"))
    }

    /// Summaries for a feed of targets in two gateway round trips
    /// (one batched rollup, one batched ledger lookup) - never N+1.
    #[instrument(skip(self, targets))]
    pub async fn summaries(
        &self,
        user_id: UserId,
        targets: &[TargetRef],
    ) -> ServiceResult<HashMap<TargetRef, ReactionSummaryResponse>> {
        let preview = self.ctx.settings().reactor_preview;
        let rollups = self.ctx.counter_repo().rollup_for(targets, preview).await?;
        let mut mine = self
            .ctx
            .reaction_repo()
            .find_for_targets(user_id, targets)
            .await?;

        let mut result = HashMap::with_capacity(targets.len());
        for target in targets {
            let rollup = rollups.get(target).cloned().unwrap_or_default();
            let my_reaction = mine.remove(target);
            result.insert(
                *target,
                ReactionSummaryResponse::from_parts(*target, rollup, my_reaction),
            );
        }
        Ok(result)
    }
}
