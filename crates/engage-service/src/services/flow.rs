//! Optimistic reaction flow
//!
//! The client-facing reconciliation loop: speculate locally, write to the
//! ledger, then refetch authoritative state on both the success and the
//! failure path. The refetch bounds any drift to "until now".

use tracing::{instrument, warn};

use engage_cache::ReactionView;
use engage_core::value_objects::{ReactionKind, TargetRef, UserId};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::reaction::ReactionService;

/// Optimistic flow binding the cache to the ledger
pub struct ReactionFlow<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionFlow<'a> {
    /// Create a new ReactionFlow
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// The view a caller should render for a target, fetching and
    /// settling it when absent or stale.
    #[instrument(skip(self))]
    pub async fn view(
        &self,
        user_id: UserId,
        target: TargetRef,
    ) -> ServiceResult<ReactionView> {
        let store = self.ctx.optimistic();
        if let Some(view) = store.view(target) {
            if !store.is_stale(target) {
                return Ok(view);
            }
        }
        self.refresh(user_id, target).await
    }

    /// Fetch authoritative state and settle the cache with it
    #[instrument(skip(self))]
    pub async fn refresh(
        &self,
        user_id: UserId,
        target: TargetRef,
    ) -> ServiceResult<ReactionView> {
        let summary = ReactionService::new(self.ctx)
            .summary(user_id, target)
            .await?;
        let view = ReactionView {
            counts: summary.counts,
            my_reaction: summary.my_reaction,
            recent_reactors: summary.recent_reactors,
        };
        self.ctx.optimistic().settle(target, view.clone());
        Ok(view)
    }

    /// A reaction press, end to end.
    ///
    /// Applies the speculative delta so the caller can render
    /// immediately, writes to the ledger, then commits or rolls back the
    /// cache and refetches authoritative counts either way. Returns the
    /// server's resulting reaction.
    ///
    /// A second press on the same target while one is in flight is
    /// rejected with a conflict; callers disable the control while
    /// pending.
    #[instrument(skip(self))]
    pub async fn toggle(
        &self,
        user_id: UserId,
        target: TargetRef,
        kind: ReactionKind,
    ) -> ServiceResult<Option<ReactionKind>> {
        let store = self.ctx.optimistic();

        // First interaction with a never-rendered target: prime from the
        // server so there is a settled view to speculate against.
        if store.view(target).is_none() {
            self.refresh(user_id, target).await?;
        }

        let _predicted = store.begin(target, kind).map_err(ServiceError::from)?;

        let outcome = ReactionService::new(self.ctx)
            .toggle_reaction(user_id, target, kind)
            .await;

        // Cache bookkeeping failures must not mask the write outcome;
        // the refetch below resynchronizes the entry regardless.
        match &outcome {
            Ok(_) => {
                if let Err(cache_err) = store.commit(target) {
                    warn!(target = %target, error = %cache_err, "Commit bookkeeping failed");
                }
            }
            Err(err) => {
                warn!(
                    target = %target,
                    error = %err,
                    "Reaction write failed, rolling back optimistic view"
                );
                if let Err(cache_err) = store.rollback(target) {
                    warn!(target = %target, error = %cache_err, "Rollback bookkeeping failed");
                }
            }
        }

        // Invalidate-and-refetch on both paths. If the refetch itself
        // fails the entry stays stale and the last-known-good view keeps
        // rendering; the next read retries.
        if let Err(refetch_err) = self.refresh(user_id, target).await {
            warn!(
                target = %target,
                error = %refetch_err,
                "Post-mutation refetch failed, view left stale"
            );
        }

        outcome
    }
}
