//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs from the persistence gateway;
//! the infrastructure layer provides the implementation. Every operation
//! takes the acting identity explicitly - there is no ambient session.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

use crate::entities::{
    CounterDelta, LeadEngagement, Reaction, ReactionChange, ReactionRollup,
};
use crate::error::DomainError;
use crate::value_objects::{ReactionKind, TargetRef, UserId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Reaction Ledger
// ============================================================================

/// Authoritative one-row-per-user-per-target reaction store.
#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// Point lookup of one user's current reaction to one target
    async fn find(&self, user_id: UserId, target: TargetRef) -> RepoResult<Option<Reaction>>;

    /// All reactions on a target, newest first.
    ///
    /// Unbounded: every row is returned. Callers that render large
    /// targets accept the cost.
    async fn find_by_target(&self, target: TargetRef) -> RepoResult<Vec<Reaction>>;

    /// One user's reactions across a batch of targets, one round trip
    async fn find_for_targets(
        &self,
        user_id: UserId,
        targets: &[TargetRef],
    ) -> RepoResult<HashMap<TargetRef, ReactionKind>>;

    /// The three-way ledger transition.
    ///
    /// No existing row: insert, result is fresh. Existing row of the same
    /// kind: delete (toggle-off). Existing row of a different kind:
    /// mutate the kind in place. Implementations apply the compensating
    /// counter adjustments atomically with the ledger write.
    async fn set_reaction(
        &self,
        user_id: UserId,
        target: TargetRef,
        kind: ReactionKind,
    ) -> RepoResult<ReactionChange>;
}

// ============================================================================
// Counter Aggregator
// ============================================================================

/// Denormalized per-target, per-kind running counts.
#[async_trait]
pub trait CounterRepository: Send + Sync {
    /// Atomically adjust one bucket by +1 or -1.
    ///
    /// A decrement against an absent or zero snapshot clamps to zero to
    /// tolerate out-of-order arrival.
    async fn adjust(
        &self,
        target: TargetRef,
        kind: ReactionKind,
        delta: CounterDelta,
    ) -> RepoResult<()>;

    /// Batched read of counts plus reactor-name previews for a list of
    /// targets. One gateway round trip per target kind, never N+1.
    async fn rollup_for(
        &self,
        targets: &[TargetRef],
        reactor_preview: usize,
    ) -> RepoResult<HashMap<TargetRef, ReactionRollup>>;
}

// ============================================================================
// Engagement Recorder
// ============================================================================

/// Append-once log of "CA viewed lead" events with CA-private state.
#[async_trait]
pub trait EngagementRepository: Send + Sync {
    /// Record a view, idempotently: repeated views by the same CA return
    /// the original engagement unchanged.
    async fn record(
        &self,
        lead_id: i64,
        ca_id: UserId,
        viewed_at: DateTime<Utc>,
    ) -> RepoResult<LeadEngagement>;

    /// Fetch one CA's engagement with one lead
    async fn find(&self, lead_id: i64, ca_id: UserId) -> RepoResult<Option<LeadEngagement>>;

    /// Number of distinct CAs that have viewed a lead (display only)
    async fn count_distinct_viewers(&self, lead_id: i64) -> RepoResult<i64>;

    /// All of one CA's engagements, newest view first
    async fn find_by_ca(&self, ca_id: UserId) -> RepoResult<Vec<LeadEngagement>>;

    /// Set or clear the hidden flag, stamping hidden_at/updated_at
    async fn set_hidden(
        &self,
        lead_id: i64,
        ca_id: UserId,
        hidden: bool,
    ) -> RepoResult<LeadEngagement>;

    /// Replace the CA-private notes (None clears)
    async fn update_notes(
        &self,
        lead_id: i64,
        ca_id: UserId,
        notes: Option<String>,
    ) -> RepoResult<LeadEngagement>;
}
