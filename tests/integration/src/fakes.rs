//! In-memory gateway fake
//!
//! One object implements all three repository ports over a single locked
//! state, mirroring the hosted gateway's semantics: the ledger write
//! applies its compensating counter adjustments atomically, counter
//! decrements clamp at zero, engagement inserts are idempotent per
//! (lead, CA), and rollup counts come from the denormalized snapshot
//! rather than a ledger scan.
//!
//! Writes can be made to fail on demand for rollback testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};

use engage_core::entities::{
    CounterDelta, LeadEngagement, Reaction, ReactionChange, ReactionRollup,
};
use engage_core::error::DomainError;
use engage_core::traits::{
    CounterRepository, EngagementRepository, ReactionRepository, RepoResult,
};
use engage_core::value_objects::{ReactionKind, TargetRef, UserId};

#[derive(Default)]
struct GatewayState {
    /// Ledger: one entry per (target, user), with an insertion sequence
    /// for deterministic newest-first ordering
    reactions: HashMap<(TargetRef, UserId), (ReactionKind, DateTime<Utc>, i64)>,
    /// Denormalized counter snapshot
    counters: HashMap<(TargetRef, ReactionKind), i64>,
    /// Engagements keyed by (lead, CA)
    engagements: HashMap<(i64, UserId), LeadEngagement>,
    /// Display names for the rollup preview join
    profiles: HashMap<UserId, String>,
}

/// In-memory stand-in for the persistence gateway
#[derive(Default)]
pub struct InMemoryGateway {
    state: Mutex<GatewayState>,
    sequence: AtomicI64,
    fail_next_write: AtomicBool,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a display name so the user shows up in rollup previews
    pub fn set_display_name(&self, user_id: UserId, name: impl Into<String>) {
        self.state
            .lock()
            .unwrap()
            .profiles
            .insert(user_id, name.into());
    }

    /// Make the next ledger or engagement write fail with a database error
    pub fn fail_next_write(&self) {
        self.fail_next_write.store(true, Ordering::SeqCst);
    }

    /// Raw counter bucket, for invariant assertions
    pub fn counter(&self, target: TargetRef, kind: ReactionKind) -> i64 {
        *self
            .state
            .lock()
            .unwrap()
            .counters
            .get(&(target, kind))
            .unwrap_or(&0)
    }

    fn next_timestamp(&self) -> (DateTime<Utc>, i64) {
        // Spread fake rows one second apart so created_at ordering is
        // unambiguous even within one test
        let seq = self.sequence.fetch_add(1, Ordering::SeqCst);
        let base = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        (base + Duration::seconds(seq), seq)
    }

    fn take_failure(&self) -> bool {
        self.fail_next_write.swap(false, Ordering::SeqCst)
    }

    fn apply_delta_locked(
        state: &mut GatewayState,
        target: TargetRef,
        kind: ReactionKind,
        delta: CounterDelta,
    ) {
        let bucket = state.counters.entry((target, kind)).or_insert(0);
        *bucket = (*bucket + delta.as_i64()).max(0);
    }
}

#[async_trait]
impl ReactionRepository for InMemoryGateway {
    async fn find(&self, user_id: UserId, target: TargetRef) -> RepoResult<Option<Reaction>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .reactions
            .get(&(target, user_id))
            .map(|(kind, created_at, _)| Reaction {
                user_id,
                target,
                kind: *kind,
                created_at: *created_at,
            }))
    }

    async fn find_by_target(&self, target: TargetRef) -> RepoResult<Vec<Reaction>> {
        let state = self.state.lock().unwrap();
        let mut rows: Vec<(i64, Reaction)> = state
            .reactions
            .iter()
            .filter(|((t, _), _)| *t == target)
            .map(|((_, user_id), (kind, created_at, seq))| {
                (
                    *seq,
                    Reaction {
                        user_id: *user_id,
                        target,
                        kind: *kind,
                        created_at: *created_at,
                    },
                )
            })
            .collect();
        rows.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(rows.into_iter().map(|(_, reaction)| reaction).collect())
    }

    async fn find_for_targets(
        &self,
        user_id: UserId,
        targets: &[TargetRef],
    ) -> RepoResult<HashMap<TargetRef, ReactionKind>> {
        let state = self.state.lock().unwrap();
        let mut result = HashMap::new();
        for target in targets {
            if let Some((kind, _, _)) = state.reactions.get(&(*target, user_id)) {
                result.insert(*target, *kind);
            }
        }
        Ok(result)
    }

    async fn set_reaction(
        &self,
        user_id: UserId,
        target: TargetRef,
        kind: ReactionKind,
    ) -> RepoResult<ReactionChange> {
        if self.take_failure() {
            return Err(DomainError::DatabaseError("injected write failure".into()));
        }

        let mut state = self.state.lock().unwrap();
        let existing = state.reactions.get(&(target, user_id)).map(|(k, _, _)| *k);

        let change = match existing {
            None => {
                let (created_at, seq) = self.next_timestamp();
                state
                    .reactions
                    .insert((target, user_id), (kind, created_at, seq));
                ReactionChange::fresh(kind)
            }
            Some(current) if current == kind => {
                state.reactions.remove(&(target, user_id));
                ReactionChange::toggled_off(current)
            }
            Some(current) => {
                if let Some(entry) = state.reactions.get_mut(&(target, user_id)) {
                    entry.0 = kind;
                }
                ReactionChange::switched(current, kind)
            }
        };

        for (bucket, delta) in change.counter_deltas() {
            Self::apply_delta_locked(&mut state, target, bucket, delta);
        }

        Ok(change)
    }
}

#[async_trait]
impl CounterRepository for InMemoryGateway {
    async fn adjust(
        &self,
        target: TargetRef,
        kind: ReactionKind,
        delta: CounterDelta,
    ) -> RepoResult<()> {
        let mut state = self.state.lock().unwrap();
        Self::apply_delta_locked(&mut state, target, kind, delta);
        Ok(())
    }

    async fn rollup_for(
        &self,
        targets: &[TargetRef],
        reactor_preview: usize,
    ) -> RepoResult<HashMap<TargetRef, ReactionRollup>> {
        let state = self.state.lock().unwrap();
        let mut result = HashMap::new();

        for target in targets {
            let mut rollup = ReactionRollup::default();

            // Counts come from the snapshot, not the ledger
            for ((t, kind), count) in &state.counters {
                if t == target && *count > 0 {
                    rollup.counts.set(*kind, *count);
                }
            }

            // Newest-first distinct reactors with a profile row
            let mut reactors: Vec<(i64, UserId)> = state
                .reactions
                .iter()
                .filter(|((t, _), _)| t == target)
                .map(|((_, user_id), (_, _, seq))| (*seq, *user_id))
                .collect();
            reactors.sort_by(|a, b| b.0.cmp(&a.0));
            rollup.recent_reactors = reactors
                .into_iter()
                .filter_map(|(_, user_id)| state.profiles.get(&user_id).cloned())
                .take(reactor_preview)
                .collect();

            result.insert(*target, rollup);
        }

        Ok(result)
    }
}

#[async_trait]
impl EngagementRepository for InMemoryGateway {
    async fn record(
        &self,
        lead_id: i64,
        ca_id: UserId,
        viewed_at: DateTime<Utc>,
    ) -> RepoResult<LeadEngagement> {
        if self.take_failure() {
            return Err(DomainError::DatabaseError("injected write failure".into()));
        }

        let mut state = self.state.lock().unwrap();
        let engagement = state
            .engagements
            .entry((lead_id, ca_id))
            .or_insert_with(|| {
                let mut engagement = LeadEngagement::new(lead_id, ca_id);
                engagement.viewed_at = viewed_at;
                engagement.updated_at = viewed_at;
                engagement
            });
        Ok(engagement.clone())
    }

    async fn find(&self, lead_id: i64, ca_id: UserId) -> RepoResult<Option<LeadEngagement>> {
        let state = self.state.lock().unwrap();
        Ok(state.engagements.get(&(lead_id, ca_id)).cloned())
    }

    async fn count_distinct_viewers(&self, lead_id: i64) -> RepoResult<i64> {
        let state = self.state.lock().unwrap();
        Ok(state
            .engagements
            .keys()
            .filter(|(lead, _)| *lead == lead_id)
            .count() as i64)
    }

    async fn find_by_ca(&self, ca_id: UserId) -> RepoResult<Vec<LeadEngagement>> {
        let state = self.state.lock().unwrap();
        let mut engagements: Vec<LeadEngagement> = state
            .engagements
            .iter()
            .filter(|((_, ca), _)| *ca == ca_id)
            .map(|(_, engagement)| engagement.clone())
            .collect();
        engagements.sort_by(|a, b| b.viewed_at.cmp(&a.viewed_at));
        Ok(engagements)
    }

    async fn set_hidden(
        &self,
        lead_id: i64,
        ca_id: UserId,
        hidden: bool,
    ) -> RepoResult<LeadEngagement> {
        let mut state = self.state.lock().unwrap();
        let engagement = state
            .engagements
            .get_mut(&(lead_id, ca_id))
            .ok_or(DomainError::EngagementNotFound { lead_id, ca_id })?;
        if hidden {
            engagement.hide();
        } else {
            engagement.unhide();
        }
        Ok(engagement.clone())
    }

    async fn update_notes(
        &self,
        lead_id: i64,
        ca_id: UserId,
        notes: Option<String>,
    ) -> RepoResult<LeadEngagement> {
        let mut state = self.state.lock().unwrap();
        let engagement = state
            .engagements
            .get_mut(&(lead_id, ca_id))
            .ok_or(DomainError::EngagementNotFound { lead_id, ca_id })?;
        engagement.set_notes(notes);
        Ok(engagement.clone())
    }
}
