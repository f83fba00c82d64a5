//! In-memory optimistic store keyed by target.
//!
//! Each entry carries the rendered view, an optional single-slot
//! rollback snapshot, and a staleness flag that tells the caller an
//! authoritative refetch is due.

use dashmap::DashMap;

use engage_core::value_objects::{ReactionKind, TargetRef};

use crate::view::ReactionView;

/// Error type for optimistic store operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CacheError {
    /// `begin` was called before the target was ever settled from the
    /// server; there is nothing to speculate against.
    #[error("no settled view for target {0}")]
    NotPrimed(TargetRef),

    /// A mutation is already in flight for this target. The snapshot is
    /// a single slot; callers serialize per-target presses.
    #[error("mutation already in flight for target {0}")]
    MutationInFlight(TargetRef),

    /// `commit` or `rollback` without a matching `begin`.
    #[error("no pending mutation for target {0}")]
    NotPending(TargetRef),
}

/// Result type for optimistic store operations
pub type CacheResult<T> = Result<T, CacheError>;

#[derive(Debug, Clone)]
enum EntryState {
    Settled,
    Pending { snapshot: ReactionView },
}

#[derive(Debug, Clone)]
struct Entry {
    view: ReactionView,
    state: EntryState,
    stale: bool,
}

/// Client-held optimistic view of reaction state, one entry per target
#[derive(Debug, Default)]
pub struct OptimisticStore {
    entries: DashMap<TargetRef, Entry>,
}

impl OptimisticStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install an authoritative view for a target, clearing staleness.
    ///
    /// A pending mutation is left untouched: the in-flight flow will
    /// settle again from its own refetch.
    pub fn settle(&self, target: TargetRef, view: ReactionView) {
        match self.entries.get_mut(&target) {
            Some(entry) if matches!(entry.state, EntryState::Pending { .. }) => {
                tracing::debug!(%target, "Settle skipped, mutation in flight");
            }
            Some(mut entry) => {
                entry.view = view;
                entry.stale = false;
            }
            None => {
                self.entries.insert(
                    target,
                    Entry {
                        view,
                        state: EntryState::Settled,
                        stale: false,
                    },
                );
            }
        }
    }

    /// Current render state for a target
    #[must_use]
    pub fn view(&self, target: TargetRef) -> Option<ReactionView> {
        self.entries.get(&target).map(|entry| entry.view.clone())
    }

    /// Start a speculative mutation: snapshot the settled view, apply
    /// the three-way delta, return the predicted resulting reaction.
    pub fn begin(
        &self,
        target: TargetRef,
        kind: ReactionKind,
    ) -> CacheResult<Option<ReactionKind>> {
        let mut entry = self
            .entries
            .get_mut(&target)
            .ok_or(CacheError::NotPrimed(target))?;

        if matches!(entry.state, EntryState::Pending { .. }) {
            return Err(CacheError::MutationInFlight(target));
        }

        let snapshot = entry.view.clone();
        let predicted = entry.view.apply_optimistic(kind);
        entry.state = EntryState::Pending { snapshot };

        tracing::debug!(%target, ?predicted, "Optimistic mutation began");
        Ok(predicted)
    }

    /// Confirm the in-flight mutation: drop the snapshot and mark the
    /// entry stale so the caller refetches authoritative counts.
    pub fn commit(&self, target: TargetRef) -> CacheResult<()> {
        let mut entry = self
            .entries
            .get_mut(&target)
            .ok_or(CacheError::NotPending(target))?;

        match entry.state {
            EntryState::Pending { .. } => {
                entry.state = EntryState::Settled;
                entry.stale = true;
                tracing::debug!(%target, "Optimistic mutation committed");
                Ok(())
            }
            EntryState::Settled => Err(CacheError::NotPending(target)),
        }
    }

    /// Abort the in-flight mutation: restore the snapshot exactly, then
    /// mark stale anyway - the server may have partially applied, so the
    /// refetch happens on this path too.
    pub fn rollback(&self, target: TargetRef) -> CacheResult<()> {
        let mut entry = self
            .entries
            .get_mut(&target)
            .ok_or(CacheError::NotPending(target))?;

        match std::mem::replace(&mut entry.state, EntryState::Settled) {
            EntryState::Pending { snapshot } => {
                entry.view = snapshot;
                entry.stale = true;
                tracing::debug!(%target, "Optimistic mutation rolled back");
                Ok(())
            }
            EntryState::Settled => Err(CacheError::NotPending(target)),
        }
    }

    /// True while a mutation is in flight for the target
    #[must_use]
    pub fn is_pending(&self, target: TargetRef) -> bool {
        self.entries
            .get(&target)
            .is_some_and(|entry| matches!(entry.state, EntryState::Pending { .. }))
    }

    /// True when the entry needs an authoritative refetch
    #[must_use]
    pub fn is_stale(&self, target: TargetRef) -> bool {
        self.entries.get(&target).is_some_and(|entry| entry.stale)
    }

    /// Force a refetch on next read without touching the view
    pub fn invalidate(&self, target: TargetRef) {
        if let Some(mut entry) = self.entries.get_mut(&target) {
            entry.stale = true;
        }
    }

    /// Drop a target's entry entirely. The projection is disposable;
    /// eviction costs one refetch.
    pub fn evict(&self, target: TargetRef) {
        self.entries.remove(&target);
    }

    /// Number of cached targets
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no targets are cached
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
