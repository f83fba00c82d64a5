//! Denormalized reaction counters for one target
//!
//! The snapshot is maintained by compensating increments and decrements
//! alongside every ledger write, never by rescanning the ledger.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::value_objects::ReactionKind;

/// Direction of a single counter adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CounterDelta {
    Increment,
    Decrement,
}

impl CounterDelta {
    /// Signed magnitude of the adjustment
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        match self {
            Self::Increment => 1,
            Self::Decrement => -1,
        }
    }
}

/// Per-kind reaction counts for one target.
///
/// Counts never go negative: decrements against an absent or zero bucket
/// clamp to zero so out-of-order delivery cannot drive the snapshot
/// below reality.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReactionCounts {
    counts: BTreeMap<ReactionKind, i64>,
}

impl ReactionCounts {
    /// Empty snapshot
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from (kind, count) pairs; negative inputs clamp to zero
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (ReactionKind, i64)>,
    {
        let mut counts = Self::new();
        for (kind, count) in pairs {
            counts.set(kind, count);
        }
        counts
    }

    /// Count for one kind (zero if absent)
    #[must_use]
    pub fn get(&self, kind: ReactionKind) -> i64 {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    /// Overwrite one bucket, clamped at zero
    pub fn set(&mut self, kind: ReactionKind, count: i64) {
        let clamped = count.max(0);
        if clamped == 0 {
            self.counts.remove(&kind);
        } else {
            self.counts.insert(kind, clamped);
        }
    }

    /// Apply a signed delta to one bucket, clamped at zero
    pub fn apply(&mut self, kind: ReactionKind, delta: CounterDelta) {
        let next = (self.get(kind) + delta.as_i64()).max(0);
        self.set(kind, next);
    }

    /// Total reactions across every kind
    #[must_use]
    pub fn total(&self) -> i64 {
        self.counts.values().sum()
    }

    /// True when every bucket is zero
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Non-zero buckets, ordered by kind
    pub fn iter(&self) -> impl Iterator<Item = (ReactionKind, i64)> + '_ {
        self.counts.iter().map(|(kind, count)| (*kind, *count))
    }
}

/// Batched counter read result for one target: counts by kind plus the
/// first few distinct reactor display names for the "A, B and N others"
/// line.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReactionRollup {
    pub counts: ReactionCounts,
    pub recent_reactors: Vec<String>,
}

impl ReactionRollup {
    /// Create a rollup
    #[must_use]
    pub fn new(counts: ReactionCounts, recent_reactors: Vec<String>) -> Self {
        Self {
            counts,
            recent_reactors,
        }
    }
}
