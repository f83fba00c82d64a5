//! Reaction entity - one user's current response to one target
//!
//! The ledger holds at most one row per (user, target). Selecting a new
//! kind mutates the row; re-selecting the current kind removes it.

use chrono::{DateTime, Utc};

use crate::entities::CounterDelta;
use crate::value_objects::{ReactionKind, TargetRef, UserId};

/// Reaction entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub user_id: UserId,
    pub target: TargetRef,
    pub kind: ReactionKind,
    pub created_at: DateTime<Utc>,
}

impl Reaction {
    /// Create a new Reaction stamped with the current time
    pub fn new(user_id: UserId, target: TargetRef, kind: ReactionKind) -> Self {
        Self {
            user_id,
            target,
            kind,
            created_at: Utc::now(),
        }
    }

    /// Check if this reaction is of a specific kind
    #[inline]
    pub fn is_kind(&self, kind: ReactionKind) -> bool {
        self.kind == kind
    }
}

/// Outcome of a ledger write: which reaction was in place before and after.
///
/// Exactly one of three shapes: fresh (None -> Some), switch
/// (Some(a) -> Some(b), a != b), or toggle-off (Some -> None).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReactionChange {
    pub previous: Option<ReactionKind>,
    pub current: Option<ReactionKind>,
}

impl ReactionChange {
    /// A first reaction where none existed
    #[must_use]
    pub const fn fresh(kind: ReactionKind) -> Self {
        Self {
            previous: None,
            current: Some(kind),
        }
    }

    /// A kind change on an existing reaction
    #[must_use]
    pub const fn switched(from: ReactionKind, to: ReactionKind) -> Self {
        Self {
            previous: Some(from),
            current: Some(to),
        }
    }

    /// Removal by re-selecting the current kind
    #[must_use]
    pub const fn toggled_off(kind: ReactionKind) -> Self {
        Self {
            previous: Some(kind),
            current: None,
        }
    }

    #[must_use]
    pub fn is_fresh(&self) -> bool {
        self.previous.is_none() && self.current.is_some()
    }

    #[must_use]
    pub fn is_toggle_off(&self) -> bool {
        self.previous.is_some() && self.current.is_none()
    }

    #[must_use]
    pub fn is_switch(&self) -> bool {
        matches!((self.previous, self.current), (Some(a), Some(b)) if a != b)
    }

    /// The compensating counter adjustments this change implies.
    ///
    /// Toggle-off decrements the old bucket; a switch decrements the old
    /// and increments the new; a fresh reaction increments the new. The
    /// total count across buckets changes only for fresh and toggle-off.
    #[must_use]
    pub fn counter_deltas(&self) -> Vec<(ReactionKind, CounterDelta)> {
        let mut deltas = Vec::with_capacity(2);
        if let Some(old) = self.previous {
            if self.current != Some(old) {
                deltas.push((old, CounterDelta::Decrement));
            }
        }
        if let Some(new) = self.current {
            if self.previous != Some(new) {
                deltas.push((new, CounterDelta::Increment));
            }
        }
        deltas
    }
}
