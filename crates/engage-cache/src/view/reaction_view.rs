//! Reaction view - what the UI renders for one target
//!
//! Counts by kind, the acting user's own reaction, and the reactor-name
//! preview. This is the unit of speculative mutation and of rollback.

use serde::{Deserialize, Serialize};

use engage_core::entities::{CounterDelta, ReactionCounts, ReactionRollup};
use engage_core::value_objects::ReactionKind;

/// Per-target reaction state as seen by one client
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReactionView {
    pub counts: ReactionCounts,
    pub my_reaction: Option<ReactionKind>,
    pub recent_reactors: Vec<String>,
}

impl ReactionView {
    /// Build a view from an authoritative rollup plus the user's own
    /// reaction from the ledger
    #[must_use]
    pub fn from_rollup(rollup: ReactionRollup, my_reaction: Option<ReactionKind>) -> Self {
        Self {
            counts: rollup.counts,
            my_reaction,
            recent_reactors: rollup.recent_reactors,
        }
    }

    /// Apply the speculative three-way delta for a reaction press.
    ///
    /// Same kind as the current reaction: toggle-off. Different kind:
    /// move the count from the old bucket to the new. No current
    /// reaction: increment the new bucket. Returns the predicted
    /// resulting reaction, mirroring what the ledger write will return
    /// if it succeeds.
    pub fn apply_optimistic(&mut self, kind: ReactionKind) -> Option<ReactionKind> {
        match self.my_reaction {
            Some(current) if current == kind => {
                self.counts.apply(kind, CounterDelta::Decrement);
                self.my_reaction = None;
            }
            Some(current) => {
                self.counts.apply(current, CounterDelta::Decrement);
                self.counts.apply(kind, CounterDelta::Increment);
                self.my_reaction = Some(kind);
            }
            None => {
                self.counts.apply(kind, CounterDelta::Increment);
                self.my_reaction = Some(kind);
            }
        }
        self.my_reaction
    }
}
