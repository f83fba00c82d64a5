//! Entity -> response mappers

use engage_core::entities::{LeadEngagement, Reaction, ReactionRollup};
use engage_core::value_objects::{ReactionKind, TargetRef};

use super::responses::{EngagementResponse, ReactionSummaryResponse, ReactorResponse};

impl ReactionSummaryResponse {
    /// Assemble a summary from a batched rollup plus the acting user's
    /// own ledger entry
    pub fn from_parts(
        target: TargetRef,
        rollup: ReactionRollup,
        my_reaction: Option<ReactionKind>,
    ) -> Self {
        let total = rollup.counts.total();
        Self {
            target,
            counts: rollup.counts,
            total,
            my_reaction,
            recent_reactors: rollup.recent_reactors,
        }
    }
}

impl From<&Reaction> for ReactorResponse {
    fn from(reaction: &Reaction) -> Self {
        Self {
            user_id: reaction.user_id,
            reaction: reaction.kind,
            reacted_at: reaction.created_at,
        }
    }
}

impl From<&LeadEngagement> for EngagementResponse {
    fn from(engagement: &LeadEngagement) -> Self {
        Self {
            lead_id: engagement.lead_id,
            ca_id: engagement.ca_id,
            viewed_at: engagement.viewed_at,
            is_hidden: engagement.is_hidden,
            hidden_at: engagement.hidden_at,
            notes: engagement.notes.clone(),
            updated_at: engagement.updated_at,
        }
    }
}
