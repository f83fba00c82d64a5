//! Response DTOs
//!
//! All response DTOs implement `Serialize` for JSON output.

use chrono::{DateTime, Utc};
use serde::Serialize;

use engage_core::entities::ReactionCounts;
use engage_core::value_objects::{ReactionKind, TargetRef, UserId};

/// Reaction summary for one target
#[derive(Debug, Clone, Serialize)]
pub struct ReactionSummaryResponse {
    pub target: TargetRef,
    pub counts: ReactionCounts,
    pub total: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub my_reaction: Option<ReactionKind>,
    pub recent_reactors: Vec<String>,
}

/// One "who reacted" row
#[derive(Debug, Clone, Serialize)]
pub struct ReactorResponse {
    pub user_id: UserId,
    pub reaction: ReactionKind,
    pub reacted_at: DateTime<Utc>,
}

/// A CA's engagement with a lead
#[derive(Debug, Clone, Serialize)]
pub struct EngagementResponse {
    pub lead_id: i64,
    pub ca_id: UserId,
    pub viewed_at: DateTime<Utc>,
    pub is_hidden: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Distinct-viewer count for a lead ("N CAs viewed")
#[derive(Debug, Clone, Serialize)]
pub struct ViewerCountResponse {
    pub lead_id: i64,
    pub viewers: i64,
}
