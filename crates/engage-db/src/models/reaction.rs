//! Reaction database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for the reactions table (the ledger)
#[derive(Debug, Clone, FromRow)]
pub struct ReactionModel {
    pub target_kind: String,
    pub target_id: i64,
    pub user_id: Uuid,
    pub kind: String,
    pub created_at: DateTime<Utc>,
}
