//! Lead engagement database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for the lead_engagements table
#[derive(Debug, Clone, FromRow)]
pub struct LeadEngagementModel {
    pub lead_id: i64,
    pub ca_id: Uuid,
    pub viewed_at: DateTime<Utc>,
    pub is_hidden: bool,
    pub hidden_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub updated_at: DateTime<Utc>,
}
