//! Counter snapshot database models

use sqlx::FromRow;

/// One denormalized counter bucket (from the reaction_counters table)
#[derive(Debug, Clone, FromRow)]
pub struct CounterModel {
    pub target_id: i64,
    pub kind: String,
    pub count: i64,
}

/// One ranked reactor display name (from the rollup preview query)
#[derive(Debug, Clone, FromRow)]
pub struct ReactorNameModel {
    pub target_id: i64,
    pub display_name: String,
}
