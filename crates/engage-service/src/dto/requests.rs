//! Request DTOs
//!
//! All request DTOs implement `Deserialize`; those carrying free text
//! also implement `Validate` for input validation.

use serde::Deserialize;
use validator::Validate;

use engage_core::value_objects::{ReactionKind, TargetKind};

/// A reaction press on a post or comment
#[derive(Debug, Clone, Deserialize)]
pub struct ToggleReactionRequest {
    pub target_kind: TargetKind,
    pub target_id: i64,
    pub reaction: ReactionKind,
}

/// A CA opening a lead's contact details
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecordLeadViewRequest {
    #[validate(range(min = 1, message = "lead_id must be positive"))]
    pub lead_id: i64,
}

/// Replace the CA-private notes on an engagement
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateNotesRequest {
    /// None clears the notes
    #[validate(length(max = 2000, message = "Notes must be at most 2000 characters"))]
    pub notes: Option<String>,
}
