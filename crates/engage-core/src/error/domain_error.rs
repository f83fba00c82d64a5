//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{
    ReactionKindParseError, TargetKindParseError, TargetRef, UserId, UserIdParseError,
};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Engagement not found for lead {lead_id} and CA {ca_id}")]
    EngagementNotFound { lead_id: i64, ca_id: UserId },

    #[error("Lead not found: {0}")]
    LeadNotFound(i64),

    #[error("Target not found: {0}")]
    TargetNotFound(TargetRef),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error(transparent)]
    InvalidReactionKind(#[from] ReactionKindParseError),

    #[error(transparent)]
    InvalidTargetKind(#[from] TargetKindParseError),

    #[error(transparent)]
    InvalidUserId(#[from] UserIdParseError),

    #[error("Notes too long: max {max} characters")]
    NotesTooLong { max: usize },

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Reaction already exists for {target}")]
    ReactionAlreadyExists { target: TargetRef },

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::EngagementNotFound { .. } => "UNKNOWN_ENGAGEMENT",
            Self::LeadNotFound(_) => "UNKNOWN_LEAD",
            Self::TargetNotFound(_) => "UNKNOWN_TARGET",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidReactionKind(_) => "INVALID_REACTION_KIND",
            Self::InvalidTargetKind(_) => "INVALID_TARGET_KIND",
            Self::InvalidUserId(_) => "INVALID_USER_ID",
            Self::NotesTooLong { .. } => "NOTES_TOO_LONG",

            // Conflict
            Self::ReactionAlreadyExists { .. } => "REACTION_ALREADY_EXISTS",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::CacheError(_) => "CACHE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::EngagementNotFound { .. } | Self::LeadNotFound(_) | Self::TargetNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidReactionKind(_)
                | Self::InvalidTargetKind(_)
                | Self::InvalidUserId(_)
                | Self::NotesTooLong { .. }
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::ReactionAlreadyExists { .. })
    }
}
