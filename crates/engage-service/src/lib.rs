//! # engage-service
//!
//! Application layer: the operations the UI calls. Binds the reaction
//! ledger, counter aggregator, optimistic cache, and engagement recorder
//! behind typed use cases with unified error handling.

pub mod dto;
pub mod services;

// Re-export commonly used types at crate root
pub use services::{
    EngagementService, ReactionFlow, ReactionService, ServiceContext, ServiceContextBuilder,
    ServiceError, ServiceResult,
};
