//! Database models - SQLx-compatible structs for PostgreSQL tables

mod counter;
mod engagement;
mod reaction;

pub use counter::{CounterModel, ReactorNameModel};
pub use engagement::LeadEngagementModel;
pub use reaction::ReactionModel;
