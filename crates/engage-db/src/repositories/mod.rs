//! Repository implementations
//!
//! PostgreSQL implementations of the ports defined in engage-core.
//! The reaction repository owns the one multi-step write in the system
//! and runs it transactionally.

mod counter;
mod engagement;
mod error;
mod reaction;

pub use counter::PgCounterRepository;
pub use engagement::PgEngagementRepository;
pub use reaction::PgReactionRepository;
