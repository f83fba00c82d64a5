//! Repository traits (ports)

mod repositories;

pub use repositories::{
    CounterRepository, EngagementRepository, ReactionRepository, RepoResult,
};
