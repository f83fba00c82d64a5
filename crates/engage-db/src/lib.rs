//! # engage-db
//!
//! Database layer implementing the repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for the ports defined
//! in `engage-core`. It handles:
//!
//! - Connection pool management
//! - Database models with SQLx `FromRow` derives
//! - Fallible row ↔ entity mappers (enum columns decode at this boundary)
//! - Repository implementations, with the ledger write and its
//!   compensating counter adjustments executed in one transaction
//!
//! ## Usage
//!
//! ```rust,ignore
//! use engage_db::pool::{create_pool, DatabaseConfig};
//! use engage_db::PgReactionRepository;
//! use engage_core::traits::ReactionRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env();
//!     let pool = create_pool(&config).await?;
//!     let reactions = PgReactionRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, create_pool_from_env, DatabaseConfig, PgPool};
pub use repositories::{PgCounterRepository, PgEngagementRepository, PgReactionRepository};
