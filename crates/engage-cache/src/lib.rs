//! # engage-cache
//!
//! The client-held optimistic cache: an in-memory projection of per-target
//! reaction state, updated speculatively before the gateway confirms a
//! write and reconciled (or rolled back) afterwards.
//!
//! The cache never owns persisted state. It is disposable: evicting an
//! entry costs one refetch, nothing more.
//!
//! ## Lifecycle per target
//!
//! ```text
//! Settled --begin--> Pending --commit--> Settled (stale, refetch)
//!                        \----rollback-> Settled (snapshot restored, stale, refetch)
//! ```
//!
//! One mutation may be in flight per target at a time; the rollback
//! snapshot is a single slot, not a stack.
//!
//! ## Example
//!
//! ```ignore
//! use engage_cache::{OptimisticStore, ReactionView};
//!
//! let store = OptimisticStore::new();
//! store.settle(target, authoritative_view);
//!
//! let predicted = store.begin(target, ReactionKind::Like)?;
//! match ledger_write().await {
//!     Ok(_) => store.commit(target)?,
//!     Err(_) => store.rollback(target)?,
//! }
//! // Both paths leave the entry stale: refetch and settle again.
//! ```

pub mod store;
pub mod view;

// Re-export store types
pub use store::{CacheError, CacheResult, OptimisticStore};

// Re-export view types
pub use view::ReactionView;
