//! Optimistic store - per-target entries with snapshot/rollback

mod optimistic;

pub use optimistic::{CacheError, CacheResult, OptimisticStore};
