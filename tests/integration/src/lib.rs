//! Integration test support for the engage workspace
//!
//! Provides in-memory implementations of the repository ports plus
//! helpers for wiring a full service stack without a database.

pub mod fakes;
