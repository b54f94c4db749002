//! Coinlens Core - Domain entities, services, and traits.
//!
//! This crate contains the admission pipeline for the Coinlens application:
//! validating submitted token identities, gating them on uniqueness and
//! liquidity, dispatching the downstream analysis job, and throttling
//! abusive clients. It is database-agnostic and defines traits that are
//! implemented by the `storage-sqlite` crate.

pub mod errors;
pub mod limits;
pub mod tokens;

// Re-export common types
pub use tokens::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
