//! SQLite storage implementation for Coinlens.
//!
//! This crate provides all database-related functionality using Diesel ORM
//! with SQLite. It implements the repository traits defined in
//! `coinlens-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - The tracked-token repository
//! - Database-specific model types (with Diesel derives)
//!
//! This crate is the only place in the application where Diesel dependencies
//! exist. The core crate is database-agnostic and works with traits; the
//! uniqueness constraint on (contract_address, network) lives here and is
//! the source of truth for duplicate prevention under concurrency.

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod tokens;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors
pub use errors::StorageError;

// Re-export from coinlens-core for convenience
pub use coinlens_core::errors::{DatabaseError, Error, Result};
