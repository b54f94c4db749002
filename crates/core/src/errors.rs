//! Core error types for the Coinlens admission pipeline.
//!
//! This module defines database-agnostic error types. Storage-specific errors
//! (from Diesel, SQLite, etc.) are converted to these types by the storage
//! layer. The server maps each variant onto an HTTP status; the mapping lives
//! at the API boundary, not here.

use coinlens_resolver::ResolverError;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the admission pipeline.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    /// Malformed or missing caller input. The caller must correct it.
    #[error("{0}")]
    Validation(String),

    /// The referenced registry coin or DEX pair does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The (address, network) pair is already tracked. Carries the existing
    /// record so the caller can link to it instead of retrying.
    #[error("Token already exists in our database.")]
    Conflict {
        /// Identifier of the existing record, when known.
        token_id: Option<String>,
        /// Symbol of the existing record, when known.
        symbol: Option<String>,
    },

    /// The best DEX pair's liquidity is below the dead-token floor.
    /// Rejected outright, no override.
    #[error("Token liquidity too low. Minimum ${floor_usd} liquidity required.")]
    InsufficientLiquidity {
        /// Liquidity of the best pair found, in USD.
        liquidity_usd: f64,
        /// The configured floor, in USD.
        floor_usd: f64,
    },

    /// No website was resolved from any source and none was supplied.
    /// The caller can supply one and resubmit.
    #[error("This token does not have a website listed on any source.")]
    NeedsWebsite {
        /// Symbol of the resolved token, for the caller's benefit.
        symbol: Option<String>,
        /// Liquidity of the resolved token, for the caller's benefit.
        liquidity_usd: Option<f64>,
    },

    /// The client exceeded the submission ceiling. Terminal for this
    /// window; never retried by the core.
    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    /// The downstream ingestion call failed; the whole admission is treated
    /// as failed and nothing was durably created.
    #[error("Ingestion failed: {0}")]
    Upstream(String),

    /// Required configuration is absent at startup.
    #[error("Server configuration error: {0}")]
    Config(String),

    /// An external source failed in a context where the failure propagates.
    #[error("Resolver error: {0}")]
    Resolver(#[from] ResolverError),
}

/// Database-agnostic error type for storage operations.
///
/// This enum uses `String` for all error details, allowing the storage layer
/// to convert storage-specific errors (Diesel, SQLite, etc.) into this format.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to establish a database connection.
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Failed to create or configure the connection pool.
    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(String),

    /// A database query failed to execute.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// The requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A unique constraint was violated (e.g., duplicate key).
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// Database migration failed.
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Internal/unexpected database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl Error {
    /// True for the variants the caller can act on by changing their input
    /// (as opposed to operator or upstream faults).
    pub fn is_client_fault(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::NotFound(_)
                | Self::Conflict { .. }
                | Self::InsufficientLiquidity { .. }
                | Self::NeedsWebsite { .. }
                | Self::RateLimited
        )
    }
}
