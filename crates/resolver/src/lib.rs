//! Coinlens Token Resolver Crate
//!
//! This crate provides source-agnostic token identity resolution for the
//! Coinlens application.
//!
//! # Overview
//!
//! The resolver crate supports:
//! - Free-text and contract-address token searches
//! - Multiple external sources: a curated token registry and a DEX aggregator
//! - Confidence scoring, deduplication and ranking of candidates
//! - Chain-aware contract address validation and normalization
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +------------------+
//! |   Search query   | --> |    Aggregator    |  (fan-out, score, dedupe)
//! +------------------+     +------------------+
//!                                  |
//!                   +--------------+--------------+
//!                   v                             v
//!          +------------------+         +------------------+
//!          |  Registry source |         |  DEX-pair source |
//!          +------------------+         +------------------+
//!                   |                             |
//!                   +--------------+--------------+
//!                                  v
//!                          +------------------+
//!                          |  TokenCandidate  |  (ranked, top 5)
//!                          +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`TokenCandidate`] - A provisional, unconfirmed token identity
//! - [`RankedCandidates`] - The aggregated, deduplicated top candidates
//! - [`RegistryCoin`] - Full registry detail for a single coin
//! - [`DexPair`] - The most liquid trading pair found for a contract

pub mod aggregator;
pub mod chains;
pub mod errors;
pub mod models;
pub mod source;

// Re-export all public types from models
pub use models::{CandidateSource, DexPair, RankedCandidates, RegistryCoin, TokenCandidate};

// Re-export chain helpers
pub use chains::{
    canonical_network, is_valid_address, looks_like_address, native_registry_id,
    normalize_address, Network, NATIVE_PREFIX, SUPPORTED_NETWORKS,
};

// Re-export source types
pub use source::coingecko::CoinGeckoSource;
pub use source::dexscreener::DexScreenerSource;
pub use source::{PairLookupSource, RegistryDetailSource, TokenSource};

// Re-export aggregator types
pub use aggregator::{scoring, CandidateAggregator};

// Re-export error type
pub use errors::ResolverError;
