//! Candidate models for token identity search.

use serde::{Deserialize, Serialize};

/// Which external source produced a candidate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CandidateSource {
    /// The curated token registry (free-text search).
    #[serde(rename = "registry")]
    Registry,
    /// The DEX aggregator (contract-address lookup).
    #[serde(rename = "dex-pair")]
    DexPair,
}

/// A provisional token identity produced by a search.
///
/// Candidates are constructed per-search by a source, merged and deduplicated
/// by the aggregator, and discarded once the client selects one. The
/// `confidence` score is purely a ranking hint and is never persisted.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenCandidate {
    /// Origin of this candidate.
    pub source: CandidateSource,

    /// Opaque ID in the origin system (registry slug, or contract address).
    pub external_id: String,

    /// Ticker symbol, display case preserved (e.g. "TAO").
    pub symbol: String,

    /// Full name, display case preserved (e.g. "Bittensor").
    pub name: String,

    /// True for a chain's native asset with no on-chain contract. The
    /// address is then encoded as `native:<registry-id>`.
    pub is_native: bool,

    /// Contract address; absent for native tokens.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_address: Option<String>,

    /// Canonical network key; absent for native tokens.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,

    /// Project website, not yet validated or normalized.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    /// Whitepaper link, if the source provides one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whitepaper_url: Option<String>,

    /// Market capitalization in USD, from whichever source knew it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<f64>,

    /// Best-pair liquidity in USD. Sources without a liquidity concept
    /// (the registry, native tokens) report an always-sufficient sentinel.
    pub liquidity_usd: f64,

    /// Heuristic ranking score, 0-100. Higher = better match.
    pub confidence: u8,

    /// Token icon/logo URL, for the selection UI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl TokenCandidate {
    /// Case-insensitive identity key used for deduplication.
    pub fn identity_key(&self) -> (String, String) {
        (self.symbol.to_lowercase(), self.name.to_lowercase())
    }
}

/// The outcome of an aggregated search: the top candidates, ranked by
/// confidence.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RankedCandidates {
    /// Deduplicated candidates, highest confidence first, at most five.
    pub candidates: Vec<TokenCandidate>,

    /// UX hint: true when exactly one candidate remained and its confidence
    /// clears the auto-select threshold. The caller still makes the final
    /// selection; this never skips the admission step.
    pub auto_select: bool,
}
