//! Confidence scoring for search candidates.
//!
//! The magnitudes here are tuning parameters, not contracts: the only
//! guarantee is that better matches score higher. Keep them as named
//! constants so ranking behavior can be adjusted in one place.

/// Base confidence for any registry match.
pub const BASE_CONFIDENCE: u8 = 50;

/// Bonus when the ticker symbol matches the query exactly (case-insensitive).
pub const EXACT_SYMBOL_BONUS: u8 = 30;

/// Bonus when the name contains the query as a substring (case-insensitive).
pub const NAME_CONTAINS_BONUS: u8 = 20;

/// Bonus when the registry ranks the coin within the top [`TOP_RANK_CUTOFF`].
pub const TOP_RANK_BONUS: u8 = 10;

/// Popularity-rank cutoff for [`TOP_RANK_BONUS`].
pub const TOP_RANK_CUTOFF: u32 = 100;

/// Liquidity above which a DEX pair is treated as a high-trust signal.
///
/// Deliberately independent from the admission gate's minimal liquidity
/// floor: this one drives ranking, that one filters dead tokens.
pub const DEX_HIGH_LIQUIDITY_USD: f64 = 100_000.0;

/// Confidence for a DEX candidate whose best pair clears
/// [`DEX_HIGH_LIQUIDITY_USD`].
pub const DEX_HIGH_CONFIDENCE: u8 = 70;

/// Confidence for any other DEX candidate.
pub const DEX_LOW_CONFIDENCE: u8 = 50;

/// A lone candidate scoring above this is flagged as the default choice.
pub const AUTO_SELECT_THRESHOLD: u8 = 80;

/// Maximum number of candidates returned to the caller.
pub const MAX_CANDIDATES: usize = 5;

/// Liquidity sentinel for candidates without a liquidity concept (registry
/// matches and native coins are treated as always-sufficient).
pub const REGISTRY_LIQUIDITY_SENTINEL_USD: f64 = 1_000_000.0;

/// Score a registry search hit against the query.
pub fn registry_confidence(
    query: &str,
    symbol: &str,
    name: &str,
    market_cap_rank: Option<u32>,
) -> u8 {
    let query = query.to_lowercase();
    let mut confidence = BASE_CONFIDENCE;

    if symbol.to_lowercase() == query {
        confidence += EXACT_SYMBOL_BONUS;
    }
    if name.to_lowercase().contains(&query) {
        confidence += NAME_CONTAINS_BONUS;
    }
    if market_cap_rank.is_some_and(|rank| rank <= TOP_RANK_CUTOFF) {
        confidence += TOP_RANK_BONUS;
    }

    confidence.min(100)
}

/// Score a DEX-pair candidate from its best pair's liquidity.
///
/// A coarse binary signal: liquidity is the primary trust signal for tokens
/// absent from the curated registry.
pub fn dex_confidence(liquidity_usd: f64) -> u8 {
    if liquidity_usd > DEX_HIGH_LIQUIDITY_USD {
        DEX_HIGH_CONFIDENCE
    } else {
        DEX_LOW_CONFIDENCE
    }
}
