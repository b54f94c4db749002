//! Normalized shapes for single-item upstream lookups.
//!
//! These are what the admission flow consumes when it goes back to a source
//! for an authoritative second fetch, as opposed to the search-time
//! [`TokenCandidate`](super::TokenCandidate) shape.

/// Full registry detail for a single coin.
#[derive(Clone, Debug, PartialEq)]
pub struct RegistryCoin {
    /// Registry slug (e.g. "bitcoin").
    pub id: String,
    /// Ticker symbol, uppercased for display.
    pub symbol: String,
    /// Full name.
    pub name: String,
    /// Project homepage, first non-empty entry.
    pub website: Option<String>,
    /// Whitepaper link.
    pub whitepaper_url: Option<String>,
    /// Market capitalization in USD.
    pub market_cap: Option<f64>,
    /// Registry popularity rank (1 = largest market cap).
    pub market_cap_rank: Option<u32>,
    /// Token logo URL.
    pub image: Option<String>,
    /// (network, contract address) pairs for chains the token is deployed
    /// on, with network keys already canonicalized. Empty for native coins.
    pub platforms: Vec<(String, String)>,
}

impl RegistryCoin {
    /// True if the coin has no on-chain contract on any platform.
    pub fn is_native(&self) -> bool {
        self.platforms.is_empty()
    }
}

/// The most liquid trading pair found for a contract address.
#[derive(Clone, Debug, PartialEq)]
pub struct DexPair {
    /// Pool/pair contract address.
    pub pool_address: String,
    /// Symbol of the queried token's side of the pair.
    pub symbol: String,
    /// Name of the queried token's side of the pair.
    pub name: String,
    /// Canonical network key the pair trades on.
    pub network: String,
    /// Pool liquidity in USD.
    pub liquidity_usd: f64,
    /// Market cap (or fully-diluted valuation as fallback) in USD.
    pub market_cap: Option<f64>,
    /// Project website from the pair's info block, if listed.
    pub website: Option<String>,
    /// First twitter-typed social link, if listed.
    pub twitter: Option<String>,
    /// First telegram-typed social link, if listed.
    pub telegram: Option<String>,
}
