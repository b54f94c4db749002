//! DexScreener DEX aggregator source implementation.
//!
//! This module resolves on-chain token identities from the DexScreener API
//! via the /latest/dex/tokens/{address} endpoint, which returns every
//! trading pair referencing a contract address. The pair with the highest
//! USD liquidity is taken as canonical for the token; liquidity is the
//! primary trust signal for tokens absent from the curated registry.
//!
//! No API key is required.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::aggregator::scoring;
use crate::chains::{canonical_network, looks_like_address};
use crate::errors::ResolverError;
use crate::models::{CandidateSource, DexPair, TokenCandidate};
use crate::source::{PairLookupSource, TokenSource};

const BASE_URL: &str = "https://api.dexscreener.com";
const SOURCE_ID: &str = "DEXSCREENER";

// ============================================================================
// API Response Structures
// ============================================================================

/// Response from /latest/dex/tokens/{address}
#[derive(Debug, Deserialize)]
struct TokensResponse {
    #[serde(default)]
    pairs: Option<Vec<PairEntry>>,
}

/// A single trading pair
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PairEntry {
    chain_id: String,
    pair_address: String,
    base_token: PairToken,
    quote_token: PairToken,
    liquidity: Option<PairLiquidity>,
    market_cap: Option<f64>,
    /// Fully-diluted valuation, used as market-cap fallback
    fdv: Option<f64>,
    info: Option<PairInfo>,
}

#[derive(Debug, Deserialize)]
struct PairToken {
    address: String,
    name: String,
    symbol: String,
}

#[derive(Debug, Deserialize)]
struct PairLiquidity {
    usd: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct PairInfo {
    #[serde(default)]
    websites: Vec<WebsiteEntry>,
    #[serde(default)]
    socials: Vec<SocialEntry>,
}

/// Website entries appear both as bare strings and as {url} objects
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WebsiteEntry {
    Url(String),
    Labeled { url: String },
}

impl WebsiteEntry {
    fn url(&self) -> &str {
        match self {
            WebsiteEntry::Url(url) => url,
            WebsiteEntry::Labeled { url } => url,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SocialEntry {
    #[serde(rename = "type")]
    kind: Option<String>,
    url: Option<String>,
}

// ============================================================================
// DexScreenerSource
// ============================================================================

/// DexScreener DEX aggregator source.
///
/// Only activates for address-shaped queries; free text is left to the
/// registry source.
pub struct DexScreenerSource {
    client: Client,
}

impl DexScreenerSource {
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client }
    }

    /// Fetch all pairs referencing a contract address.
    async fn fetch_pairs(&self, address: &str) -> Result<Vec<PairEntry>, ResolverError> {
        let url = format!(
            "{}/latest/dex/tokens/{}",
            BASE_URL,
            urlencoding::encode(address)
        );

        debug!("DexScreener request for {}", address);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ResolverError::Timeout {
                        source: SOURCE_ID.to_string(),
                    }
                } else {
                    ResolverError::SourceError {
                        source: SOURCE_ID.to_string(),
                        message: format!("Request failed: {}", e),
                    }
                }
            })?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ResolverError::RateLimited {
                source: SOURCE_ID.to_string(),
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ResolverError::SourceError {
                source: SOURCE_ID.to_string(),
                message: format!("HTTP {} - {}", status, body),
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| ResolverError::SourceError {
                source: SOURCE_ID.to_string(),
                message: format!("Failed to read response: {}", e),
            })?;

        let parsed: TokensResponse =
            serde_json::from_str(&text).map_err(|e| ResolverError::SourceError {
                source: SOURCE_ID.to_string(),
                message: format!("Failed to parse tokens response: {}", e),
            })?;

        Ok(parsed.pairs.unwrap_or_default())
    }
}

impl Default for DexScreenerSource {
    fn default() -> Self {
        Self::new()
    }
}

fn pair_liquidity(pair: &PairEntry) -> f64 {
    pair.liquidity.as_ref().and_then(|l| l.usd).unwrap_or(0.0)
}

/// Pick the most liquid pair, optionally restricted to one network.
/// Ties keep whichever pair appeared first in the upstream response.
fn select_best_pair(pairs: Vec<PairEntry>, network: Option<&str>) -> Option<PairEntry> {
    let wanted = network.map(canonical_network);

    let mut best: Option<PairEntry> = None;
    for pair in pairs {
        if let Some(wanted) = &wanted {
            if &canonical_network(&pair.chain_id) != wanted {
                continue;
            }
        }
        match &best {
            Some(current) if pair_liquidity(&pair) <= pair_liquidity(current) => {}
            _ => best = Some(pair),
        }
    }
    best
}

/// Map a pair to the queried token's side and the normalized pair shape.
fn map_pair(pair: PairEntry, queried_address: &str) -> DexPair {
    // Determine which side of the pair the query refers to
    let queried = queried_address.to_lowercase();
    let token = if pair.base_token.address.to_lowercase() == queried {
        &pair.base_token
    } else if pair.quote_token.address.to_lowercase() == queried {
        &pair.quote_token
    } else {
        // Shouldn't happen for a /tokens/{address} response; fall back to base
        &pair.base_token
    };

    let mut website = None;
    let mut twitter = None;
    let mut telegram = None;

    if let Some(info) = &pair.info {
        for social in &info.socials {
            let kind = social.kind.as_deref().map(str::to_lowercase);
            let url = social.url.clone().filter(|u| !u.trim().is_empty());
            match (kind.as_deref(), url) {
                (Some("website"), Some(url)) if website.is_none() => website = Some(url),
                (Some("twitter"), Some(url)) if twitter.is_none() => twitter = Some(url),
                (Some("telegram"), Some(url)) if telegram.is_none() => telegram = Some(url),
                _ => {}
            }
        }

        if website.is_none() {
            website = info
                .websites
                .iter()
                .map(|entry| entry.url().to_string())
                .find(|url| !url.trim().is_empty());
        }
    }

    DexPair {
        pool_address: pair.pair_address.clone(),
        symbol: token.symbol.clone(),
        name: token.name.clone(),
        network: canonical_network(&pair.chain_id),
        liquidity_usd: pair_liquidity(&pair),
        market_cap: pair.market_cap.or(pair.fdv),
        website,
        twitter,
        telegram,
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

#[async_trait]
impl TokenSource for DexScreenerSource {
    fn id(&self) -> &'static str {
        SOURCE_ID
    }

    async fn search(&self, query: &str) -> Result<Vec<TokenCandidate>, ResolverError> {
        // DexScreener has no usable free-text search
        if !looks_like_address(query) {
            return Ok(Vec::new());
        }

        let Some(pair) = self.best_pair(query, None).await? else {
            return Ok(Vec::new());
        };

        let confidence = scoring::dex_confidence(pair.liquidity_usd);

        Ok(vec![TokenCandidate {
            source: CandidateSource::DexPair,
            external_id: query.to_string(),
            symbol: pair.symbol,
            name: pair.name,
            is_native: false,
            contract_address: Some(query.to_string()),
            network: Some(pair.network),
            website: pair.website,
            whitepaper_url: None,
            market_cap: pair.market_cap,
            liquidity_usd: pair.liquidity_usd,
            confidence,
            image: None,
        }])
    }
}

#[async_trait]
impl PairLookupSource for DexScreenerSource {
    async fn best_pair(
        &self,
        address: &str,
        network: Option<&str>,
    ) -> Result<Option<DexPair>, ResolverError> {
        let pairs = self.fetch_pairs(address).await?;

        debug!(
            "DexScreener: {} pairs for {} (network filter: {:?})",
            pairs.len(),
            address,
            network
        );

        Ok(select_best_pair(pairs, network).map(|pair| map_pair(pair, address)))
    }
}

// ============================================================================
// Tests
// ============================================================================
