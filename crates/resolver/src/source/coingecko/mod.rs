//! CoinGecko token registry source implementation.
//!
//! This module resolves token identities from the CoinGecko API:
//! - Free-text search via the /search endpoint
//! - Full coin details via the /coins/{id} endpoint
//!
//! An API key is optional: when present it is sent as the demo-tier header,
//! when absent the source degrades to the unauthenticated rate limits. Key
//! absence is never an error.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::aggregator::scoring;
use crate::chains::{canonical_network, looks_like_address, NATIVE_PREFIX};
use crate::errors::ResolverError;
use crate::models::{CandidateSource, RegistryCoin, TokenCandidate};
use crate::source::{RegistryDetailSource, TokenSource};

const BASE_URL: &str = "https://api.coingecko.com/api/v3";
const SOURCE_ID: &str = "COINGECKO";

/// How many search hits get a full detail fetch.
const DETAIL_FETCH_LIMIT: usize = 3;

// ============================================================================
// API Response Structures
// ============================================================================

/// Response from /search
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    coins: Vec<SearchCoin>,
}

/// Individual search hit
#[derive(Debug, Deserialize)]
struct SearchCoin {
    id: String,
    symbol: String,
    name: String,
    market_cap_rank: Option<u32>,
}

/// Response from /coins/{id}
#[derive(Debug, Deserialize)]
struct CoinDetailResponse {
    id: String,
    symbol: String,
    name: String,
    /// Chain -> contract address map. Native coins report no platforms, or
    /// a single empty-string entry.
    #[serde(default)]
    platforms: HashMap<String, Option<String>>,
    links: Option<CoinLinks>,
    image: Option<CoinImage>,
    market_data: Option<CoinMarketData>,
    market_cap_rank: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct CoinLinks {
    #[serde(default)]
    homepage: Vec<String>,
    whitepaper: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CoinImage {
    large: Option<String>,
    small: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CoinMarketData {
    market_cap: Option<HashMap<String, f64>>,
}

/// Error body CoinGecko returns on failed lookups
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: Option<String>,
}

// ============================================================================
// CoinGeckoSource
// ============================================================================

/// CoinGecko token registry source.
///
/// Handles free-text queries only; address-shaped queries are left to the
/// DEX-pair source.
pub struct CoinGeckoSource {
    client: Client,
    api_key: Option<String>,
}

impl CoinGeckoSource {
    /// Create a new CoinGecko source. The API key is optional.
    pub fn new(api_key: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, api_key }
    }

    /// Make a GET request to the CoinGecko API.
    async fn fetch(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<String, ResolverError> {
        let url = format!("{}{}", BASE_URL, endpoint);

        let mut request = self.client.get(&url).header("Accept", "application/json");

        if let Some(key) = &self.api_key {
            request = request.header("x-cg-demo-api-key", key);
        }

        for (key, value) in params {
            request = request.query(&[(key, value)]);
        }

        debug!("CoinGecko request: {} with {} params", endpoint, params.len());

        let response = request.send().await.map_err(|e| {
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

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ResolverError::NotFound(endpoint.to_string()));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();

            if let Ok(error_resp) = serde_json::from_str::<ErrorResponse>(&body) {
                if let Some(error_msg) = error_resp.error {
                    return Err(ResolverError::SourceError {
                        source: SOURCE_ID.to_string(),
                        message: error_msg,
                    });
                }
            }

            return Err(ResolverError::SourceError {
                source: SOURCE_ID.to_string(),
                message: format!("HTTP {} - {}", status, body),
            });
        }

        response
            .text()
            .await
            .map_err(|e| ResolverError::SourceError {
                source: SOURCE_ID.to_string(),
                message: format!("Failed to read response: {}", e),
            })
    }

    /// Search the registry by free text.
    async fn search_coins(&self, query: &str) -> Result<Vec<SearchCoin>, ResolverError> {
        let text = self.fetch("/search", &[("query", query)]).await?;

        let response: SearchResponse =
            serde_json::from_str(&text).map_err(|e| ResolverError::SourceError {
                source: SOURCE_ID.to_string(),
                message: format!("Failed to parse search response: {}", e),
            })?;

        debug!(
            "CoinGecko: found {} search hits for '{}'",
            response.coins.len(),
            query
        );

        Ok(response.coins)
    }

    /// Fetch full details for a registry ID.
    async fn fetch_details(&self, registry_id: &str) -> Result<RegistryCoin, ResolverError> {
        let endpoint = format!("/coins/{}", urlencoding::encode(registry_id));
        let params = [
            ("localization", "false"),
            ("tickers", "false"),
            ("market_data", "true"),
            ("community_data", "false"),
            ("developer_data", "false"),
        ];

        let text = match self.fetch(&endpoint, &params).await {
            Ok(text) => text,
            // Re-attribute the 404 to the ID the caller asked about
            Err(ResolverError::NotFound(_)) => {
                return Err(ResolverError::NotFound(registry_id.to_string()))
            }
            Err(e) => return Err(e),
        };

        let response: CoinDetailResponse =
            serde_json::from_str(&text).map_err(|e| ResolverError::SourceError {
                source: SOURCE_ID.to_string(),
                message: format!("Failed to parse coin detail response: {}", e),
            })?;

        Ok(map_detail(response))
    }
}

/// Map a raw detail response to the normalized registry shape.
fn map_detail(response: CoinDetailResponse) -> RegistryCoin {
    let website = response
        .links
        .as_ref()
        .and_then(|l| l.homepage.iter().find(|url| !url.trim().is_empty()))
        .cloned();

    let whitepaper_url = response
        .links
        .as_ref()
        .and_then(|l| l.whitepaper.clone())
        .filter(|url| !url.trim().is_empty());

    let market_cap = response
        .market_data
        .as_ref()
        .and_then(|md| md.market_cap.as_ref())
        .and_then(|caps| caps.get("usd").copied());

    let image = response
        .image
        .as_ref()
        .and_then(|img| img.large.clone().or_else(|| img.small.clone()));

    // Native coins report an empty platform map or blank entries
    let platforms: Vec<(String, String)> = response
        .platforms
        .into_iter()
        .filter_map(|(network, address)| {
            let address = address.unwrap_or_default();
            if network.trim().is_empty() || address.trim().is_empty() {
                None
            } else {
                Some((canonical_network(&network), address))
            }
        })
        .collect();

    RegistryCoin {
        id: response.id,
        symbol: response.symbol.to_uppercase(),
        name: response.name,
        website,
        whitepaper_url,
        market_cap,
        market_cap_rank: response.market_cap_rank,
        image,
        platforms,
    }
}

/// Build a search candidate from a search hit plus its detail fetch.
///
/// Confidence is scored against the search hit's symbol/name/rank; the
/// detail fetch contributes identity and profile fields.
fn build_candidate(query: &str, hit: &SearchCoin, detail: RegistryCoin) -> TokenCandidate {
    let confidence =
        scoring::registry_confidence(query, &hit.symbol, &hit.name, hit.market_cap_rank);

    let is_native = detail.is_native();
    let (contract_address, network) = detail
        .platforms
        .first()
        .map(|(network, address)| (Some(address.clone()), Some(network.clone())))
        .unwrap_or((None, None));

    let external_id = if is_native {
        format!("{}{}", NATIVE_PREFIX, detail.id)
    } else {
        detail.id.clone()
    };

    TokenCandidate {
        source: CandidateSource::Registry,
        external_id,
        symbol: detail.symbol,
        name: detail.name,
        is_native,
        contract_address,
        network,
        website: detail.website,
        whitepaper_url: detail.whitepaper_url,
        market_cap: detail.market_cap,
        liquidity_usd: scoring::REGISTRY_LIQUIDITY_SENTINEL_USD,
        confidence,
        image: detail.image,
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

#[async_trait]
impl TokenSource for CoinGeckoSource {
    fn id(&self) -> &'static str {
        SOURCE_ID
    }

    async fn search(&self, query: &str) -> Result<Vec<TokenCandidate>, ResolverError> {
        // Contract addresses can't be searched against the registry;
        // the DEX-pair source handles those.
        if looks_like_address(query) {
            return Ok(Vec::new());
        }

        let hits = self.search_coins(query).await?;
        let top_hits: Vec<SearchCoin> = hits.into_iter().take(DETAIL_FETCH_LIMIT).collect();

        // Detail fetches run concurrently; an individual failure drops that
        // candidate only.
        let details = join_all(
            top_hits
                .iter()
                .map(|hit| self.fetch_details(&hit.id)),
        )
        .await;

        let mut candidates = Vec::with_capacity(top_hits.len());
        for (hit, detail) in top_hits.iter().zip(details) {
            match detail {
                Ok(detail) => candidates.push(build_candidate(query, hit, detail)),
                Err(e) => {
                    warn!("CoinGecko: detail fetch for '{}' failed: {}", hit.id, e);
                }
            }
        }

        Ok(candidates)
    }
}

#[async_trait]
impl RegistryDetailSource for CoinGeckoSource {
    async fn coin_details(&self, registry_id: &str) -> Result<RegistryCoin, ResolverError> {
        debug!("Fetching registry details for '{}'", registry_id);
        self.fetch_details(registry_id).await
    }

    async fn market_cap_by_symbol(&self, symbol: &str) -> Result<Option<f64>, ResolverError> {
        // The registry keys coins by slug; lowercased tickers resolve for
        // the common case and miss harmlessly otherwise.
        match self.fetch_details(&symbol.to_lowercase()).await {
            Ok(detail) => Ok(detail.market_cap),
            Err(ResolverError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chains;

    fn detail_from_json(json: &str) -> RegistryCoin {
        map_detail(serde_json::from_str(json).unwrap())
    }

    #[test]
    fn test_source_id() {
        let source = CoinGeckoSource::new(None);
        assert_eq!(source.id(), "COINGECKO");
    }

    #[test]
    fn test_search_response_parsing() {
        let json = r#"{
            "coins": [
                {
                    "id": "bittensor",
                    "name": "Bittensor",
                    "symbol": "TAO",
                    "market_cap_rank": 27,
                    "thumb": "https://assets.coingecko.com/coins/images/28452/thumb/ARUsPeNQ.png"
                },
                {
                    "id": "tao-ceti",
                    "name": "TAO CETI",
                    "symbol": "TAOCAT",
                    "market_cap_rank": null
                }
            ]
        }"#;

        let response: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.coins.len(), 2);
        assert_eq!(response.coins[0].id, "bittensor");
        assert_eq!(response.coins[0].market_cap_rank, Some(27));
        assert_eq!(response.coins[1].market_cap_rank, None);
    }

    #[test]
    fn test_detail_parsing_contract_token() {
        let json = r#"{
            "id": "dai",
            "symbol": "dai",
            "name": "Dai",
            "platforms": {
                "ethereum": "0x6b175474e89094c44da98b954eedeac495271d0f",
                "polygon-pos": "0x8f3cf7ad23cd3cadbd9735aff958023239c6a063"
            },
            "links": {
                "homepage": ["", "https://makerdao.com"],
                "whitepaper": ""
            },
            "image": {"large": "https://assets.coingecko.com/coins/images/9956/large/dai.png"},
            "market_data": {"market_cap": {"usd": 5300000000.0}},
            "market_cap_rank": 24
        }"#;

        let coin = detail_from_json(json);
        assert_eq!(coin.symbol, "DAI");
        assert!(!coin.is_native());
        // Blank homepage entries are skipped, blank whitepaper dropped
        assert_eq!(coin.website.as_deref(), Some("https://makerdao.com"));
        assert_eq!(coin.whitepaper_url, None);
        assert_eq!(coin.market_cap, Some(5_300_000_000.0));
        // Platform keys are canonicalized
        assert!(coin
            .platforms
            .iter()
            .any(|(network, _)| network == "polygon"));
    }

    #[test]
    fn test_detail_parsing_native_coin() {
        let json = r#"{
            "id": "bitcoin",
            "symbol": "btc",
            "name": "Bitcoin",
            "platforms": {"": ""},
            "links": {
                "homepage": ["http://www.bitcoin.org"],
                "whitepaper": "https://bitcoin.org/bitcoin.pdf"
            },
            "image": {"large": "https://assets.coingecko.com/coins/images/1/large/bitcoin.png"},
            "market_data": {"market_cap": {"usd": 1200000000000.0}},
            "market_cap_rank": 1
        }"#;

        let coin = detail_from_json(json);
        assert!(coin.is_native());
        assert_eq!(coin.website.as_deref(), Some("http://www.bitcoin.org"));
        assert_eq!(
            coin.whitepaper_url.as_deref(),
            Some("https://bitcoin.org/bitcoin.pdf")
        );
    }

    #[test]
    fn test_build_candidate_native() {
        let hit = SearchCoin {
            id: "bitcoin".to_string(),
            symbol: "BTC".to_string(),
            name: "Bitcoin".to_string(),
            market_cap_rank: Some(1),
        };
        let detail = RegistryCoin {
            id: "bitcoin".to_string(),
            symbol: "BTC".to_string(),
            name: "Bitcoin".to_string(),
            website: Some("http://www.bitcoin.org".to_string()),
            whitepaper_url: None,
            market_cap: Some(1.2e12),
            market_cap_rank: Some(1),
            image: None,
            platforms: Vec::new(),
        };

        let candidate = build_candidate("btc", &hit, detail);
        assert!(candidate.is_native);
        assert_eq!(candidate.external_id, "native:bitcoin");
        assert_eq!(candidate.contract_address, None);
        assert_eq!(candidate.network, None);
        assert!(chains::is_native_ref(&candidate.external_id));
        // Exact symbol + top rank on top of base
        assert_eq!(
            candidate.confidence,
            scoring::BASE_CONFIDENCE + scoring::EXACT_SYMBOL_BONUS + scoring::TOP_RANK_BONUS
        );
    }

    #[test]
    fn test_build_candidate_contract_token() {
        let hit = SearchCoin {
            id: "dai".to_string(),
            symbol: "DAI".to_string(),
            name: "Dai".to_string(),
            market_cap_rank: Some(24),
        };
        let detail = RegistryCoin {
            id: "dai".to_string(),
            symbol: "DAI".to_string(),
            name: "Dai".to_string(),
            website: Some("https://makerdao.com".to_string()),
            whitepaper_url: None,
            market_cap: None,
            market_cap_rank: Some(24),
            image: None,
            platforms: vec![(
                "ethereum".to_string(),
                "0x6b175474e89094c44da98b954eedeac495271d0f".to_string(),
            )],
        };

        let candidate = build_candidate("maker", &hit, detail);
        assert!(!candidate.is_native);
        assert_eq!(candidate.external_id, "dai");
        assert_eq!(
            candidate.contract_address.as_deref(),
            Some("0x6b175474e89094c44da98b954eedeac495271d0f")
        );
        assert_eq!(candidate.network.as_deref(), Some("ethereum"));
        assert_eq!(
            candidate.liquidity_usd,
            scoring::REGISTRY_LIQUIDITY_SENTINEL_USD
        );
    }

    #[tokio::test]
    async fn test_search_skips_address_queries() {
        let source = CoinGeckoSource::new(None);
        let candidates = source
            .search("0x6B175474E89094C44Da98b954EedeAC495271d0F")
            .await
            .unwrap();
        assert!(candidates.is_empty());
    }
}
