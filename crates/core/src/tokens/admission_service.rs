//! The admission gate: validation, uniqueness, liquidity, handoff.
//!
//! Checks run in sequence and short-circuit on failure. The duplicate
//! pre-check exists to fail fast; under concurrent submissions the store's
//! unique constraint is what actually decides the winner. Ingestion is
//! dispatched before the record is persisted, so a failed ingestion leaves
//! nothing durable.

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};

use coinlens_resolver::chains::{
    canonical_network, is_native_ref, is_valid_address, native_registry_id, normalize_address,
};
use coinlens_resolver::{PairLookupSource, RegistryDetailSource, ResolverError};

use super::tokens_model::{
    AdmittedToken, IngestionRequest, NewTrackedToken, TokenSubmission,
};
use super::tokens_traits::{AdmissionServiceTrait, IngestionClientTrait, TokenRepositoryTrait};
use crate::errors::{DatabaseError, Error, Result};

/// Liquidity floor for on-chain tokens, inclusive: $100 admits, $99 rejects.
///
/// Intentionally far below the scoring module's high-confidence threshold:
/// this is a dead-token filter, not a quality filter. Keep the two
/// independently tunable.
pub const MIN_LIQUIDITY_USD: f64 = 100.0;

/// Liquidity recorded for tokens that bypass the DEX check (native coins
/// and caller-confirmed registry data).
pub const NATIVE_LIQUIDITY_SENTINEL_USD: f64 = 1_000_000.0;

/// Pasted whitepaper text is truncated to bound the downstream payload.
pub const WHITEPAPER_MAX_CHARS: usize = 240_000;

/// Sentinel recorded when whitepaper content arrives without a URL.
pub const MANUAL_WHITEPAPER_SENTINEL: &str = "MANUALLY_PROVIDED";

/// Native tokens are tracked and dispatched under this pseudo-network.
pub const NATIVE_NETWORK: &str = "other";

/// Submission channel marker on the ingestion payload.
const INGESTION_SOURCE: &str = "manual";

/// What the resolution branch settles on before overrides and handoff.
#[derive(Debug)]
struct ResolvedIdentity {
    symbol: String,
    name: String,
    website: Option<String>,
    pool_address: Option<String>,
    liquidity_usd: f64,
    market_cap: Option<f64>,
}

/// Service implementing the admission sequence.
pub struct AdmissionService {
    repository: Arc<dyn TokenRepositoryTrait>,
    registry: Arc<dyn RegistryDetailSource>,
    dex: Arc<dyn PairLookupSource>,
    ingestion: Arc<dyn IngestionClientTrait>,
}

impl AdmissionService {
    pub fn new(
        repository: Arc<dyn TokenRepositoryTrait>,
        registry: Arc<dyn RegistryDetailSource>,
        dex: Arc<dyn PairLookupSource>,
        ingestion: Arc<dyn IngestionClientTrait>,
    ) -> Self {
        Self {
            repository,
            registry,
            dex,
            ingestion,
        }
    }

    /// Authoritative registry re-fetch for a native token. The search-time
    /// candidate is not trusted as final.
    async fn resolve_native(&self, address: &str) -> Result<ResolvedIdentity> {
        let registry_id = native_registry_id(address)
            .ok_or_else(|| Error::Validation("Invalid native token reference.".to_string()))?;

        let coin = match self.registry.coin_details(registry_id).await {
            Ok(coin) => coin,
            Err(e) => {
                if !matches!(e, ResolverError::NotFound(_)) {
                    warn!("Registry lookup for '{}' failed: {}", registry_id, e);
                }
                return Err(Error::NotFound(format!(
                    "Token '{}' not found in the registry. Please verify the registry ID.",
                    registry_id
                )));
            }
        };

        Ok(ResolvedIdentity {
            symbol: coin.symbol,
            name: coin.name,
            website: coin.website,
            pool_address: None,
            liquidity_usd: NATIVE_LIQUIDITY_SENTINEL_USD,
            market_cap: coin.market_cap,
        })
    }

    /// Caller-confirmed registry data: the search step already supplied
    /// symbol, name and website, so the slower DEX lookup is skipped
    /// entirely. Market cap is probed separately, best-effort.
    async fn resolve_confirmed(&self, symbol: &str, name: &str) -> ResolvedIdentity {
        debug!("Using confirmed registry data for {} - skipping DEX lookup", symbol);

        ResolvedIdentity {
            symbol: symbol.to_string(),
            name: name.to_string(),
            website: None, // the caller's website merges in as an override
            pool_address: None,
            liquidity_usd: NATIVE_LIQUIDITY_SENTINEL_USD,
            market_cap: self.probe_market_cap(symbol).await,
        }
    }

    /// Raw contract address with no prior registry data: resolve identity
    /// and liquidity from the best DEX pair on the requested network.
    async fn resolve_onchain(&self, address: &str, network: &str) -> Result<ResolvedIdentity> {
        let pair = match self.dex.best_pair(address, Some(network)).await {
            Ok(Some(pair)) => pair,
            Ok(None) => {
                return Err(Error::NotFound(
                    "Token not found on any DEX. Please ensure the token is listed on a DEX."
                        .to_string(),
                ))
            }
            Err(e) => {
                warn!("DEX lookup for {} on {} failed: {}", address, network, e);
                return Err(Error::NotFound(
                    "Token not found on any DEX. Please ensure the token is listed on a DEX."
                        .to_string(),
                ));
            }
        };

        if pair.liquidity_usd < MIN_LIQUIDITY_USD {
            return Err(Error::InsufficientLiquidity {
                liquidity_usd: pair.liquidity_usd,
                floor_usd: MIN_LIQUIDITY_USD,
            });
        }

        let market_cap = match pair.market_cap {
            Some(mc) => Some(mc),
            None => self.probe_market_cap(&pair.symbol).await,
        };

        Ok(ResolvedIdentity {
            symbol: pair.symbol,
            name: pair.name,
            website: pair.website,
            pool_address: Some(pair.pool_address),
            liquidity_usd: pair.liquidity_usd,
            market_cap,
        })
    }

    /// Best-effort market-cap probe: optional enrichment, never blocking.
    /// Failures are logged and discarded, never bubbled.
    async fn probe_market_cap(&self, symbol: &str) -> Option<f64> {
        match self.registry.market_cap_by_symbol(symbol).await {
            Ok(found) => found,
            Err(e) => {
                debug!("Market cap probe for '{}' failed: {}", symbol, e);
                None
            }
        }
    }
}

/// Prefix scheme-less URLs with https://.
fn ensure_scheme(url: &str) -> String {
    let url = url.trim();
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

#[async_trait]
impl AdmissionServiceTrait for AdmissionService {
    async fn admit(&self, submission: TokenSubmission) -> Result<AdmittedToken> {
        let contract_address = submission.contract_address.trim();
        let raw_network = submission.network.trim();

        if contract_address.is_empty() || raw_network.is_empty() {
            return Err(Error::Validation(
                "Contract address and network are required.".to_string(),
            ));
        }

        let is_native = is_native_ref(contract_address);

        // Native tokens are tracked under a pseudo-network so the same
        // registry coin dedupes regardless of the network the caller sent.
        let network = if is_native {
            NATIVE_NETWORK.to_string()
        } else {
            canonical_network(raw_network)
        };

        if !is_native && !is_valid_address(contract_address, &network) {
            return Err(Error::Validation(
                "Invalid contract address format for the selected network.".to_string(),
            ));
        }

        let address = normalize_address(contract_address, &network);

        // Fail-fast duplicate pre-check. Not relied on for correctness:
        // the store's unique constraint decides concurrent races.
        if let Some(existing) = self.repository.find_by_contract(&address, &network)? {
            return Err(Error::Conflict {
                token_id: Some(existing.id),
                symbol: Some(existing.symbol),
            });
        }

        let confirmed_registry_data = !is_native
            && submission.symbol.is_some()
            && submission.name.is_some()
            && non_empty(submission.website_url.as_deref()).is_some();

        let resolved = if is_native {
            self.resolve_native(&address).await?
        } else if confirmed_registry_data {
            self.resolve_confirmed(
                submission.symbol.as_deref().unwrap_or_default(),
                submission.name.as_deref().unwrap_or_default(),
            )
            .await
        } else {
            self.resolve_onchain(&address, &network).await?
        };

        // Manual overrides win over anything resolved automatically
        let mut website = resolved.website.clone();
        if let Some(manual) = non_empty(submission.website_url.as_deref()) {
            website = Some(ensure_scheme(manual));
        }

        let mut whitepaper_url =
            non_empty(submission.whitepaper_url.as_deref()).map(ensure_scheme);

        let whitepaper_content = non_empty(submission.whitepaper_content.as_deref())
            .map(|content| content.chars().take(WHITEPAPER_MAX_CHARS).collect::<String>());

        if whitepaper_content.is_some() && whitepaper_url.is_none() {
            whitepaper_url = Some(MANUAL_WHITEPAPER_SENTINEL.to_string());
        }

        // A website is required for every admitted record
        let Some(website_url) = website else {
            return Err(Error::NeedsWebsite {
                symbol: Some(resolved.symbol),
                liquidity_usd: Some(resolved.liquidity_usd),
            });
        };

        let request = IngestionRequest {
            contract_address: address.clone(),
            network: network.clone(),
            symbol: resolved.symbol.clone(),
            name: resolved.name.clone(),
            pool_address: resolved.pool_address.clone(),
            website_url: website_url.clone(),
            whitepaper_url,
            whitepaper_content,
            source: INGESTION_SOURCE.to_string(),
            // Invariant: we only get here with a website resolved
            trigger_analysis: true,
            market_cap: resolved.market_cap,
        };

        // Hard failure: the record has not been durably created if
        // ingestion fails.
        let receipt = self.ingestion.dispatch(&request).await?;

        let new_token = NewTrackedToken {
            id: Some(receipt.project_id.clone()),
            symbol: resolved.symbol.clone(),
            name: resolved.name.clone(),
            contract_address: address.clone(),
            network: network.clone(),
            website_url,
            pool_address: resolved.pool_address.clone(),
            whitepaper_url: request.whitepaper_url.clone(),
            market_cap: receipt.market_cap.or(resolved.market_cap),
            liquidity_usd: resolved.liquidity_usd,
            is_native,
        };

        let token = match self.repository.insert_if_absent(new_token).await {
            Ok(token) => token,
            Err(Error::Database(DatabaseError::UniqueViolation(_))) => {
                // Lost a concurrent admission race; report the surviving record
                let existing = self.repository.find_by_contract(&address, &network)?;
                return Err(Error::Conflict {
                    token_id: existing.as_ref().map(|t| t.id.clone()),
                    symbol: existing.map(|t| t.symbol),
                });
            }
            Err(e) => return Err(e),
        };

        Ok(AdmittedToken {
            token_id: token.id,
            symbol: token.symbol,
            has_website: true,
            liquidity_usd: resolved.liquidity_usd,
            price_usd: receipt.price_usd,
            market_cap: receipt.market_cap.or(resolved.market_cap),
            analysis_pending: true,
        })
    }
}
