//! Token source trait definitions.

use async_trait::async_trait;

use crate::errors::ResolverError;
use crate::models::{DexPair, RegistryCoin, TokenCandidate};

/// Trait for external token search sources.
///
/// Implement this trait to add support for a new identity source. Sources
/// are independently failable: the aggregator joins them with
/// partial-failure tolerance, so an error here never aborts a sibling
/// source's search.
///
/// "No match" is an empty list, not an error - the aggregator distinguishes
/// the two only for logging.
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Unique identifier for this source.
    ///
    /// Should be a constant string like "COINGECKO", "DEXSCREENER".
    /// Used for logging and error attribution.
    fn id(&self) -> &'static str;

    /// Search for token candidates matching the query.
    ///
    /// The query may be free text (name or symbol) or a contract address;
    /// each source decides for itself which shapes it handles and returns
    /// an empty list for the rest.
    async fn search(&self, query: &str) -> Result<Vec<TokenCandidate>, ResolverError>;
}

/// Authoritative single-coin lookup against the registry.
///
/// The admission flow uses this for the second, trusted fetch of a native
/// token's details and for best-effort market-cap probes; the search-time
/// candidate is never trusted as final.
#[async_trait]
pub trait RegistryDetailSource: Send + Sync {
    /// Fetch full details for a registry ID (e.g. "bitcoin").
    async fn coin_details(&self, registry_id: &str) -> Result<RegistryCoin, ResolverError>;

    /// Best-effort market-cap probe by ticker symbol.
    ///
    /// Returns `Ok(None)` when the registry has no matching coin or no
    /// market cap for it; transport failures still surface as errors so the
    /// caller can decide to swallow them.
    async fn market_cap_by_symbol(&self, symbol: &str) -> Result<Option<f64>, ResolverError>;
}

/// Best-pair lookup against the DEX aggregator.
#[async_trait]
pub trait PairLookupSource: Send + Sync {
    /// Find the most liquid pair referencing `address`, optionally
    /// restricted to one network. `Ok(None)` when no pair matches.
    async fn best_pair(
        &self,
        address: &str,
        network: Option<&str>,
    ) -> Result<Option<DexPair>, ResolverError>;
}
