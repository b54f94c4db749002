//! Domain models for tracked tokens and the ingestion handoff.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A durably tracked token, as stored by the persistence layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackedToken {
    /// Record identifier (the downstream project ID when admission minted
    /// the record, a UUID otherwise).
    pub id: String,
    pub symbol: String,
    pub name: String,
    /// Normalized contract address, or `native:<registry-id>`.
    pub contract_address: String,
    /// Canonical network key.
    pub network: String,
    pub website_url: String,
    pub pool_address: Option<String>,
    pub whitepaper_url: Option<String>,
    pub market_cap: Option<f64>,
    pub liquidity_usd: f64,
    pub is_native: bool,
    pub created_at: NaiveDateTime,
}

/// Insert payload for a tracked token.
#[derive(Clone, Debug, Default)]
pub struct NewTrackedToken {
    /// Explicit record ID; the repository mints a UUID when absent.
    pub id: Option<String>,
    pub symbol: String,
    pub name: String,
    pub contract_address: String,
    pub network: String,
    pub website_url: String,
    pub pool_address: Option<String>,
    pub whitepaper_url: Option<String>,
    pub market_cap: Option<f64>,
    pub liquidity_usd: f64,
    pub is_native: bool,
}

/// A caller's request to admit a token, after candidate selection.
///
/// `contract_address` may carry the `native:<registry-id>` form. The
/// optional symbol/name/website triplet marks caller-confirmed registry
/// data, which lets the gate skip the DEX lookup entirely.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct TokenSubmission {
    pub contract_address: String,
    pub network: String,
    pub website_url: Option<String>,
    pub whitepaper_url: Option<String>,
    pub whitepaper_content: Option<String>,
    pub symbol: Option<String>,
    pub name: Option<String>,
}

/// The normalized payload handed to the downstream analysis pipeline.
///
/// Never constructed without a resolved website URL: a missing website for
/// a non-native token is an admission failure, not a degraded request.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IngestionRequest {
    /// Network-qualified, normalized-case contract address.
    pub contract_address: String,
    pub network: String,
    pub symbol: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool_address: Option<String>,
    pub website_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whitepaper_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whitepaper_content: Option<String>,
    /// Submission channel marker, always "manual" for this pipeline.
    pub source: String,
    /// True only when a website is present.
    pub trigger_analysis: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<f64>,
}

/// Identifiers and pricing returned by the downstream ingestion service.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct IngestionReceipt {
    pub project_id: String,
    pub price_usd: Option<f64>,
    pub market_cap: Option<f64>,
}

/// The successful outcome of an admission, for the caller to display.
#[derive(Clone, Debug, Serialize)]
pub struct AdmittedToken {
    pub token_id: String,
    pub symbol: String,
    pub has_website: bool,
    pub liquidity_usd: f64,
    pub price_usd: Option<f64>,
    pub market_cap: Option<f64>,
    /// True when the downstream analysis job was triggered.
    pub analysis_pending: bool,
}
