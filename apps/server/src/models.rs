//! API request/response models (camelCase JSON at the boundary).

use serde::{Deserialize, Serialize};

use coinlens_core::tokens::{AdmittedToken, TokenSubmission};
use coinlens_resolver::{CandidateSource, RankedCandidates, TokenCandidate};

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AddTokenRequest {
    pub contract_address: String,
    pub network: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whitepaper_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whitepaper_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl From<AddTokenRequest> for TokenSubmission {
    fn from(req: AddTokenRequest) -> Self {
        Self {
            contract_address: req.contract_address,
            network: req.network,
            website_url: req.website_url,
            whitepaper_url: req.whitepaper_url,
            whitepaper_content: req.whitepaper_content,
            symbol: req.symbol,
            name: req.name,
        }
    }
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AddTokenResponse {
    pub success: bool,
    pub token_id: String,
    pub symbol: String,
    pub has_website: bool,
    pub liquidity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_usd: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<f64>,
    pub analysis_status: String,
    pub message: String,
}

impl From<AdmittedToken> for AddTokenResponse {
    fn from(admitted: AdmittedToken) -> Self {
        let analysis_status = if admitted.analysis_pending {
            "pending"
        } else {
            "not_applicable"
        }
        .to_string();

        Self {
            success: true,
            token_id: admitted.token_id,
            symbol: admitted.symbol,
            has_website: admitted.has_website,
            liquidity: admitted.liquidity_usd,
            price_usd: admitted.price_usd,
            market_cap: admitted.market_cap,
            analysis_status,
            message:
                "Token added successfully! Website analysis in progress (may take 1-2 minutes)."
                    .to_string(),
        }
    }
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CandidateDto {
    pub source: String,
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub is_native: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whitepaper: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<f64>,
    pub confidence: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl From<TokenCandidate> for CandidateDto {
    fn from(candidate: TokenCandidate) -> Self {
        let source = match candidate.source {
            CandidateSource::Registry => "registry",
            CandidateSource::DexPair => "dex-pair",
        }
        .to_string();

        Self {
            source,
            id: candidate.external_id,
            symbol: candidate.symbol,
            name: candidate.name,
            is_native: candidate.is_native,
            contract_address: candidate.contract_address,
            network: candidate.network,
            website: candidate.website,
            whitepaper: candidate.whitepaper_url,
            market_cap: candidate.market_cap,
            confidence: candidate.confidence,
            image: candidate.image,
        }
    }
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SearchTokensResponse {
    pub candidates: Vec<CandidateDto>,
    pub auto_select: bool,
}

impl From<RankedCandidates> for SearchTokensResponse {
    fn from(ranked: RankedCandidates) -> Self {
        Self {
            candidates: ranked.candidates.into_iter().map(CandidateDto::from).collect(),
            auto_select: ranked.auto_select,
        }
    }
}

impl SearchTokensResponse {
    pub fn empty() -> Self {
        Self {
            candidates: Vec::new(),
            auto_select: false,
        }
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct NetworkDto {
    pub value: String,
    pub display: String,
}
