use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    routing::{get, post},
    Json, Router,
};

use crate::{
    error::ApiResult,
    main_lib::AppState,
    models::{AddTokenRequest, AddTokenResponse, NetworkDto, SearchTokensResponse},
};
use coinlens_core::Error as CoreError;
use coinlens_resolver::SUPPORTED_NETWORKS;

/// Queries shorter than this don't fan out to the sources at all.
const MIN_QUERY_CHARS: usize = 2;

/// Client identifier for rate limiting: first entry of the forwarded-for
/// header, or a sentinel when absent.
fn client_ip(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|ip| ip.trim().to_string())
        .filter(|ip| !ip.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

async fn add_token(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<AddTokenRequest>,
) -> ApiResult<Json<AddTokenResponse>> {
    if !state.submission_limiter.check(&client_ip(&headers)) {
        return Err(CoreError::RateLimited.into());
    }

    let admitted = state.admission_service.admit(body.into()).await?;
    Ok(Json(admitted.into()))
}

#[derive(serde::Deserialize)]
struct SearchQuery {
    #[serde(default)]
    q: String,
}

async fn search_tokens(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> ApiResult<Json<SearchTokensResponse>> {
    let query = params.q.trim();
    if query.chars().count() < MIN_QUERY_CHARS {
        return Ok(Json(SearchTokensResponse::empty()));
    }

    let ranked = state.aggregator.search(query).await;
    Ok(Json(ranked.into()))
}

async fn list_networks() -> Json<Vec<NetworkDto>> {
    Json(
        SUPPORTED_NETWORKS
            .iter()
            .map(|network| NetworkDto {
                value: network.key.to_string(),
                display: network.display.to_string(),
            })
            .collect(),
    )
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/add-token", post(add_token))
        .route("/search-tokens", get(search_tokens))
        .route("/networks", get(list_networks))
}
