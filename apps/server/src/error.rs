//! API error mapping.
//!
//! Converts core errors into the HTTP status taxonomy and the JSON error
//! body shape the clients expect.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use coinlens_core::Error as CoreError;

/// Wrapper implementing `IntoResponse` for core errors.
pub struct ApiError(pub CoreError);

pub type ApiResult<T> = std::result::Result<T, ApiError>;

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self.0 {
            CoreError::Validation(_) => (StatusCode::BAD_REQUEST, json!({ "error": self.0.to_string() })),

            CoreError::NotFound(_) => (StatusCode::NOT_FOUND, json!({ "error": self.0.to_string() })),

            CoreError::Conflict { token_id, symbol } => (
                StatusCode::CONFLICT,
                json!({
                    "error": self.0.to_string(),
                    "tokenId": token_id,
                    "symbol": symbol,
                }),
            ),

            CoreError::InsufficientLiquidity { liquidity_usd, .. } => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": self.0.to_string(),
                    "liquidity": liquidity_usd,
                }),
            ),

            CoreError::NeedsWebsite {
                symbol,
                liquidity_usd,
            } => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": self.0.to_string(),
                    "needsWebsite": true,
                    "symbol": symbol,
                    "liquidity": liquidity_usd,
                }),
            ),

            CoreError::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                json!({ "error": self.0.to_string() }),
            ),

            CoreError::Upstream(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": self.0.to_string() }),
            ),

            CoreError::Config(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Server configuration error." }),
            ),

            CoreError::Database(_) | CoreError::Resolver(_) => {
                tracing::error!("Internal error: {}", self.0);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Unexpected error. Please try again." }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: CoreError) -> StatusCode {
        ApiError(err).into_response().status()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_of(CoreError::Validation("bad".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(CoreError::NotFound("missing".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(CoreError::Conflict {
                token_id: None,
                symbol: None
            }),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(CoreError::InsufficientLiquidity {
                liquidity_usd: 50.0,
                floor_usd: 100.0
            }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(CoreError::NeedsWebsite {
                symbol: None,
                liquidity_usd: None
            }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status_of(CoreError::RateLimited), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            status_of(CoreError::Upstream("HTTP 500".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
