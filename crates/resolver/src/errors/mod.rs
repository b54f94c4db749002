//! Error types for the token resolver crate.

use thiserror::Error;

/// Errors that can occur while querying external token sources.
///
/// A failure in one source never aborts the other: the aggregator logs the
/// error and continues with whatever the remaining sources returned. Callers
/// that need a hard failure (e.g. the admission flow re-resolving a native
/// token) match on the variant instead.
#[derive(Error, Debug)]
pub enum ResolverError {
    /// The requested coin or pair does not exist in the source.
    /// This is a terminal error - retrying won't help.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The source rate limited the request (HTTP 429).
    #[error("Rate limited: {source}")]
    RateLimited {
        /// The source that rate limited the request
        source: String,
    },

    /// The request to the source timed out.
    #[error("Timeout: {source}")]
    Timeout {
        /// The source that timed out
        source: String,
    },

    /// A source-specific error occurred (unexpected status, bad payload).
    #[error("Source error: {source} - {message}")]
    SourceError {
        /// The source that returned the error
        source: String,
        /// The error message from the source
        message: String,
    },

    /// A network error occurred while communicating with a source.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = ResolverError::NotFound("bitcorn".to_string());
        assert_eq!(format!("{}", error), "Not found: bitcorn");

        let error = ResolverError::RateLimited {
            source: "COINGECKO".to_string(),
        };
        assert_eq!(format!("{}", error), "Rate limited: COINGECKO");

        let error = ResolverError::SourceError {
            source: "DEXSCREENER".to_string(),
            message: "HTTP 500".to_string(),
        };
        assert_eq!(format!("{}", error), "Source error: DEXSCREENER - HTTP 500");
    }
}
