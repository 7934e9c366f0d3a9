//! Unified SDK error types.

use thiserror::Error;

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Trade source error: {0}")]
    Source(#[from] SourceError),

    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// HTTP-layer errors.
#[derive(Error, Debug)]
pub enum HttpError {
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Query encoding failed: {0}")]
    Encode(#[from] serde_urlencoded::ser::Error),
}

/// Failure signals raised by a trade record source.
///
/// Only `RateLimited` is recoverable by waiting; everything else ends the
/// fetch for the current instrument.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("HTTP error: {0}")]
    Http(HttpError),

    #[error("{0}")]
    Other(String),
}

impl SourceError {
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, SourceError::RateLimited { .. })
    }
}

impl From<HttpError> for SourceError {
    fn from(e: HttpError) -> Self {
        match e {
            HttpError::RateLimited { retry_after_ms } => SourceError::RateLimited { retry_after_ms },
            other => SourceError::Http(other),
        }
    }
}

/// Authentication errors.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("API credentials are not configured")]
    MissingCredentials,

    #[error("Invalid API secret")]
    InvalidSecret,
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing environment variable {0}")]
    MissingVar(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_rate_limit_maps_to_source_rate_limit() {
        let e: SourceError = HttpError::RateLimited {
            retry_after_ms: Some(1000),
        }
        .into();
        assert!(e.is_rate_limited());
        assert!(matches!(
            e,
            SourceError::RateLimited {
                retry_after_ms: Some(1000)
            }
        ));
    }

    #[test]
    fn test_other_http_errors_are_not_rate_limits() {
        let e: SourceError = HttpError::ServerError {
            status: 503,
            body: "maintenance".to_string(),
        }
        .into();
        assert!(!e.is_rate_limited());
        assert_eq!(e.to_string(), "HTTP error: Server error 503: maintenance");
    }
}
