//! Error types for the Hub 6 client.

use reqwest::StatusCode;
use thiserror::Error;

/// Result type alias using [`FetchError`].
pub type Result<T> = std::result::Result<T, FetchError>;

/// Errors that can occur while fetching a resource from the hub.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not be built (e.g. the address is not a valid host).
    #[error("Failed to build request for {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Connecting, sending, or reading the response body failed.
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The hub answered with a status outside 200-299.
    #[error("Unexpected status {status} from {url}")]
    Status { url: String, status: StatusCode },

    /// Neither the strict nor the lenient decode pass accepted the body.
    #[error("Failed to decode JSON from {url} (strict then lenient): {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Coarse classification of a [`FetchError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    Request,
    Transport,
    Status,
    Decode,
}

impl FetchErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchErrorKind::Request => "request",
            FetchErrorKind::Transport => "transport",
            FetchErrorKind::Status => "status",
            FetchErrorKind::Decode => "decode",
        }
    }
}

impl std::fmt::Display for FetchErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FetchError {
    /// Classify this error.
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::Request { .. } => FetchErrorKind::Request,
            FetchError::Transport { .. } => FetchErrorKind::Transport,
            FetchError::Status { .. } => FetchErrorKind::Status,
            FetchError::Decode { .. } => FetchErrorKind::Decode,
        }
    }

    /// The URL of the request that failed.
    pub fn url(&self) -> &str {
        match self {
            FetchError::Request { url, .. }
            | FetchError::Transport { url, .. }
            | FetchError::Status { url, .. }
            | FetchError::Decode { url, .. } => url,
        }
    }
}
