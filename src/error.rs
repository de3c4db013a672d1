//! Crate-level error types.
//!
//! [`WoncalcError`] unifies every fatal error source (configuration, HTTP
//! client construction, cache I/O, JSON) behind a single enum so callers can
//! match on the variant they care about while still using the `?` operator
//! for easy propagation.
//!
//! Per-feed failures are a separate, non-fatal type: [`FetchError`] is caught
//! at the aggregator boundary and degraded to stale data, never bubbled up.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, WoncalcError>;

/// Top-level error type returned by all public APIs.
#[derive(Debug, thiserror::Error)]
pub enum WoncalcError {
    /// A required configuration value is missing or malformed.
    #[error("configuration error: {0}")]
    Config(String),

    /// The HTTP client could not be constructed.
    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),

    /// The cache file could not be read or written.
    #[error("cache error: {0}")]
    Cache(#[from] std::io::Error),

    /// JSON serialization or deserialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A single price feed failed for one refresh cycle.
///
/// Adapters convert every upstream failure into one of these variants at
/// their boundary; nothing is allowed to panic or propagate past a feed.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The upstream was unreachable, timed out, or returned a non-2xx status.
    #[error("{feed}: network error: {detail}")]
    Network { feed: &'static str, detail: String },

    /// The response body was missing an expected field or structure.
    #[error("{feed}: unexpected response shape: {detail}")]
    UpstreamShape { feed: &'static str, detail: String },

    /// The response was well-formed but contained no matching item,
    /// e.g. no published gold price on a non-trading day.
    #[error("{feed}: not found: {detail}")]
    NotFound { feed: &'static str, detail: String },

    /// A credential the feed requires is not configured.
    #[error("{feed}: missing configuration: {detail}")]
    Config { feed: &'static str, detail: String },
}

impl FetchError {
    /// The feed this failure came from.
    pub fn feed(&self) -> &'static str {
        match self {
            FetchError::Network { feed, .. }
            | FetchError::UpstreamShape { feed, .. }
            | FetchError::NotFound { feed, .. }
            | FetchError::Config { feed, .. } => feed,
        }
    }
}
