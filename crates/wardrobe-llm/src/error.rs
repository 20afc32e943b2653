//! Error types for wardrobe-llm

use thiserror::Error;

/// LLM error type
#[derive(Debug, Error)]
pub enum Error {
    /// Provider not configured (missing credential, unsupported provider)
    #[error("provider not configured: {0}")]
    NotConfigured(String),

    /// API error returned by the provider
    #[error("api error: {0}")]
    Api(String),

    /// Invalid response
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Network error
    #[error("network error: {0}")]
    Network(String),

    /// Timeout
    #[error("timeout after {0}ms")]
    Timeout(u64),

    /// Model has no rate table entry and no default is defined
    #[error("no pricing for model '{0}' and no default pricing model defined")]
    UnknownModel(String),

    /// Usage limits out of range
    #[error("invalid usage limits: {0}")]
    InvalidLimits(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
