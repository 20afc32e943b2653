//! Error types for wardrobe-core
//!
//! Denials and generation failures are returned as values; callers map
//! them to whatever transport they sit behind.

use thiserror::Error;
use wardrobe_llm::DenialReason;

/// Why a completed or attempted model call produced no recommendation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationFailure {
    /// The provider call itself failed (network, auth, timeout, API error)
    #[error("transport error: {0}")]
    Transport(String),

    /// The reply was not JSON
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The reply was JSON but not in the outfit schema
    #[error("schema violation: {0}")]
    SchemaViolation(String),
}

impl From<wardrobe_llm::Error> for GenerationFailure {
    fn from(err: wardrobe_llm::Error) -> Self {
        match err {
            wardrobe_llm::Error::InvalidResponse(_) => Self::MalformedResponse(err.to_string()),
            other => Self::Transport(other.to_string()),
        }
    }
}

/// Per-request failure of the recommendation contract
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecommendationError {
    /// The usage gate refused the call; nothing was dispatched
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(DenialReason),

    /// The call was attempted and failed
    #[error("Failed to generate outfit: {0}")]
    GenerationFailed(GenerationFailure),
}

impl RecommendationError {
    /// Whether the caller should back off and retry later
    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimitExceeded(_))
    }

    /// HTTP-style status hint: 429 for rate limits, 500 otherwise
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::RateLimitExceeded(_) => 429,
            Self::GenerationFailed(_) => 500,
        }
    }
}

impl From<GenerationFailure> for RecommendationError {
    fn from(failure: GenerationFailure) -> Self {
        Self::GenerationFailed(failure)
    }
}

/// Fatal configuration problems found while building an engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Model has no rate entry and no default pricing is designated
    #[error("model '{0}' has no pricing and no default pricing model is defined")]
    UnknownModelConfigured(String),

    /// Live mode selected without a provider credential
    #[error("no credential for provider '{0}'; set OPENAI_API_KEY or enable demo mode")]
    MissingCredential(String),

    /// Provider name not supported
    #[error("provider '{0}' not yet implemented")]
    UnsupportedProvider(String),

    /// Limits are zero or otherwise unusable
    #[error("invalid usage limits: {0}")]
    InvalidLimits(String),
}

/// Core error type
#[derive(Debug, Error)]
pub enum Error {
    /// Inventory lookup or mutation failed
    #[error("inventory error: {0}")]
    Inventory(String),

    /// Attribute tagging failed
    #[error("tagging error: {0}")]
    Tagging(String),

    /// File I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Recommendation denied or failed
    #[error(transparent)]
    Recommendation(#[from] RecommendationError),

    /// Engine configuration error
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl Error {
    /// Whether this is a usage-gate denial
    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::Recommendation(e) if e.is_rate_limited())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let denied = RecommendationError::RateLimitExceeded(DenialReason::DailyLimitExceeded {
            limit: 2,
        });
        assert_eq!(denied.status_code(), 429);
        assert!(denied.is_rate_limited());

        let failed: RecommendationError = GenerationFailure::MalformedResponse("eof".into()).into();
        assert_eq!(failed.status_code(), 500);
        assert!(!failed.is_rate_limited());
    }

    #[test]
    fn test_denial_message_carries_reason() {
        let err = RecommendationError::RateLimitExceeded(DenialReason::HourlyLimitExceeded {
            limit: 10,
        });
        assert_eq!(
            err.to_string(),
            "Rate limit exceeded: Hourly request limit reached (10 requests)"
        );
    }

    #[test]
    fn test_llm_error_becomes_transport_failure() {
        let failure: GenerationFailure = wardrobe_llm::Error::Timeout(60_000).into();
        assert!(matches!(failure, GenerationFailure::Transport(msg) if msg.contains("timeout")));
    }

    #[test]
    fn test_invalid_llm_response_is_malformed() {
        let failure: GenerationFailure =
            wardrobe_llm::Error::InvalidResponse("truncated body".into()).into();
        assert!(matches!(failure, GenerationFailure::MalformedResponse(_)));
    }

    #[test]
    fn test_core_error_rate_limit_detection() {
        let err: Error = RecommendationError::RateLimitExceeded(
            DenialReason::MonthlyBudgetExceeded { budget: 5.0 },
        )
        .into();
        assert!(err.is_rate_limited());
        assert!(!Error::Inventory("gone".into()).is_rate_limited());
    }
}
