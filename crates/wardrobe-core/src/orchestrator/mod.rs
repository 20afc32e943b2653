//! LLM Orchestrator
//!
//! Runs one gated, cost-accounted model call per recommendation:
//!
//! 1. ask the usage tracker; a denial returns immediately without dispatch
//! 2. build the prompt and call the provider in JSON mode
//! 3. price the reported tokens and record them, even if the content
//!    later fails to parse, since the provider did the work
//! 4. parse the reply and attach model, cost, tokens and usage
//!
//! Transport failures record nothing. No retries happen here.

#[cfg(test)]
mod tests;

use crate::engine::{EngineMode, RecommendationEngine};
use crate::error::{GenerationFailure, RecommendationError};
use crate::recommendation::{
    build_name_prompt, build_outfit_prompt, clean_outfit_name, fallback_outfit_name,
    parse_outfit_plan, Recommendation, RecommendationMetadata, SYSTEM_INSTRUCTION,
};
use crate::wardrobe::ClothingItem;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use wardrobe_llm::util::round_to;
use wardrobe_llm::{
    CompletionRequest, CompletionResponse, CostEstimator, LlmProvider, Message, RequestOutcome,
    TokenUsage, UsageSnapshot, UsageTracker,
};

/// Default sampling temperature for outfit generation
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Default output token ceiling for outfit generation
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 800;

const NAME_TEMPERATURE: f32 = 0.8;
const NAME_MAX_TOKENS: u32 = 20;

/// Sampling settings for outfit generation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationSettings {
    /// Sampling temperature
    pub temperature: f32,
    /// Output token ceiling
    pub max_output_tokens: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }
}

/// Live recommendation engine
pub struct LlmOrchestrator {
    provider: Arc<dyn LlmProvider>,
    model: String,
    estimator: CostEstimator,
    tracker: Arc<UsageTracker>,
    settings: GenerationSettings,
}

impl LlmOrchestrator {
    /// Create an orchestrator for `model`.
    ///
    /// # Errors
    /// Returns `UnknownModel` if `model` can't be priced by `estimator`
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        model: impl Into<String>,
        estimator: CostEstimator,
        tracker: Arc<UsageTracker>,
    ) -> wardrobe_llm::Result<Self> {
        let model = model.into();
        estimator.ensure_priced(&model)?;

        info!(provider = provider.name(), model = %model, "LLM orchestrator initialized");

        Ok(Self {
            provider,
            model,
            estimator,
            tracker,
            settings: GenerationSettings::default(),
        })
    }

    /// Override generation settings
    #[must_use]
    pub fn with_settings(mut self, settings: GenerationSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Configured model id
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Shared usage tracker
    #[must_use]
    pub fn tracker(&self) -> &Arc<UsageTracker> {
        &self.tracker
    }

    /// Generation settings in use
    #[must_use]
    pub fn settings(&self) -> GenerationSettings {
        self.settings
    }

    /// Ask the tracker for permission, logging a denial.
    fn check_gate(&self, purpose: &str) -> Result<(), RecommendationError> {
        match self.tracker.can_make_request() {
            RequestOutcome::Allowed => Ok(()),
            RequestOutcome::Denied(reason) => {
                warn!(purpose, reason = %reason, code = reason.code(), "LLM request blocked");
                Err(RecommendationError::RateLimitExceeded(reason))
            }
        }
    }

    /// Price a completed call and record it against the tracker.
    ///
    /// Missing usage is recorded as a zero-cost call.
    fn account(&self, response: &CompletionResponse) -> (TokenUsage, f64) {
        let usage = response.usage.unwrap_or_default();
        if response.usage.is_none() {
            warn!(model = %self.model, "Provider reported no token usage, recording zero cost");
        }

        let cost = match self.estimator.record(&self.model, &usage) {
            Ok(record) => record.cost,
            Err(e) => {
                warn!(model = %self.model, error = %e, "Could not price call, recording zero cost");
                0.0
            }
        };
        self.tracker.record_request(cost);
        (usage, cost)
    }

    /// Produce a recommendation for `user_text` from `candidates`.
    ///
    /// # Errors
    /// `RateLimitExceeded` when the usage gate denies (nothing dispatched,
    /// nothing recorded); `GenerationFailed` when the call or parsing fails
    pub async fn request_recommendation(
        &self,
        user_text: &str,
        candidates: &[ClothingItem],
    ) -> Result<Recommendation, RecommendationError> {
        self.check_gate("outfit")?;

        let request = CompletionRequest::new(&self.model)
            .with_message(Message::system(SYSTEM_INSTRUCTION))
            .with_message(Message::user(build_outfit_prompt(user_text, candidates)))
            .with_temperature(self.settings.temperature)
            .with_max_tokens(self.settings.max_output_tokens)
            .with_json_output();

        info!(
            request = %user_text,
            items = candidates.len(),
            model = %self.model,
            "Generating outfit"
        );

        let response = self.provider.complete(request).await.map_err(|e| {
            error!(error = %e, "Error generating outfit recommendation");
            RecommendationError::GenerationFailed(GenerationFailure::from(e))
        })?;

        let (usage, cost) = self.account(&response);

        let plan = parse_outfit_plan(&response.content).map_err(|failure| {
            error!(error = %failure, cost, "Model reply rejected");
            RecommendationError::GenerationFailed(failure)
        })?;

        info!(cost, tokens = usage.total_tokens, "Outfit generated successfully");

        Ok(Recommendation {
            plan,
            metadata: RecommendationMetadata {
                model: self.model.clone(),
                cost_usd: round_to(cost, 4),
                tokens_used: usage.total_tokens,
                usage_stats: Some(self.tracker.get_usage_stats()),
                note: None,
            },
        })
    }

    /// Current usage snapshot
    #[must_use]
    pub fn get_usage_stats(&self) -> UsageSnapshot {
        self.tracker.get_usage_stats()
    }

    /// Ask the model for a 2-4 word outfit name.
    ///
    /// Falls back to "Outfit <Mon DD>" when denied, on failure, or when the
    /// reply is empty. A completed call is recorded either way.
    pub async fn suggest_outfit_name(&self, original_request: &str, description: &str) -> String {
        let fallback = || fallback_outfit_name(self.tracker.now());

        if self.check_gate("outfit_name").is_err() {
            return fallback();
        }

        let request = CompletionRequest::new(&self.model)
            .with_message(Message::user(build_name_prompt(original_request, description)))
            .with_temperature(NAME_TEMPERATURE)
            .with_max_tokens(NAME_MAX_TOKENS);

        match self.provider.complete(request).await {
            Ok(response) => {
                self.account(&response);
                clean_outfit_name(&response.content).unwrap_or_else(|| {
                    debug!("Empty outfit name from model, using fallback");
                    fallback()
                })
            }
            Err(e) => {
                warn!(error = %e, "Outfit naming failed, using fallback");
                fallback()
            }
        }
    }
}

#[async_trait]
impl RecommendationEngine for LlmOrchestrator {
    fn mode(&self) -> EngineMode {
        EngineMode::Live
    }

    async fn request_recommendation(
        &self,
        user_text: &str,
        candidates: &[ClothingItem],
    ) -> Result<Recommendation, RecommendationError> {
        LlmOrchestrator::request_recommendation(self, user_text, candidates).await
    }

    fn usage_stats(&self) -> UsageSnapshot {
        self.get_usage_stats()
    }

    async fn suggest_outfit_name(&self, original_request: &str, description: &str) -> String {
        LlmOrchestrator::suggest_outfit_name(self, original_request, description).await
    }
}
