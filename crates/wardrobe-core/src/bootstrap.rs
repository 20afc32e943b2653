//! Engine bootstrap
//!
//! Turns settings into a ready engine, failing fast on configuration that
//! could only fail later per request. Live mode without a credential is an
//! error, never a quiet switch to demo.

use crate::demo::DemoRecommender;
use crate::engine::RecommendationEngine;
use crate::error::ConfigError;
use crate::orchestrator::{GenerationSettings, LlmOrchestrator};
use std::sync::Arc;
use tracing::info;
use wardrobe_llm::{
    Clock, CostEstimator, LlmProvider, OpenAiConfig, OpenAiProvider, RateTable, SystemClock,
    UsageLimits, UsageTracker, DEFAULT_MODEL,
};

/// Only provider wired up today
pub const PROVIDER_OPENAI: &str = "openai";

/// Everything needed to build an engine
#[derive(Debug, Clone)]
pub struct EngineSettings {
    /// Provider name
    pub provider: String,
    /// Model id
    pub model: String,
    /// Daily request ceiling
    pub max_requests_per_day: u32,
    /// Hourly request ceiling
    pub max_requests_per_hour: u32,
    /// Monthly spend ceiling (USD)
    pub monthly_budget_usd: f64,
    /// Sampling settings
    pub generation: GenerationSettings,
    /// Use the demo recommender
    pub demo_mode: bool,
    /// Pricing
    pub rates: RateTable,
}

impl Default for EngineSettings {
    fn default() -> Self {
        let limits = UsageLimits::default();
        Self {
            provider: PROVIDER_OPENAI.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_requests_per_day: limits.max_daily(),
            max_requests_per_hour: limits.max_hourly(),
            monthly_budget_usd: limits.monthly_budget(),
            generation: GenerationSettings::default(),
            demo_mode: false,
            rates: RateTable::default(),
        }
    }
}

impl EngineSettings {
    /// Validated usage limits
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidLimits` for zero or non-positive values
    pub fn limits(&self) -> Result<UsageLimits, ConfigError> {
        UsageLimits::new(
            self.max_requests_per_day,
            self.max_requests_per_hour,
            self.monthly_budget_usd,
        )
        .map_err(|e| ConfigError::InvalidLimits(e.to_string()))
    }
}

/// Build the configured engine.
///
/// `credential` is only consulted in live mode.
///
/// # Errors
/// `UnsupportedProvider`, `MissingCredential`, `InvalidLimits` or
/// `UnknownModelConfigured` in live mode
pub fn build_engine(
    settings: &EngineSettings,
    credential: Option<OpenAiConfig>,
) -> Result<Arc<dyn RecommendationEngine>, ConfigError> {
    if settings.demo_mode {
        info!("Demo mode enabled, model calls disabled");
        return Ok(Arc::new(DemoRecommender::new()));
    }

    if !settings.provider.eq_ignore_ascii_case(PROVIDER_OPENAI) {
        return Err(ConfigError::UnsupportedProvider(settings.provider.clone()));
    }

    let config =
        credential.ok_or_else(|| ConfigError::MissingCredential(settings.provider.clone()))?;
    let provider = OpenAiProvider::new(config.with_model(&settings.model));

    let orchestrator = build_live_engine(settings, Arc::new(provider), Arc::new(SystemClock))?;
    Ok(Arc::new(orchestrator))
}

/// Build a live orchestrator over any provider and clock.
///
/// # Errors
/// `InvalidLimits` or `UnknownModelConfigured`
pub fn build_live_engine(
    settings: &EngineSettings,
    provider: Arc<dyn LlmProvider>,
    clock: Arc<dyn Clock>,
) -> Result<LlmOrchestrator, ConfigError> {
    let limits = settings.limits()?;
    let estimator = CostEstimator::new(settings.rates.clone());
    let tracker = Arc::new(UsageTracker::with_clock(limits, clock));

    info!(
        model = %settings.model,
        max_daily = limits.max_daily(),
        max_hourly = limits.max_hourly(),
        monthly_budget = limits.monthly_budget(),
        "Usage limits configured"
    );

    let orchestrator = LlmOrchestrator::new(provider, &settings.model, estimator, tracker)
        .map_err(|_| ConfigError::UnknownModelConfigured(settings.model.clone()))?;
    Ok(orchestrator.with_settings(settings.generation))
}
