//! Application configuration
//!
//! Typed settings loaded once at startup; see [`loader`] for the layering.

pub mod loader;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use wardrobe_core::{EngineSettings, GenerationSettings};
use wardrobe_llm::{ModelRates, OpenAiConfig, RateTable};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub inventory: InventoryConfig,
}

/// LLM and usage-budget settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_max_requests_per_day")]
    pub max_requests_per_day: u32,
    #[serde(default = "default_max_requests_per_hour")]
    pub max_requests_per_hour: u32,
    #[serde(default = "default_monthly_budget_usd")]
    pub monthly_budget_usd: f64,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub demo_mode: bool,
    /// Extra or replacement prices, USD per 1K tokens
    #[serde(default)]
    pub pricing: BTreeMap<String, PricingConfig>,
    /// Model whose prices apply to unlisted models; empty disables the fallback
    #[serde(default = "default_pricing_model")]
    pub default_pricing_model: Option<String>,
}

/// One price override
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PricingConfig {
    pub input_per_1k: f64,
    pub output_per_1k: f64,
}

/// Where the wardrobe lives
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryConfig {
    #[serde(default = "default_inventory_path")]
    pub path: String,
}

fn default_provider() -> String {
    "openai".to_string()
}

fn default_model() -> String {
    wardrobe_llm::DEFAULT_MODEL.to_string()
}

fn default_max_requests_per_day() -> u32 {
    wardrobe_llm::usage::DEFAULT_MAX_REQUESTS_PER_DAY
}

fn default_max_requests_per_hour() -> u32 {
    wardrobe_llm::usage::DEFAULT_MAX_REQUESTS_PER_HOUR
}

fn default_monthly_budget_usd() -> f64 {
    wardrobe_llm::usage::DEFAULT_MONTHLY_BUDGET_USD
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_output_tokens() -> u32 {
    800
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_pricing_model() -> Option<String> {
    Some(wardrobe_llm::DEFAULT_MODEL.to_string())
}

fn default_inventory_path() -> String {
    "wardrobe.json".to_string()
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            max_requests_per_day: default_max_requests_per_day(),
            max_requests_per_hour: default_max_requests_per_hour(),
            monthly_budget_usd: default_monthly_budget_usd(),
            temperature: default_temperature(),
            max_output_tokens: default_max_output_tokens(),
            timeout_secs: default_timeout_secs(),
            demo_mode: false,
            pricing: BTreeMap::new(),
            default_pricing_model: default_pricing_model(),
        }
    }
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            path: default_inventory_path(),
        }
    }
}

impl LlmConfig {
    /// Built-in prices plus overrides, with the configured fallback model
    pub fn rate_table(&self) -> RateTable {
        let table = self
            .pricing
            .iter()
            .fold(RateTable::default(), |table, (model, p)| {
                table.with_rates(model, ModelRates::new(p.input_per_1k, p.output_per_1k))
            });

        match self.default_pricing_model.as_deref().map(str::trim) {
            Some(model) if !model.is_empty() => table.with_default_model(model),
            _ => table.without_default_model(),
        }
    }

    /// Settings for `wardrobe_core::build_engine`; `force_demo` wins over config
    pub fn engine_settings(&self, force_demo: bool) -> EngineSettings {
        EngineSettings {
            provider: self.provider.clone(),
            model: self.model.clone(),
            max_requests_per_day: self.max_requests_per_day,
            max_requests_per_hour: self.max_requests_per_hour,
            monthly_budget_usd: self.monthly_budget_usd,
            generation: GenerationSettings {
                temperature: self.temperature,
                max_output_tokens: self.max_output_tokens,
            },
            demo_mode: force_demo || self.demo_mode,
            rates: self.rate_table(),
        }
    }

    /// Provider credential from `OPENAI_*`, if present
    pub fn credential(&self) -> Option<OpenAiConfig> {
        OpenAiConfig::from_env()
            .ok()
            .map(|c| c.with_timeout(Duration::from_secs(self.timeout_secs)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_values() {
        let llm = LlmConfig::default();
        assert_eq!(llm.provider, "openai");
        assert_eq!(llm.model, "gpt-3.5-turbo");
        assert_eq!(llm.max_requests_per_day, 230);
        assert_eq!(llm.max_requests_per_hour, 10);
        assert_eq!(llm.monthly_budget_usd, 5.0);
        assert!(!llm.demo_mode);
    }

    #[test]
    fn test_rate_table_overrides() {
        let mut llm = LlmConfig::default();
        llm.pricing.insert(
            "house-model".into(),
            PricingConfig {
                input_per_1k: 0.001,
                output_per_1k: 0.002,
            },
        );
        let table = llm.rate_table();
        assert_eq!(
            table.exact("house-model"),
            Some(ModelRates::new(0.001, 0.002))
        );
        assert!(table.rates_for("unlisted").is_some());

        llm.default_pricing_model = Some(String::new());
        assert!(llm.rate_table().rates_for("unlisted").is_none());
    }

    #[test]
    fn test_force_demo() {
        let llm = LlmConfig::default();
        assert!(llm.engine_settings(true).demo_mode);
        assert!(!llm.engine_settings(false).demo_mode);
    }
}
