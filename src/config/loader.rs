//! Configuration loading
//!
//! Handles loading configuration from embedded defaults, files, and environment.

use super::AppConfig;
use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use std::collections::HashMap;

/// Embedded default configuration (compiled into binary)
pub const DEFAULT_CONFIG: &str = include_str!("../../config/default.toml");

/// Flat environment names and the keys they override
const LEGACY_ENV: [(&str, &str); 6] = [
    ("LLM_PROVIDER", "llm.provider"),
    ("LLM_MODEL", "llm.model"),
    ("LLM_MAX_REQUESTS_PER_DAY", "llm.max_requests_per_day"),
    ("LLM_MAX_REQUESTS_PER_HOUR", "llm.max_requests_per_hour"),
    ("LLM_MONTHLY_BUDGET_USD", "llm.monthly_budget_usd"),
    ("LLM_DEMO_MODE", "llm.demo_mode"),
];

/// Load configuration from files and the process environment
pub fn load_config() -> Result<AppConfig> {
    load_config_from(None)
}

/// Load configuration, reading variables from `vars` instead of the
/// process environment when given
pub fn load_config_from(vars: Option<HashMap<String, String>>) -> Result<AppConfig> {
    let lookup = |name: &str| match &vars {
        Some(map) => map.get(name).cloned(),
        None => std::env::var(name).ok(),
    };

    let mut builder = Config::builder()
        // 1. Embedded defaults (always available)
        .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
        // 2. Local overrides (optional)
        .add_source(File::with_name("config/local").required(false))
        // 3. WARDROBE_LLM__MODEL style variables
        .add_source(
            Environment::with_prefix("WARDROBE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(vars.clone()),
        );

    // 4. Flat LLM_* names (highest priority)
    for (name, key) in LEGACY_ENV {
        let value = lookup(name).filter(|v| !v.trim().is_empty());
        builder = builder
            .set_override_option(key, value)
            .with_context(|| format!("Invalid value for {name}"))?;
    }

    builder
        .build()
        .context("Failed to build configuration")?
        .try_deserialize()
        .context("Failed to deserialize configuration")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Option<HashMap<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_embedded_defaults() {
        let config = load_config_from(vars(&[])).unwrap();
        assert_eq!(config.llm.model, "gpt-3.5-turbo");
        assert_eq!(config.llm.max_requests_per_day, 230);
        assert_eq!(config.llm.max_requests_per_hour, 10);
        assert_eq!(config.llm.monthly_budget_usd, 5.0);
        assert_eq!(config.llm.max_output_tokens, 800);
        assert!(!config.llm.demo_mode);
        assert_eq!(config.inventory.path, "wardrobe.json");
    }

    #[test]
    fn test_legacy_names_override() {
        let config = load_config_from(vars(&[
            ("LLM_MAX_REQUESTS_PER_DAY", "2"),
            ("LLM_MONTHLY_BUDGET_USD", "1.00"),
            ("LLM_MODEL", "gpt-4o-mini"),
            ("LLM_DEMO_MODE", "true"),
        ]))
        .unwrap();
        assert_eq!(config.llm.max_requests_per_day, 2);
        assert_eq!(config.llm.monthly_budget_usd, 1.0);
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert!(config.llm.demo_mode);
    }

    #[test]
    fn test_prefixed_env_and_precedence() {
        let config = load_config_from(vars(&[
            ("WARDROBE_LLM__MAX_REQUESTS_PER_HOUR", "4"),
            ("WARDROBE_LLM__MODEL", "gpt-4"),
            ("LLM_MODEL", "gpt-4-turbo"),
        ]))
        .unwrap();
        assert_eq!(config.llm.max_requests_per_hour, 4);
        assert_eq!(config.llm.model, "gpt-4-turbo");
    }

    #[test]
    fn test_bad_number_is_error() {
        assert!(load_config_from(vars(&[("LLM_MAX_REQUESTS_PER_DAY", "lots")])).is_err());
    }
}
