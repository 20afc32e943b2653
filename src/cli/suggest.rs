//! CLI command: `wardrobe suggest`
//!
//! Prints the enriched recommendation as JSON. A usage-gate denial exits
//! with code 2 so scripts can back off.

use super::EXIT_RATE_LIMITED;
use anyhow::Result;
use serde_json::json;
use std::process::ExitCode;
use tracing::warn;
use wardrobe_core::{Error, ItemFilter, OutfitRecommender};

/// Run the suggest subcommand.
pub async fn run(
    recommender: &OutfitRecommender,
    request: &str,
    filter: &ItemFilter,
) -> Result<ExitCode> {
    match recommender.generate_outfit(request, filter).await {
        Ok(suggestion) => {
            println!("{}", serde_json::to_string_pretty(&suggestion)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(Error::Recommendation(e)) => {
            if e.is_rate_limited() {
                warn!(reason = %e, "Suggestion refused");
            }
            eprintln!(
                "{}",
                json!({ "status": e.status_code(), "detail": e.to_string() })
            );
            Ok(if e.is_rate_limited() {
                ExitCode::from(EXIT_RATE_LIMITED)
            } else {
                ExitCode::FAILURE
            })
        }
        Err(e) => Err(e.into()),
    }
}
