//! CLI command: `wardrobe usage`
//!
//! Usage counters live in memory for the life of the process, so a fresh
//! invocation reports an empty ledger; `wardrobe session` keeps one alive.

use anyhow::Result;
use std::process::ExitCode;
use wardrobe_core::OutfitRecommender;

/// Run the usage subcommand.
pub fn run(recommender: &OutfitRecommender) -> Result<ExitCode> {
    let stats = recommender.get_usage_stats();
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(ExitCode::SUCCESS)
}
