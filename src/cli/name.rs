//! CLI command: `wardrobe name`

use anyhow::Result;
use std::process::ExitCode;
use wardrobe_core::OutfitRecommender;

/// Run the name subcommand.
pub async fn run(
    recommender: &OutfitRecommender,
    request: &str,
    description: &str,
) -> Result<ExitCode> {
    let name = recommender.name_outfit(request, description).await;
    println!("{name}");
    Ok(ExitCode::SUCCESS)
}
