//! CLI command: `wardrobe session`
//!
//! One request per stdin line, all sharing one usage ledger. Denials and
//! failures are reported per line and the session carries on.

use anyhow::Result;
use serde_json::json;
use std::process::ExitCode;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use wardrobe_core::{Error, ItemFilter, OutfitRecommender};

/// A parsed input line
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Usage,
    Quit,
    Skip,
    Request(&'a str),
}

fn parse_line(line: &str) -> Input<'_> {
    match line.trim() {
        "" => Input::Skip,
        ":usage" => Input::Usage,
        ":quit" | ":q" => Input::Quit,
        request => Input::Request(request),
    }
}

/// Run the session subcommand.
pub async fn run(recommender: &OutfitRecommender, filter: &ItemFilter) -> Result<ExitCode> {
    info!(mode = %recommender.mode(), "Session started");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        match parse_line(&line) {
            Input::Skip => {}
            Input::Quit => break,
            Input::Usage => {
                println!("{}", serde_json::to_string(&recommender.get_usage_stats())?);
            }
            Input::Request(request) => match recommender.generate_outfit(request, filter).await {
                Ok(suggestion) => println!("{}", serde_json::to_string(&suggestion)?),
                Err(Error::Recommendation(e)) => println!(
                    "{}",
                    json!({ "status": e.status_code(), "detail": e.to_string() })
                ),
                Err(e) => return Err(e.into()),
            },
        }
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line() {
        assert_eq!(parse_line("  "), Input::Skip);
        assert_eq!(parse_line(":usage"), Input::Usage);
        assert_eq!(parse_line(":q"), Input::Quit);
        assert_eq!(parse_line(" date night "), Input::Request("date night"));
    }
}
