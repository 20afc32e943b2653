//! CLI module for Wardrobe
//!
//! Provides commands:
//! - `suggest`: One outfit suggestion, printed as JSON
//! - `usage`: Current usage against the configured limits
//! - `session`: Line-by-line requests against one long-lived usage ledger
//! - `name`: Generate a short name for an outfit

use crate::config::{self, AppConfig};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;
use wardrobe_core::{build_engine, Category, InMemoryInventory, ItemFilter, OutfitRecommender};

pub mod name;
pub mod session;
pub mod suggest;
pub mod usage;

/// Exit code when a request is refused by the usage gate
pub const EXIT_RATE_LIMITED: u8 = 2;

/// Wardrobe CLI
#[derive(Parser, Debug)]
#[command(name = "wardrobe")]
#[command(about = "Outfit suggestions from your own wardrobe, on a usage budget")]
#[command(version)]
pub struct Cli {
    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Options shared by every command that needs an engine
#[derive(Args, Debug, Clone, Default)]
pub struct EngineArgs {
    /// Use the zero-cost demo recommender
    #[arg(long)]
    pub demo: bool,

    /// Wardrobe JSON file (overrides config)
    #[arg(long)]
    pub wardrobe: Option<String>,
}

/// Candidate filters
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Only items for this season
    #[arg(long)]
    pub season: Option<String>,

    /// Only items in this style
    #[arg(long)]
    pub style: Option<String>,

    /// Only items in this category (shirt, pants, shorts, hoodie)
    #[arg(long)]
    pub category: Option<Category>,
}

impl From<FilterArgs> for ItemFilter {
    fn from(args: FilterArgs) -> Self {
        Self {
            season: args.season,
            style: args.style,
            category: args.category,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Suggest an outfit for a request
    Suggest {
        /// What the outfit is for, e.g. "casual friday"
        request: String,
        #[command(flatten)]
        filter: FilterArgs,
        #[command(flatten)]
        engine: EngineArgs,
    },
    /// Show usage against the limits
    Usage {
        #[command(flatten)]
        engine: EngineArgs,
    },
    /// Read one request per line from stdin (`:usage` shows stats, `:quit` exits)
    Session {
        #[command(flatten)]
        filter: FilterArgs,
        #[command(flatten)]
        engine: EngineArgs,
    },
    /// Generate a short outfit name
    Name {
        /// The original request
        #[arg(long)]
        request: String,
        /// The outfit description
        #[arg(long)]
        description: String,
        #[command(flatten)]
        engine: EngineArgs,
    },
}

/// Build the recommender from configuration and command-line overrides.
pub fn build_recommender(config: &AppConfig, args: &EngineArgs) -> Result<OutfitRecommender> {
    let settings = config.llm.engine_settings(args.demo);
    let engine = build_engine(&settings, config.llm.credential())
        .context("Failed to initialize recommendation engine")?;

    let path = args.wardrobe.as_deref().unwrap_or(&config.inventory.path);
    let inventory = InMemoryInventory::load_or_empty(path)
        .with_context(|| format!("Failed to load wardrobe from {path}"))?;

    info!(mode = %engine.mode(), model = %settings.model, wardrobe = %path, "Recommender ready");
    Ok(OutfitRecommender::new(Arc::new(inventory), engine))
}

/// Run the CLI command
pub async fn run(cli: Cli) -> Result<ExitCode> {
    let Some(command) = cli.command else {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        cmd.print_help()?;
        println!();
        return Ok(ExitCode::SUCCESS);
    };

    let config = config::loader::load_config()?;

    match command {
        Commands::Suggest {
            request,
            filter,
            engine,
        } => {
            let recommender = build_recommender(&config, &engine)?;
            suggest::run(&recommender, &request, &filter.into()).await
        }
        Commands::Usage { engine } => {
            let recommender = build_recommender(&config, &engine)?;
            usage::run(&recommender)
        }
        Commands::Session { filter, engine } => {
            let recommender = build_recommender(&config, &engine)?;
            session::run(&recommender, &filter.into()).await
        }
        Commands::Name {
            request,
            description,
            engine,
        } => {
            let recommender = build_recommender(&config, &engine)?;
            name::run(&recommender, &request, &description).await
        }
    }
}
