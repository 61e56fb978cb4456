//! Terminal front end for the cloze quiz engine.

pub mod commands;
pub mod config;
pub mod db;
pub mod remote;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cloze_core::SimilarityMetric;

use crate::config::{parse_metric_arg, parse_threshold_arg, AppConfig};

#[derive(Parser)]
#[command(name = "cloze", version, about = "Cloze quizzes with fuzzy answer checking")]
pub struct Cli {
    /// Collection database path (overrides CLOZE_DB_PATH)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(flatten)]
    pub matcher: MatcherArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Matcher overrides shared by all commands.
#[derive(Args, Debug, Default)]
pub struct MatcherArgs {
    /// Per-word similarity threshold, 0 to 1
    #[arg(long, global = true, value_parser = parse_threshold_arg)]
    pub similarity_threshold: Option<f64>,

    /// Share of keywords that must match, 0 to 1
    #[arg(long, global = true, value_parser = parse_threshold_arg)]
    pub overall_threshold: Option<f64>,

    /// Word similarity metric: dice or levenshtein
    #[arg(long, global = true, value_parser = parse_metric_arg)]
    pub metric: Option<SimilarityMetric>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Take a quiz in the terminal
    Quiz {
        #[command(flatten)]
        source: QuizSource,
    },

    /// Parse authored text and print its problems
    Parse {
        /// Text file with one question per line
        file: PathBuf,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Judge a single answer
    Check {
        /// Expected answer
        #[arg(long)]
        answer: String,

        /// Answer as typed by the user
        #[arg(long)]
        input: String,

        /// Print the full match report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage stored collections
    Collections {
        #[command(subcommand)]
        action: CollectionsAction,
    },

    /// Work with remote decks
    Deck {
        #[command(subcommand)]
        action: DeckAction,
    },

    /// List built-in sample quizzes
    Samples,
}

/// Where quiz questions come from. Exactly one must be given.
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct QuizSource {
    /// Text file with one question per line
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Stored collection id
    #[arg(long)]
    pub collection: Option<i64>,

    /// Built-in sample name
    #[arg(long)]
    pub sample: Option<String>,

    /// Remote deck id
    #[arg(long)]
    pub deck: Option<u64>,
}

#[derive(Subcommand)]
pub enum CollectionsAction {
    /// List stored collections
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print a collection's lines and problems
    Show { id: i64 },

    /// Store a text file as a collection
    Add {
        /// Text file with one question per line
        file: PathBuf,

        #[arg(long)]
        title: Option<String>,

        /// Replace the collection with this id
        #[arg(long)]
        id: Option<i64>,
    },

    /// Delete a collection
    Delete { id: i64 },

    /// Delete all collections
    Clear,
}

#[derive(Subcommand)]
pub enum DeckAction {
    /// Fetch a remote deck and print it as paragraph HTML
    Fetch {
        id: u64,

        /// Store the deck as a collection instead of printing it
        #[arg(long)]
        save: bool,

        /// Title for the stored collection
        #[arg(long)]
        title: Option<String>,
    },

    /// Convert a deck JSON file to paragraph HTML
    Convert {
        /// Deck JSON file
        file: PathBuf,
    },
}

impl Cli {
    /// Apply command line overrides on top of the environment config.
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(db) = &self.db {
            config.db_path = db.clone();
        }
        if let Some(v) = self.matcher.similarity_threshold {
            config.matcher.similarity_threshold = v;
        }
        if let Some(v) = self.matcher.overall_threshold {
            config.matcher.overall_threshold = v;
        }
        if let Some(metric) = self.matcher.metric {
            config.matcher.metric = metric;
        }
    }
}

/// Log to stderr so command output on stdout stays clean.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Execute a parsed command line.
pub async fn run(cli: Cli) -> Result<()> {
    let mut config = AppConfig::from_env()?;
    cli.apply_overrides(&mut config);
    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Quiz { source } => commands::quiz::execute(&config, source).await,
        Commands::Parse { file, json } => commands::parse::execute(file, json),
        Commands::Check {
            answer,
            input,
            json,
        } => commands::check::execute(&config, &answer, &input, json),
        Commands::Collections { action } => commands::collections::execute(&config, action),
        Commands::Deck { action } => commands::deck::execute(&config, action).await,
        Commands::Samples => commands::parse::list_samples(),
    }
}
