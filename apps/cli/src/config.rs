//! Runtime configuration from environment variables.
//!
//! | Variable | Default |
//! |---|---|
//! | `CLOZE_DB_PATH` | `<local data dir>/cloze-quiz/collections.db` |
//! | `CLOZE_DECK_API_URL` | `https://gizmo-express-api.vercel.app` |
//! | `CLOZE_SIMILARITY_THRESHOLD` | `0.7` |
//! | `CLOZE_OVERALL_THRESHOLD` | `0.7` |
//! | `CLOZE_SIMILARITY_METRIC` | `dice` |

use anyhow::{bail, Context, Result};
use cloze_core::{MatcherSettings, SimilarityMetric};
use std::path::PathBuf;

pub const DEFAULT_DECK_API_URL: &str = "https://gizmo-express-api.vercel.app";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub deck_api_url: String,
    pub matcher: MatcherSettings,
}

impl AppConfig {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = MatcherSettings::default();

        let db_path = lookup("CLOZE_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(default_db_path);
        let deck_api_url =
            lookup("CLOZE_DECK_API_URL").unwrap_or_else(|| DEFAULT_DECK_API_URL.to_string());

        let similarity_threshold = match lookup("CLOZE_SIMILARITY_THRESHOLD") {
            Some(v) => parse_threshold("CLOZE_SIMILARITY_THRESHOLD", &v)?,
            None => defaults.similarity_threshold,
        };
        let overall_threshold = match lookup("CLOZE_OVERALL_THRESHOLD") {
            Some(v) => parse_threshold("CLOZE_OVERALL_THRESHOLD", &v)?,
            None => defaults.overall_threshold,
        };
        let metric = match lookup("CLOZE_SIMILARITY_METRIC") {
            Some(v) => parse_metric(&v)?,
            None => defaults.metric,
        };

        Ok(Self {
            db_path,
            deck_api_url,
            matcher: MatcherSettings {
                similarity_threshold,
                overall_threshold,
                metric,
            },
        })
    }
}

fn default_db_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cloze-quiz")
        .join("collections.db")
}

/// Parse a value in `[0, 1]`.
pub fn parse_threshold(name: &str, value: &str) -> Result<f64> {
    let parsed: f64 = value
        .trim()
        .parse()
        .with_context(|| format!("{name} must be a number, got {value:?}"))?;
    if !(0.0..=1.0).contains(&parsed) {
        bail!("{name} must be between 0 and 1, got {parsed}");
    }
    Ok(parsed)
}

pub fn parse_metric(value: &str) -> Result<SimilarityMetric> {
    SimilarityMetric::from_str(value.trim())
        .with_context(|| format!("unknown similarity metric {value:?} (expected dice or levenshtein)"))
}

/// clap value parser for threshold flags.
pub fn parse_threshold_arg(value: &str) -> std::result::Result<f64, String> {
    parse_threshold("threshold", value).map_err(|e| e.to_string())
}

/// clap value parser for `--metric`.
pub fn parse_metric_arg(value: &str) -> std::result::Result<SimilarityMetric, String> {
    parse_metric(value).map_err(|e| e.to_string())
}
