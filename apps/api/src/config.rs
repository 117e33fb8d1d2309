use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::screening::scorer::ScoringConfig;

/// Application configuration loaded from environment variables.
/// Every variable has a default so the service boots in development with
/// nothing set; the scoring policy knobs are deliberately overridable.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Persisted classifier artifact (JSON). Loaded at startup when present.
    pub model_path: PathBuf,
    /// Labeled training corpus (CSV). Used when no artifact exists, and by
    /// the retrain endpoint unless a request overrides it.
    pub dataset_path: PathBuf,
    pub scoring: ScoringConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = ScoringConfig::default();
        let scoring = ScoringConfig {
            coverage_weight: env_parse("ATS_COVERAGE_WEIGHT", defaults.coverage_weight)?,
            structure_weight: env_parse("ATS_STRUCTURE_WEIGHT", defaults.structure_weight)?,
            min_word_count: env_parse("ATS_MIN_WORD_COUNT", defaults.min_word_count)?,
            max_word_count: env_parse("ATS_MAX_WORD_COUNT", defaults.max_word_count)?,
            suggestion_weight_floor: env_parse(
                "SUGGESTION_WEIGHT_FLOOR",
                defaults.suggestion_weight_floor,
            )?,
        }
        .normalized();

        Ok(Config {
            port: env_parse("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            model_path: PathBuf::from(
                std::env::var("MODEL_PATH")
                    .unwrap_or_else(|_| "models/field_classifier.json".to_string()),
            ),
            dataset_path: PathBuf::from(
                std::env::var("DATASET_PATH")
                    .unwrap_or_else(|_| "data/training_dataset.csv".to_string()),
            ),
            scoring,
        })
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value")),
        Err(_) => Ok(default),
    }
}
