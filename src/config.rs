//! Runtime configuration from environment variables.

use std::path::PathBuf;

use crate::domain::ScoreLink;

/// Dataset location when `VITALSCORE_DATA_PATH` is unset.
pub const DEFAULT_DATA_PATH: &str = "data/health_data.csv";

/// Application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Reference dataset CSV
    pub data_path: PathBuf,

    /// Score link for the fit
    pub score_link: ScoreLink,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            score_link: ScoreLink::default(),
        }
    }
}

impl Config {
    /// Load config overrides from environment (best-effort).
    ///
    /// Supported:
    /// - VITALSCORE_DATA_PATH
    /// - VITALSCORE_SCORE_LINK = "logistic" | "ols"
    #[must_use]
    pub fn from_env_or_default() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(v) = lookup("VITALSCORE_DATA_PATH") {
            let v = v.trim();
            if !v.is_empty() {
                cfg.data_path = PathBuf::from(v);
            }
        }

        if let Some(v) = lookup("VITALSCORE_SCORE_LINK") {
            match v.parse::<ScoreLink>() {
                Ok(link) => cfg.score_link = link,
                Err(e) => tracing::warn!("{}; using {}", e, cfg.score_link),
            }
        }

        cfg
    }
}
