//! Prediction result types.

use serde::{Deserialize, Serialize};

use super::band::Category;

/// How the linear predictor maps onto the 0–100 score scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScoreLink {
    /// Plain OLS: the linear predictor is the score, unclamped.
    Identity,
    /// Binomial GLM on `score / 100`: `100 * sigmoid(eta)`.
    #[default]
    Logistic,
}

impl ScoreLink {
    /// Map a linear predictor onto the score scale.
    #[must_use]
    pub fn apply(self, eta: f64) -> f64 {
        match self {
            Self::Identity => eta,
            Self::Logistic => 100.0 * sigmoid(eta),
        }
    }
}

impl std::fmt::Display for ScoreLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Identity => write!(f, "ols"),
            Self::Logistic => write!(f, "logistic"),
        }
    }
}

impl std::str::FromStr for ScoreLink {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ols" | "identity" | "linear" => Ok(Self::Identity),
            "logistic" | "glm" | "binomial" => Ok(Self::Logistic),
            other => Err(format!("Unknown score link: {other}")),
        }
    }
}

/// Logistic function, evaluated without overflow for large |x|.
#[must_use]
pub fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Outcome of one prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Predicted health score (nominally 0–100)
    pub score: f64,

    /// Band the score falls in
    pub category: Category,
}
