//! Score model port: Trait for fitted regression models.
//!
//! This trait abstracts the regression backend from the prediction
//! service, so the service only sees "feature row in, score out".

use crate::domain::ScoreLink;

/// Errors that can occur while fitting or evaluating a model.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    #[error("Reference dataset is empty")]
    EmptyDataset,

    #[error("Feature count mismatch: got {got}, expected {expected}")]
    FeatureCount { got: usize, expected: usize },

    #[error("Design matrix is singular (collinear or constant features)")]
    Singular,

    #[error("Score {0} is outside [0, 100]; the logistic link needs bounded targets")]
    TargetOutOfRange(f64),

    #[error("Model produced a non-finite score")]
    NonFinite,
}

/// A fitted, immutable model mapping a feature row to a health score.
pub trait ScoreModel: Send + Sync {
    /// Predict the score for one feature row.
    ///
    /// The row must be in `FEATURE_NAMES` order.
    ///
    /// # Errors
    /// Returns `ModelError::FeatureCount` if the row has the wrong length,
    /// or `ModelError::NonFinite` if the model cannot produce a finite score.
    fn predict_score(&self, features: &[f64]) -> Result<f64, ModelError>;

    /// Link used to map the linear predictor onto the score scale.
    fn link(&self) -> ScoreLink;

    /// Number of features (excluding intercept) the model expects.
    fn feature_count(&self) -> usize;
}
