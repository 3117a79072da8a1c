//! Prediction service: lifestyle input in, score and category out.
//!
//! The service holds the fitted model and band table behind `Arc` so one
//! instance can back every session. It never mutates either.

use std::sync::Arc;

use crate::domain::{categorize, LifestyleInput, PredictionResult, ScoreBand, ScoreLink};
use crate::ports::ScoreModel;
use crate::VitalscoreError;

/// Service for scoring lifestyle inputs.
pub struct PredictionService<M>
where
    M: ScoreModel,
{
    model: Arc<M>,
    bands: Arc<[ScoreBand]>,
}

impl<M> Clone for PredictionService<M>
where
    M: ScoreModel,
{
    fn clone(&self) -> Self {
        Self {
            model: Arc::clone(&self.model),
            bands: Arc::clone(&self.bands),
        }
    }
}

impl<M> PredictionService<M>
where
    M: ScoreModel,
{
    /// Create a new prediction service.
    pub fn new(model: Arc<M>, bands: impl Into<Arc<[ScoreBand]>>) -> Self {
        Self {
            model,
            bands: bands.into(),
        }
    }

    /// Score one input and classify it.
    ///
    /// # Errors
    /// Returns error if the model cannot produce a finite score.
    pub fn predict(&self, input: &LifestyleInput) -> Result<PredictionResult, VitalscoreError> {
        let features = input.to_vec();
        let score = self.model.predict_score(&features)?;
        let category = categorize(score, &self.bands);

        tracing::debug!(
            "Predicted score={:.2}, category={}",
            score,
            category.label()
        );

        Ok(PredictionResult { score, category })
    }

    #[must_use]
    pub fn bands(&self) -> &[ScoreBand] {
        &self.bands
    }

    #[must_use]
    pub fn link(&self) -> ScoreLink {
        self.model.link()
    }
}
