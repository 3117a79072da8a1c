//! Dashboard recompute: session state in, rendered view state out.
//!
//! `ReferenceContext` is built once at startup and shared read-only.
//! `DashboardSession` is owned by one user session. `recompute` is pure and
//! is called by the UI after every input change.

use std::sync::Arc;

use crate::adapters::LinearModel;
use crate::domain::histogram::{clamp_bins, DEFAULT_BINS};
use crate::domain::{
    overlapping_pairs, Feature, Histogram, LifestyleInput, PredictionResult, ReferenceDataset,
    ScoreLink, SLIDERS,
};
use crate::ports::{ReferenceSource, ScoreModel};
use crate::VitalscoreError;

use super::PredictionService;

/// Process-wide read-only state derived from the reference dataset.
pub struct ReferenceContext<M = LinearModel>
where
    M: ScoreModel,
{
    service: PredictionService<M>,
    scores: Arc<[f64]>,
}

impl ReferenceContext<LinearModel> {
    /// Load the dataset, fit the model, and derive the band table.
    ///
    /// # Errors
    /// Returns error if the dataset cannot be loaded or the fit fails.
    pub fn load<S>(source: &S, link: ScoreLink) -> Result<Self, VitalscoreError>
    where
        S: ReferenceSource,
        VitalscoreError: From<S::Error>,
    {
        let dataset = source.load()?;
        Self::from_dataset(&dataset, link)
    }

    /// Fit the model and derive bands from an in-memory dataset.
    ///
    /// # Errors
    /// Returns error if the fit fails.
    pub fn from_dataset(dataset: &ReferenceDataset, link: ScoreLink) -> Result<Self, VitalscoreError> {
        let model = LinearModel::fit(dataset, link)?;
        let bands = dataset.bands();

        for band in &bands {
            tracing::info!(
                "Band {:?}: [{:.2}, {:.2}]",
                band.label,
                band.min,
                band.max
            );
        }
        for (a, b) in overlapping_pairs(&bands) {
            tracing::warn!(
                "Bands {:?} and {:?} overlap; scores in [{:.2}, {:.2}] will be Unknown",
                a.label,
                b.label,
                a.min.max(b.min),
                a.max.min(b.max)
            );
        }

        Ok(Self::new(
            PredictionService::new(Arc::new(model), bands),
            dataset.scores(),
        ))
    }
}

impl<M> ReferenceContext<M>
where
    M: ScoreModel,
{
    pub fn new(service: PredictionService<M>, scores: impl Into<Arc<[f64]>>) -> Self {
        Self {
            service,
            scores: scores.into(),
        }
    }

    #[must_use]
    pub fn service(&self) -> &PredictionService<M> {
        &self.service
    }

    /// Reference score column used for the histogram.
    #[must_use]
    pub fn scores(&self) -> &[f64] {
        &self.scores
    }
}

/// Mutable state owned by one session.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSession {
    pub input: LifestyleInput,
    bins: usize,
}

impl Default for DashboardSession {
    fn default() -> Self {
        Self {
            input: LifestyleInput::default(),
            bins: DEFAULT_BINS,
        }
    }
}

impl DashboardSession {
    #[must_use]
    pub fn bins(&self) -> usize {
        self.bins
    }

    pub fn set_bins(&mut self, bins: usize) {
        self.bins = clamp_bins(bins);
    }

    /// Set a feature, clamped to its slider.
    pub fn set_feature(&mut self, feature: Feature, value: f64) {
        let spec = crate::domain::slider(feature);
        self.input.set(feature, spec.clamp(value));
    }

    /// Nudge a feature by whole slider steps.
    pub fn step_feature(&mut self, feature: Feature, steps: i32) {
        let spec = crate::domain::slider(feature);
        let value = spec.step_by(self.input.get(feature), steps);
        self.input.set(feature, value);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Everything the UI needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub prediction: PredictionResult,
    pub summary: String,
    pub histogram: Histogram,
}

/// Recompute the view for the current session state.
///
/// # Errors
/// Returns error if the model cannot produce a finite score.
pub fn recompute<M>(
    context: &ReferenceContext<M>,
    session: &DashboardSession,
) -> Result<DashboardView, VitalscoreError>
where
    M: ScoreModel,
{
    let prediction = context.service().predict(&session.input)?;
    let summary = format_summary(&session.input, &prediction);
    let histogram = Histogram::build(context.scores(), session.bins(), prediction.score);

    Ok(DashboardView {
        prediction,
        summary,
        histogram,
    })
}

/// Text summary: inputs echoed, then score and category.
#[must_use]
pub fn format_summary(input: &LifestyleInput, prediction: &PredictionResult) -> String {
    let inputs = SLIDERS
        .iter()
        .map(|spec| format!("{}: {}", spec.label, spec.format(input.get(spec.feature))))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "{inputs}\nPredicted health score: {:.2}\nCategory: {}",
        prediction.score, prediction.category
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, ReferenceRecord, ScoreBand};

    fn record(values: [f64; 7], score: f64, status: &str) -> ReferenceRecord {
        ReferenceRecord {
            input: LifestyleInput::from_vec(&values).expect("Should build input"),
            score,
            status: status.to_string(),
        }
    }

    /// Twelve rows following `20 + 4s + 0.5m + 3h - 2st + 0.2a - alc - 0.5sm` exactly.
    fn linear_dataset() -> ReferenceDataset {
        ReferenceDataset::new(vec![
            record([8.0, 45.0, 2.5, 2.0, 60.0, 1.0, 0.0], 89.0, "Good"),
            record([7.0, 20.0, 2.0, 4.0, 30.0, 3.0, 2.0], 58.0, "Average"),
            record([6.0, 10.0, 1.5, 6.0, 20.0, 8.0, 5.0], 35.0, "Poor"),
            record([4.0, 5.0, 1.0, 8.0, 0.0, 12.0, 15.0], 6.0, "Poor"),
            record([9.0, 60.0, 3.0, 1.0, 90.0, 0.0, 0.0], 111.0, "Good"),
            record([5.0, 30.0, 1.0, 5.0, 15.0, 6.0, 3.0], 43.5, "Average"),
            record([3.0, 0.0, 0.5, 9.0, 5.0, 15.0, 20.0], -8.5, "Poor"),
            record([7.0, 40.0, 2.2, 3.0, 45.0, 2.0, 1.0], 75.1, "Good"),
            record([6.0, 25.0, 1.8, 5.0, 25.0, 4.0, 4.0], 50.9, "Average"),
            record([5.0, 15.0, 1.2, 7.0, 10.0, 10.0, 10.0], 24.1, "Poor"),
            record([8.0, 50.0, 2.8, 2.0, 75.0, 0.0, 0.0], 96.4, "Good"),
            record([4.0, 10.0, 0.8, 6.0, 20.0, 9.0, 8.0], 22.4, "Poor"),
        ])
    }

    /// One row per status; only sleep and stress vary.
    fn three_row_dataset() -> ReferenceDataset {
        ReferenceDataset::new(vec![
            record([2.0, 30.0, 1.0, 8.0, 10.0, 5.0, 1.0], 30.0, "Poor"),
            record([5.0, 30.0, 1.0, 5.0, 10.0, 5.0, 1.0], 50.0, "Average"),
            record([8.0, 30.0, 1.0, 6.0, 10.0, 5.0, 1.0], 70.0, "Good"),
        ])
    }

    #[test]
    fn test_end_to_end_ols() {
        let context = ReferenceContext::from_dataset(&linear_dataset(), ScoreLink::Identity)
            .expect("Should build context");
        let view = recompute(&context, &DashboardSession::default()).expect("Should recompute");

        assert!((view.prediction.score - 52.5).abs() < 1e-6);
        assert_eq!(view.prediction.category, Category::Band("Average".into()));
        assert_eq!(view.histogram.total(), 12);
        assert_eq!(view.histogram.bins(), DEFAULT_BINS);
        assert!(view.histogram.marker_bin.is_some());
    }

    #[test]
    fn test_end_to_end_gap_is_unknown() {
        let context = ReferenceContext::from_dataset(&linear_dataset(), ScoreLink::Identity)
            .expect("Should build context");
        let mut session = DashboardSession::default();
        // 52.5 - 10 lands between Poor (max 35) and Average (min 43.5).
        session.set_feature(Feature::AlcoholUnits, 15.0);

        let view = recompute(&context, &session).expect("Should recompute");
        assert!((view.prediction.score - 42.5).abs() < 1e-6);
        assert_eq!(view.prediction.category, Category::Unknown);
        assert!(view.summary.ends_with("Category: ❓ Unknown"));
    }

    #[test]
    fn test_end_to_end_three_rows() {
        let dataset = three_row_dataset();
        let context = ReferenceContext::from_dataset(&dataset, ScoreLink::Identity)
            .expect("Should build context");

        assert_eq!(
            context.service().bands(),
            &[
                ScoreBand::new("Poor", 30.0, 30.0),
                ScoreBand::new("Average", 50.0, 50.0),
                ScoreBand::new("Good", 70.0, 70.0),
            ]
        );

        // The fitted plane through the three rows is 50/3 + (20/3) * sleep.
        let mut session = DashboardSession::default();
        session.input.sleep_hours = 6.5;
        session.input.stress_level = 4.0;
        let view = recompute(&context, &session).expect("Should recompute");
        assert!((view.prediction.score - 60.0).abs() < 1e-6);
        assert_eq!(view.prediction.category, Category::Unknown);

        session.input.sleep_hours = 8.0;
        let view = recompute(&context, &session).expect("Should recompute");
        assert!((view.prediction.score - 70.0).abs() < 1e-6);
    }

    #[test]
    fn test_logistic_context_is_default_behavior() {
        let context = ReferenceContext::from_dataset(&three_row_dataset(), ScoreLink::default())
            .expect("Should build context");
        assert_eq!(context.service().link(), ScoreLink::Logistic);

        let view = recompute(&context, &DashboardSession::default()).expect("Should recompute");
        assert!(view.prediction.score > 0.0 && view.prediction.score < 100.0);
    }

    #[test]
    fn test_summary_format() {
        let prediction = PredictionResult {
            score: 63.4567,
            category: Category::Band("Good".into()),
        };
        let input = LifestyleInput {
            hydration_litres: 2.5,
            ..LifestyleInput::default()
        };

        assert_eq!(
            format_summary(&input, &prediction),
            "Sleep: 5, Mindfulness: 30, Hydration: 2.5, Stress: 1, Physical activity: 10, Alcohol: 5, Smoking: 1\n\
             Predicted health score: 63.46\n\
             Category: 🟢 Good"
        );
    }

    #[test]
    fn test_session_clamps_inputs() {
        let mut session = DashboardSession::default();
        session.set_feature(Feature::SleepHours, 14.0);
        assert_eq!(session.input.sleep_hours, 10.0);

        session.step_feature(Feature::PhysicalActivityMinutes, -50);
        assert_eq!(session.input.physical_activity_minutes, 0.0);

        session.set_bins(1);
        assert_eq!(session.bins(), 2);
        session.set_bins(1000);
        assert_eq!(session.bins(), 100);

        session.reset();
        assert_eq!(session, DashboardSession::default());
    }

    #[test]
    fn test_sessions_are_isolated() {
        let context = Arc::new(
            ReferenceContext::from_dataset(&linear_dataset(), ScoreLink::Identity)
                .expect("Should build context"),
        );
        let mut first = DashboardSession::default();
        let second = DashboardSession::default();

        first.set_feature(Feature::SleepHours, 9.0);
        let a = recompute(&*context, &first).expect("Should recompute");
        let b = recompute(&*context, &second).expect("Should recompute");

        assert!((a.prediction.score - 68.5).abs() < 1e-6);
        assert!((b.prediction.score - 52.5).abs() < 1e-6);
    }
}
