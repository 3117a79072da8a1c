//! Reference dataset records.

use super::band::{derive_bands, ScoreBand};
use super::lifestyle::LifestyleInput;

/// One historical observation from the reference dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceRecord {
    pub input: LifestyleInput,

    /// Observed overall health score
    pub score: f64,

    /// Observed health status label (e.g. Good/Average/Poor)
    pub status: String,
}

/// The static dataset the model and band table are derived from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceDataset {
    records: Vec<ReferenceRecord>,
}

impl ReferenceDataset {
    #[must_use]
    pub fn new(records: Vec<ReferenceRecord>) -> Self {
        Self { records }
    }

    #[must_use]
    pub fn records(&self) -> &[ReferenceRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The score column, in row order.
    #[must_use]
    pub fn scores(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.score).collect()
    }

    /// Min/max score per status label.
    #[must_use]
    pub fn bands(&self) -> Vec<ScoreBand> {
        derive_bands(self.records.iter().map(|r| (r.status.as_str(), r.score)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(score: f64, status: &str) -> ReferenceRecord {
        ReferenceRecord {
            input: LifestyleInput::default(),
            score,
            status: status.to_string(),
        }
    }

    #[test]
    fn test_scores_and_bands() {
        let dataset = ReferenceDataset::new(vec![
            record(82.0, "Good"),
            record(48.0, "Average"),
            record(21.0, "Poor"),
            record(64.0, "Average"),
        ]);

        assert_eq!(dataset.len(), 4);
        assert_eq!(dataset.scores(), vec![82.0, 48.0, 21.0, 64.0]);

        let bands = dataset.bands();
        assert_eq!(bands.len(), 3);
        assert_eq!(bands[1], ScoreBand::new("Average", 48.0, 64.0));
    }
}
