//! Score bands and category classification.
//!
//! Bands are derived from the reference dataset by taking the observed
//! min/max score per health status. Nothing guarantees they tile the score
//! axis: real data can leave gaps or overlap neighbouring bands.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Label returned when a score matches no band, or more than one.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// A named, inclusive score range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBand {
    pub label: String,
    pub min: f64,
    pub max: f64,
}

impl ScoreBand {
    #[must_use]
    pub fn new(label: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            label: label.into(),
            min,
            max,
        }
    }

    /// Inclusive on both ends.
    #[must_use]
    pub fn contains(&self, score: f64) -> bool {
        self.min <= score && score <= self.max
    }
}

/// Derive one band per label from `(label, score)` observations.
///
/// Bands come back sorted by `min`, ties broken by label.
#[must_use]
pub fn derive_bands<'a, I>(observations: I) -> Vec<ScoreBand>
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    let mut ranges: BTreeMap<&str, (f64, f64)> = BTreeMap::new();
    for (label, score) in observations {
        if !score.is_finite() {
            continue;
        }
        ranges
            .entry(label)
            .and_modify(|(lo, hi)| {
                *lo = lo.min(score);
                *hi = hi.max(score);
            })
            .or_insert((score, score));
    }

    let mut bands: Vec<ScoreBand> = ranges
        .into_iter()
        .map(|(label, (min, max))| ScoreBand::new(label, min, max))
        .collect();
    bands.sort_by(|a, b| a.min.total_cmp(&b.min).then_with(|| a.label.cmp(&b.label)));
    bands
}

/// Every pair of bands whose ranges intersect, in table order.
#[must_use]
pub fn overlapping_pairs(bands: &[ScoreBand]) -> Vec<(&ScoreBand, &ScoreBand)> {
    let mut pairs = Vec::new();
    for (i, a) in bands.iter().enumerate() {
        for b in &bands[i + 1..] {
            if a.max >= b.min && b.max >= a.min {
                pairs.push((a, b));
            }
        }
    }
    pairs
}

/// Category assigned to a score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    /// Exactly one band matched
    Band(String),
    /// No band matched, or the match was ambiguous
    Unknown,
}

impl Category {
    /// Category for a band label. A band literally named `Unknown` maps to
    /// `Category::Unknown` so the two cannot be told apart downstream.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        if label == UNKNOWN_LABEL {
            Self::Unknown
        } else {
            Self::Band(label.to_string())
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Band(label) => label,
            Self::Unknown => UNKNOWN_LABEL,
        }
    }

    #[must_use]
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// Indicator shown next to the label.
    #[must_use]
    pub fn indicator(&self) -> &'static str {
        match self.label() {
            "Good" => "🟢",
            "Average" => "🟡",
            "Poor" => "🔴",
            _ => "❓",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.indicator(), self.label())
    }
}

/// Classify a score against a band table.
///
/// A score that falls in a gap, outside every band, or inside two
/// overlapping bands is `Unknown`.
#[must_use]
pub fn categorize(score: f64, bands: &[ScoreBand]) -> Category {
    let mut matched = bands.iter().filter(|band| band.contains(score));

    match (matched.next(), matched.next()) {
        (Some(band), None) => Category::from_label(&band.label),
        (Some(_), Some(_)) => {
            let count = 2 + matched.count();
            tracing::warn!(
                "Score {:.2} matches {} overlapping bands; reporting {}",
                score,
                count,
                UNKNOWN_LABEL
            );
            Category::Unknown
        }
        (None, _) => {
            tracing::debug!("Score {:.2} falls outside every band", score);
            Category::Unknown
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiled_bands() -> Vec<ScoreBand> {
        vec![
            ScoreBand::new("Poor", 0.0, 40.0),
            ScoreBand::new("Average", 40.5, 70.0),
            ScoreBand::new("Good", 70.5, 100.0),
        ]
    }

    #[test]
    fn test_single_match_returns_label() {
        let bands = tiled_bands();
        assert_eq!(categorize(55.0, &bands), Category::Band("Average".into()));
        assert_eq!(categorize(90.0, &bands).label(), "Good");
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let bands = tiled_bands();
        assert_eq!(categorize(40.5, &bands).label(), "Average");
        assert_eq!(categorize(70.0, &bands).label(), "Average");
        assert_eq!(categorize(0.0, &bands).label(), "Poor");
        assert_eq!(categorize(100.0, &bands).label(), "Good");
    }

    #[test]
    fn test_gap_is_unknown() {
        let bands = vec![ScoreBand::new("A", 0.0, 50.0), ScoreBand::new("B", 55.0, 100.0)];
        assert_eq!(categorize(52.0, &bands), Category::Unknown);
    }

    #[test]
    fn test_overlap_is_unknown() {
        let bands = vec![ScoreBand::new("A", 0.0, 60.0), ScoreBand::new("B", 55.0, 100.0)];
        assert_eq!(categorize(58.0, &bands), Category::Unknown);
        assert_eq!(categorize(50.0, &bands).label(), "A");
    }

    #[test]
    fn test_categorize_is_total() {
        let bands = tiled_bands();
        for score in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, -1.0, 1e9] {
            assert!(categorize(score, &bands).is_unknown());
        }
        assert!(categorize(50.0, &[]).is_unknown());
    }

    #[test]
    fn test_derive_bands_takes_min_max_per_label() {
        let observations = [
            ("Good", 80.0),
            ("Poor", 20.0),
            ("Good", 95.0),
            ("Average", 55.0),
            ("Poor", 35.0),
            ("Average", 61.0),
        ];
        let bands = derive_bands(observations.iter().map(|(l, s)| (*l, *s)));

        assert_eq!(
            bands,
            vec![
                ScoreBand::new("Poor", 20.0, 35.0),
                ScoreBand::new("Average", 55.0, 61.0),
                ScoreBand::new("Good", 80.0, 95.0),
            ]
        );
    }

    #[test]
    fn test_overlapping_pairs_checks_every_pair() {
        let bands = vec![
            ScoreBand::new("Wide", 0.0, 100.0),
            ScoreBand::new("B", 10.0, 20.0),
            ScoreBand::new("C", 30.0, 40.0),
        ];
        let labels: Vec<(&str, &str)> = overlapping_pairs(&bands)
            .into_iter()
            .map(|(a, b)| (a.label.as_str(), b.label.as_str()))
            .collect();

        assert_eq!(labels, vec![("Wide", "B"), ("Wide", "C")]);
        assert!(overlapping_pairs(&tiled_bands()).is_empty());
    }

    #[test]
    fn test_unknown_status_label_is_unknown_category() {
        let bands = vec![
            ScoreBand::new("Poor", 0.0, 40.0),
            ScoreBand::new(UNKNOWN_LABEL, 50.0, 60.0),
        ];
        let category = categorize(55.0, &bands);

        assert!(category.is_unknown());
        assert_eq!(category, Category::Unknown);
        assert_eq!(Category::from_label("Poor"), Category::Band("Poor".into()));
    }

    #[test]
    fn test_indicators() {
        assert_eq!(Category::Band("Good".into()).to_string(), "🟢 Good");
        assert_eq!(Category::Band("Average".into()).indicator(), "🟡");
        assert_eq!(Category::Band("Poor".into()).indicator(), "🔴");
        assert_eq!(Category::Unknown.to_string(), "❓ Unknown");
    }
}
