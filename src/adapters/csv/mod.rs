//! CSV adapter: Implementation of ReferenceSource over a CSV file.
//!
//! Expected columns (extra columns are ignored):
//! `Sleep_Hours`, `Mindfulness_Minutes`, `Hydration_Litres`, `Stress_Level`,
//! `Physical_Activity_Minutes`, `Alcohol_Units`, `Smoking_Cigarettes`,
//! `Overall_Health_Score`, `Health_Status`.

use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::{LifestyleInput, ReferenceDataset, ReferenceRecord};
use crate::ports::ReferenceSource;

/// Error type for dataset loading.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("Dataset not found at {0:?}")]
    NotFound(PathBuf),

    #[error("Failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Row {row}: {message}")]
    InvalidRow { row: usize, message: String },

    #[error("Dataset has no rows")]
    Empty,
}

/// One CSV row as written by the data export.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Sleep_Hours")]
    sleep_hours: f64,
    #[serde(rename = "Mindfulness_Minutes")]
    mindfulness_minutes: f64,
    #[serde(rename = "Hydration_Litres")]
    hydration_litres: f64,
    #[serde(rename = "Stress_Level")]
    stress_level: f64,
    #[serde(rename = "Physical_Activity_Minutes")]
    physical_activity_minutes: f64,
    #[serde(rename = "Alcohol_Units")]
    alcohol_units: f64,
    #[serde(rename = "Smoking_Cigarettes")]
    smoking_cigarettes: f64,
    #[serde(rename = "Overall_Health_Score")]
    overall_health_score: f64,
    #[serde(rename = "Health_Status")]
    health_status: String,
}

impl CsvRow {
    fn into_record(self, row: usize) -> Result<ReferenceRecord, DatasetError> {
        let input = LifestyleInput {
            sleep_hours: self.sleep_hours,
            mindfulness_minutes: self.mindfulness_minutes,
            hydration_litres: self.hydration_litres,
            stress_level: self.stress_level,
            physical_activity_minutes: self.physical_activity_minutes,
            alcohol_units: self.alcohol_units,
            smoking_cigarettes: self.smoking_cigarettes,
        };

        if input
            .to_vec()
            .iter()
            .chain(std::iter::once(&self.overall_health_score))
            .any(|v| !v.is_finite())
        {
            return Err(DatasetError::InvalidRow {
                row,
                message: "non-finite numeric value".to_string(),
            });
        }

        let status = self.health_status.trim().to_string();
        if status.is_empty() {
            return Err(DatasetError::InvalidRow {
                row,
                message: "empty Health_Status".to_string(),
            });
        }

        Ok(ReferenceRecord {
            input,
            score: self.overall_health_score,
            status,
        })
    }
}

/// Reference dataset backed by a CSV file on disk.
pub struct CsvDataset {
    path: PathBuf,
}

impl CsvDataset {
    #[must_use]
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Parse a dataset from any reader.
    ///
    /// # Errors
    /// Returns error on malformed CSV, invalid rows, or an empty dataset.
    pub fn from_reader<R: Read>(reader: R) -> Result<ReferenceDataset, DatasetError> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut records = Vec::new();
        for (i, row) in rdr.deserialize::<CsvRow>().enumerate() {
            // Row numbers are 1-based and skip the header line.
            records.push(row?.into_record(i + 2)?);
        }

        if records.is_empty() {
            return Err(DatasetError::Empty);
        }

        Ok(ReferenceDataset::new(records))
    }
}

impl ReferenceSource for CsvDataset {
    type Error = DatasetError;

    fn load(&self) -> Result<ReferenceDataset, Self::Error> {
        if !self.path.exists() {
            return Err(DatasetError::NotFound(self.path.clone()));
        }

        let file = std::fs::File::open(&self.path)?;
        let dataset = Self::from_reader(file)?;

        tracing::info!(
            "Loaded reference dataset from {:?} ({} rows)",
            self.path,
            dataset.len()
        );

        Ok(dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Sleep_Hours,Mindfulness_Minutes,Hydration_Litres,Stress_Level,Physical_Activity_Minutes,Alcohol_Units,Smoking_Cigarettes,Overall_Health_Score,Health_Status";

    #[test]
    fn test_parse_rows() {
        let csv = format!(
            "{HEADER}\n8,45,2.5,2,60,1,0,82.5,Good\n6,10,1.5,6,20,8,5,51.0,Average\n"
        );
        let dataset = CsvDataset::from_reader(csv.as_bytes()).expect("Should parse");

        assert_eq!(dataset.len(), 2);
        let first = &dataset.records()[0];
        assert_eq!(first.status, "Good");
        assert_eq!(first.score, 82.5);
        assert_eq!(first.input.hydration_litres, 2.5);
        assert_eq!(first.input.smoking_cigarettes, 0.0);
    }

    #[test]
    fn test_extra_columns_and_whitespace() {
        let csv = format!(
            "Person_ID,{HEADER},Notes\n7, 8 ,45,2.5,2,60,1,0,82.5, Good ,fine\n"
        );
        let dataset = CsvDataset::from_reader(csv.as_bytes()).expect("Should parse");
        assert_eq!(dataset.records()[0].status, "Good");
        assert_eq!(dataset.records()[0].input.sleep_hours, 8.0);
    }

    #[test]
    fn test_missing_column_is_error() {
        let csv = "Sleep_Hours,Overall_Health_Score,Health_Status\n8,80,Good\n";
        assert!(matches!(
            CsvDataset::from_reader(csv.as_bytes()),
            Err(DatasetError::Csv(_))
        ));
    }

    #[test]
    fn test_non_numeric_value_is_error() {
        let csv = format!("{HEADER}\n8,45,lots,2,60,1,0,82.5,Good\n");
        assert!(CsvDataset::from_reader(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_non_finite_value_is_invalid_row() {
        for cell in ["NaN", "inf"] {
            let csv = format!("{HEADER}\n8,45,2.5,2,60,1,0,{cell},Good\n");
            assert!(matches!(
                CsvDataset::from_reader(csv.as_bytes()),
                Err(DatasetError::InvalidRow { row: 2, .. })
            ));
        }
    }

    #[test]
    fn test_empty_status_is_error() {
        let csv = format!("{HEADER}\n8,45,2.5,2,60,1,0,82.5,\n");
        assert!(matches!(
            CsvDataset::from_reader(csv.as_bytes()),
            Err(DatasetError::InvalidRow { row: 2, .. })
        ));
    }

    #[test]
    fn test_empty_dataset_is_error() {
        assert!(matches!(
            CsvDataset::from_reader(HEADER.as_bytes()),
            Err(DatasetError::Empty)
        ));
    }

    #[test]
    fn test_missing_file() {
        let source = CsvDataset::new("/nonexistent/vitalscore/health.csv");
        assert!(matches!(source.load(), Err(DatasetError::NotFound(_))));
    }
}
