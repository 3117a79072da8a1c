//! Reference source port: Trait for loading the reference dataset.

use crate::domain::ReferenceDataset;

/// Anything that can produce the reference dataset once at startup.
pub trait ReferenceSource {
    /// Error type for load failures.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load every record.
    ///
    /// # Errors
    /// Returns an error if the source is missing or malformed.
    fn load(&self) -> Result<ReferenceDataset, Self::Error>;
}
