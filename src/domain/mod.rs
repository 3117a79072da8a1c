//! Domain layer: Core types and logic.
//!
//! Pure Rust types with no I/O. Everything here is deterministic and
//! safe to share across sessions.

mod band;
pub mod histogram;
mod lifestyle;
mod prediction;
mod reference;

pub use band::{categorize, derive_bands, overlapping_pairs, Category, ScoreBand, UNKNOWN_LABEL};
pub use histogram::Histogram;
pub use lifestyle::{
    slider, Feature, LifestyleInput, SliderSpec, FEATURE_COUNT, FEATURE_NAMES, SLIDERS,
};
pub use prediction::{sigmoid, PredictionResult, ScoreLink};
pub use reference::{ReferenceDataset, ReferenceRecord};
