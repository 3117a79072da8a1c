//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, these traits define the boundaries
//! between the application and its backends (regression fit, dataset file).

mod reference_source;
mod score_model;

pub use reference_source::ReferenceSource;
pub use score_model::{ModelError, ScoreModel};
