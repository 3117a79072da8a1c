//! # Vitalscore
//!
//! Lifestyle health-score dashboard for the terminal.
//!
//! This crate provides:
//! - A regression model fitted on a reference dataset at startup
//! - Score banding derived from observed health-status ranges
//! - Terminal UI with sliders, a text summary and a population histogram
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core types (LifestyleInput, ScoreBand, Histogram)
//! - `ports`: Trait definitions for external operations
//! - `adapters`: Concrete implementations (CSV dataset, regression fit)
//! - `application`: Prediction service and dashboard recompute
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use domain::{Category, LifestyleInput, PredictionResult, ScoreBand};

/// Result type for Vitalscore operations
pub type Result<T> = std::result::Result<T, VitalscoreError>;

/// Main error type for Vitalscore
#[derive(Debug, thiserror::Error)]
pub enum VitalscoreError {
    #[error("Dataset error: {0}")]
    Dataset(#[from] adapters::DatasetError),

    #[error("Model error: {0}")]
    Model(#[from] ports::ModelError),
}
