//! Application layer: Use cases and services.
//!
//! This module orchestrates domain logic with ports to implement
//! the prediction pipeline and the dashboard recompute.

mod dashboard;
mod prediction;

pub use dashboard::{
    format_summary, recompute, DashboardSession, DashboardView, ReferenceContext,
};
pub use prediction::PredictionService;
