//! Adapters layer: Concrete implementations of ports.
//!
//! These modules contain the actual integration with external libraries:
//! - `csv`: the reference dataset file
//! - `regression`: least-squares / IRLS fitting over `ndarray`

pub mod csv;
pub mod regression;

pub use self::csv::{CsvDataset, DatasetError};
pub use regression::LinearModel;
