//! TUI module: Terminal User Interface using Ratatui.
//!
//! One dashboard screen with:
//! - Lifestyle sliders and the histogram bin control
//! - Predicted score and category
//! - Reference score histogram with the user's score marked

mod app;
mod styles;
mod ui;

pub use app::App;
pub use styles::Theme;
