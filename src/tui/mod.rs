//! TUI module: Terminal User Interface using Ratatui.
//!
//! Provides the assessment form and the risk report view.

mod app;
mod styles;
mod ui;
mod worker;

pub use app::App;
pub use styles::Theme;
pub use worker::{AssessmentProgress, AssessmentWorker, AssessmentWorkerHandle};
