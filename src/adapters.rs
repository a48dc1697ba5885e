//! Adapters - concrete implementations of the ports

pub mod ascii_renderer;
pub mod metrics;
pub mod table_estimator;

pub use ascii_renderer::AsciiRenderer;
pub use metrics::{ConsoleMetrics, JsonlMetrics, ProgressMetrics};
pub use table_estimator::TableEstimator;
