//! Ports - boundaries between the training loop and its collaborators
//!
//! The training pipeline talks to the outside world through three traits:
//! value estimation, metrics reporting, and board rendering. Concrete
//! implementations live in [`crate::adapters`].

pub mod estimator;
pub mod metrics;
pub mod renderer;

pub use estimator::{ValueEstimator, ensure_batch_aligned};
pub use metrics::{MetricsSink, MetricsSnapshot};
pub use renderer::Renderer;
