//! Metrics port - abstraction for training observation
//!
//! Sinks are composable: the trainer holds a list of them and reports each
//! completed statistics window to all of them, so progress display, console
//! logging, and file export can be mixed without coupling the loop to any
//! output format.

use serde::{Deserialize, Serialize};

use crate::Result;

/// Aggregated statistics over one window of episodes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Fraction of the window's probe games that ended decisively
    pub win_rate: f64,
    /// Mean probe game length in half-moves
    pub mean_length: f64,
    /// Exploration rate at the end of the window
    pub epsilon: f64,
    /// Mean terminal training loss over the window
    pub mean_loss: f64,
}

/// Receiver for training progress.
///
/// # Event Sequence
///
/// 1. `on_training_start(total_episodes)` - once, before the first episode
/// 2. `record(episode, snapshot)` - once per completed statistics window
/// 3. `on_training_end()` - once, after the last episode
///
/// Each method returns `Result` so that sinks writing to files can surface
/// IO failures; the trainer aborts on the first sink error.
pub trait MetricsSink: Send {
    /// Called once before training begins.
    fn on_training_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    /// Called with the snapshot of each completed window.
    ///
    /// `episode` is the 1-based index of the window's last episode.
    fn record(&mut self, episode: usize, snapshot: &MetricsSnapshot) -> Result<()>;

    /// Called once after the last episode. Flush buffers and close files here.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
