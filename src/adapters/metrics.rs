//! Metrics sinks
//!
//! Sinks are composable: combine a progress bar for feedback, console lines
//! for logs, and JSONL export for offline analysis.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    ports::{MetricsSink, MetricsSnapshot},
};

/// Progress bar sink - shows training progress
pub struct ProgressMetrics {
    progress_bar: Option<ProgressBar>,
}

impl ProgressMetrics {
    pub fn new() -> Self {
        Self { progress_bar: None }
    }
}

impl Default for ProgressMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsSink for ProgressMetrics {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes ({msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn record(&mut self, episode: usize, snapshot: &MetricsSnapshot) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.set_position(episode as u64);
            pb.set_message(format!(
                "win: {:.2} len: {:.1} eps: {:.3}",
                snapshot.win_rate, snapshot.mean_length, snapshot.epsilon
            ));
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish();
        }
        Ok(())
    }
}

/// Console sink - prints one line per statistics window
pub struct ConsoleMetrics;

impl MetricsSink for ConsoleMetrics {
    fn record(&mut self, episode: usize, snapshot: &MetricsSnapshot) -> Result<()> {
        println!(
            "episode {:>6}  win_rate: {:.3}  mean_length: {:.2}  epsilon: {:.4}  loss: {:.5}",
            episode, snapshot.win_rate, snapshot.mean_length, snapshot.epsilon, snapshot.mean_loss
        );
        Ok(())
    }
}

/// One exported line of the JSONL metrics stream
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsRecord {
    /// 1-based index of the window's last episode
    pub episode: usize,
    #[serde(flatten)]
    pub snapshot: MetricsSnapshot,
}

/// JSONL sink - exports one JSON object per statistics window
pub struct JsonlMetrics {
    writer: BufWriter<File>,
}

impl JsonlMetrics {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl MetricsSink for JsonlMetrics {
    fn record(&mut self, episode: usize, snapshot: &MetricsSnapshot) -> Result<()> {
        let record = MetricsRecord {
            episode,
            snapshot: *snapshot,
        };
        serde_json::to_writer(&mut self.writer, &record)?;
        writeln!(&mut self.writer)?;
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
