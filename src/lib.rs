//! Self-play Q-learning for tic-tac-toe
//!
//! This crate provides:
//! - N×N tic-tac-toe with two-plane board state and full-length win lines
//! - A self-play training loop with delayed two-ply credit assignment and
//!   zero-sum terminal targets
//! - Symmetry expansion of training samples over rotations and flips
//! - Ports for the value estimator, metrics sinks, and game rendering, with
//!   a tabular estimator and console/JSONL adapters included

pub mod adapters;
pub mod config;
pub mod error;
pub mod game;
pub mod policy;
pub mod ports;
pub mod selfplay;

pub use config::TrainerConfig;
pub use error::{Error, Result};
pub use game::{Action, Board, Grid, Player, State};
pub use policy::{Chosen, choose_action};
pub use ports::{MetricsSink, MetricsSnapshot, Renderer, ValueEstimator};
pub use selfplay::{EvalOutcome, Trainer, TrainingReport, play_greedy};
