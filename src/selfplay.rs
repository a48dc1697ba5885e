//! Self-play training and greedy evaluation

pub mod evaluation;
pub mod trainer;

pub use evaluation::{EvalOutcome, play_greedy};
pub use trainer::{Trainer, TrainingReport};
