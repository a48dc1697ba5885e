//! qplay CLI - train a tabular Q-learner through self-play
//!
//! Runs the self-play schedule against the built-in lookup-table estimator,
//! reports windowed statistics while training, and finishes with a rendered
//! greedy demonstration game.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use qplay::{
    TrainerConfig,
    adapters::{AsciiRenderer, ConsoleMetrics, JsonlMetrics, ProgressMetrics, TableEstimator},
    selfplay::Trainer,
};

#[derive(Parser)]
#[command(name = "qplay")]
#[command(version, about = "Self-play Q-learning for N×N tic-tac-toe", long_about = None)]
struct Args {
    /// Board side length
    #[arg(long, default_value_t = 3)]
    board_size: usize,

    /// Discount factor for bootstrapped targets
    #[arg(long, default_value_t = 0.8)]
    gamma: f64,

    /// Exploration rate at episode 1
    #[arg(long, default_value_t = 1.0)]
    epsilon_initial: f64,

    /// Exploration rate after annealing
    #[arg(long, default_value_t = 0.01)]
    epsilon_final: f64,

    /// Episodes over which epsilon anneals linearly
    #[arg(long, default_value_t = 5000)]
    anneal_episodes: usize,

    /// Total training episodes
    #[arg(long, default_value_t = 10000)]
    episodes: usize,

    /// Episodes per statistics window
    #[arg(long, default_value_t = 100)]
    stats_window: usize,

    /// Estimator step size toward targets
    #[arg(long, default_value_t = 0.05)]
    learning_rate: f32,

    /// Value assigned to unseen states
    #[arg(long, default_value_t = 0.0)]
    initial_value: f32,

    /// RNG seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Show a progress bar
    #[arg(long, default_value_t = true)]
    progress: bool,

    /// Print one console line per statistics window
    #[arg(long, default_value_t = false)]
    log_windows: bool,

    /// Write window snapshots to a JSONL file
    #[arg(long)]
    metrics: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = TrainerConfig::default()
        .with_board_size(args.board_size)
        .with_gamma(args.gamma)
        .with_epsilon_schedule(args.epsilon_initial, args.epsilon_final, args.anneal_episodes)
        .with_episodes(args.episodes)
        .with_stats_window(args.stats_window);
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let mut trainer = Trainer::new(config)?;
    if args.progress {
        trainer = trainer.with_metrics(Box::new(ProgressMetrics::new()));
    }
    if args.log_windows {
        trainer = trainer.with_metrics(Box::new(ConsoleMetrics));
    }
    if let Some(path) = &args.metrics {
        trainer = trainer.with_metrics(Box::new(JsonlMetrics::new(path)?));
    }
    trainer = trainer.with_renderer(Box::new(AsciiRenderer::stdout()));

    let mut estimator =
        TableEstimator::new(args.board_size, args.learning_rate, args.initial_value);
    let report = trainer.run(&mut estimator)?;

    println!("\n=== Training Complete ===");
    println!("  Episodes:      {}", report.episodes);
    println!("  Final epsilon: {:.4}", report.final_epsilon);
    println!("  States seen:   {}", estimator.states_seen());
    match report.final_game.winner() {
        Some(player) => println!(
            "  Final game:    {:?} wins in {} moves",
            player, report.final_game.move_count
        ),
        None => println!(
            "  Final game:    draw after {} moves",
            report.final_game.move_count
        ),
    }

    Ok(())
}
