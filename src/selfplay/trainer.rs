//! Self-play Q-learning trainer
//!
//! One estimator plays both sides of every episode. Credit assignment is
//! delayed by two half-moves: a player's transition is scored only once that
//! player moves again (bootstrapped against the next greedy value) or the
//! game ends (scored with the zero-sum terminal rule). Every update batch is
//! expanded through board symmetries before it reaches the estimator.

use std::collections::VecDeque;

use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    config::TrainerConfig,
    game::{Board, Grid, Player, State, apply_action, expand},
    policy::choose_action,
    ports::{MetricsSink, MetricsSnapshot, Renderer, ValueEstimator},
    selfplay::evaluation::{EvalOutcome, play_greedy},
};

/// A half-move awaiting its learning target.
#[derive(Debug, Clone)]
struct Transition {
    state: State,
    action: Grid<f32>,
    reward: f32,
}

/// FIFO of unscored transitions, one slot per player.
///
/// During steady play the queue alternates between one and two entries: the
/// mover's oldest transition leaves as the mover acts again, and the fresh
/// transition enters after the move is applied. It never holds more than one
/// transition per player.
struct PendingQueue {
    slots: VecDeque<Transition>,
}

const PENDING_CAPACITY: usize = 2;

impl PendingQueue {
    fn new() -> Self {
        PendingQueue {
            slots: VecDeque::with_capacity(PENDING_CAPACITY),
        }
    }

    fn push(&mut self, transition: Transition) -> Result<()> {
        if self.slots.len() == PENDING_CAPACITY {
            return Err(Error::QueueOverflow {
                capacity: PENDING_CAPACITY,
            });
        }
        self.slots.push_back(transition);
        Ok(())
    }

    /// The current mover's previous transition.
    ///
    /// Only available once both players hold a pending transition; with a
    /// single entry the front slot belongs to the other player and is not
    /// ready for scoring.
    fn take_ready(&mut self) -> Option<Transition> {
        if self.slots.len() == PENDING_CAPACITY {
            self.slots.pop_front()
        } else {
            None
        }
    }

    /// The losing opponent's transition at game end, if any.
    fn take_latest(&mut self) -> Option<Transition> {
        self.slots.pop_back()
    }
}

/// Per-episode observations accumulated over one statistics window.
struct StatsWindow {
    entries: Vec<(bool, usize, f32)>,
}

impl StatsWindow {
    fn new() -> Self {
        StatsWindow {
            entries: Vec::new(),
        }
    }

    fn push(&mut self, decided: bool, length: usize, loss: f32) {
        self.entries.push((decided, length, loss));
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    /// Aggregate and clear the window.
    fn snapshot(&mut self, epsilon: f64) -> MetricsSnapshot {
        let n = self.entries.len().max(1) as f64;
        let decided = self.entries.iter().filter(|(d, _, _)| *d).count();
        let length_sum: usize = self.entries.iter().map(|(_, l, _)| *l).sum();
        let loss_sum: f64 = self.entries.iter().map(|(_, _, l)| *l as f64).sum();
        self.entries.clear();
        MetricsSnapshot {
            win_rate: decided as f64 / n,
            mean_length: length_sum as f64 / n,
            epsilon,
            mean_loss: loss_sum / n,
        }
    }
}

/// Summary returned by a completed training run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingReport {
    pub episodes: usize,
    pub final_epsilon: f64,
    /// Outcome of the rendered demonstration game played after training
    pub final_game: EvalOutcome,
}

/// Self-play training loop over an external value estimator.
pub struct Trainer {
    config: TrainerConfig,
    sinks: Vec<Box<dyn MetricsSink>>,
    renderer: Option<Box<dyn Renderer>>,
    rng: StdRng,
    epsilon: f64,
}

impl Trainer {
    /// Create a trainer from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if the configuration fails
    /// validation.
    pub fn new(config: TrainerConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        let epsilon = config.epsilon_initial;
        Ok(Trainer {
            config,
            sinks: Vec::new(),
            renderer: None,
            rng,
            epsilon,
        })
    }

    /// Add a metrics sink. Sinks receive every window snapshot in order.
    pub fn with_metrics(mut self, sink: Box<dyn MetricsSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Set the renderer for the final demonstration game.
    pub fn with_renderer(mut self, renderer: Box<dyn Renderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Current exploration rate.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Run the full training schedule against `estimator`.
    ///
    /// Each episode is one self-play game followed by one greedy probe game
    /// that feeds the statistics window; epsilon anneals linearly after
    /// every episode. After the last episode one more greedy game is played
    /// through the renderer, if any.
    pub fn run(&mut self, estimator: &mut dyn ValueEstimator) -> Result<TrainingReport> {
        let total = self.config.episode_max;
        for sink in &mut self.sinks {
            sink.on_training_start(total)?;
        }

        let step = (self.config.epsilon_initial - self.config.epsilon_final)
            / self.config.epsilon_anneal_episodes as f64;
        let mut board = Board::new(self.config.board_size);
        let mut window = StatsWindow::new();

        for episode in 1..=total {
            let loss = self.run_episode(estimator, &mut board)?;
            let probe = play_greedy(estimator, self.config.board_size, &mut self.rng, None)?;
            window.push(probe.decided(), probe.move_count, loss);

            if self.epsilon > self.config.epsilon_final {
                self.epsilon = (self.epsilon - step).max(self.config.epsilon_final);
            }

            if window.len() == self.config.stats_window {
                let snapshot = window.snapshot(self.epsilon);
                for sink in &mut self.sinks {
                    sink.record(episode, &snapshot)?;
                }
            }
        }

        for sink in &mut self.sinks {
            sink.on_training_end()?;
        }

        let final_game = play_greedy(
            estimator,
            self.config.board_size,
            &mut self.rng,
            self.renderer.as_deref_mut().map(|r| r as &mut dyn Renderer),
        )?;

        Ok(TrainingReport {
            episodes: total,
            final_epsilon: self.epsilon,
            final_game,
        })
    }

    /// Play one self-play episode with learning, returning the terminal loss.
    fn run_episode(&mut self, estimator: &mut dyn ValueEstimator, board: &mut Board) -> Result<f32> {
        board.clear();
        let mut pending = PendingQueue::new();
        let mut mover = Player::X;
        let gamma = self.config.gamma as f32;

        loop {
            let state = State::observe(board, mover);
            let values = estimator.evaluate(&state)?;
            let chosen = choose_action(&values, board, self.epsilon, &mut self.rng)?;

            // Score the mover's previous transition against the best value
            // available now, whether or not exploration takes it.
            if let Some(prev) = pending.take_ready() {
                let bootstrap = values.get(chosen.greedy.row, chosen.greedy.col);
                let target = prev.reward + gamma * bootstrap;
                let expanded = expand(&prev.state, &prev.action);
                let targets = vec![target; expanded.len()];
                estimator.update(&expanded.states, &expanded.actions, &targets)?;
            }

            let outcome = apply_action(board, mover, chosen.chosen)?;

            if outcome.terminal {
                // Terminal credit for both sides in one batch: the final
                // mover gets the raw reward, the opponent the zero-sum
                // discounted complement.
                let action = chosen.chosen.one_hot(board.size());
                let expanded = expand(&state, &action);
                let mut states = expanded.states;
                let mut actions = expanded.actions;
                let mut targets = vec![outcome.reward; states.len()];

                if let Some(opponent) = pending.take_latest() {
                    let opponent_target = opponent.reward - gamma * outcome.reward;
                    let expanded = expand(&opponent.state, &opponent.action);
                    targets.extend(std::iter::repeat_n(opponent_target, expanded.len()));
                    states.extend(expanded.states);
                    actions.extend(expanded.actions);
                }

                estimator.update(&states, &actions, &targets)?;
                return estimator.loss(&states, &actions, &targets);
            }

            pending.push(Transition {
                state,
                action: chosen.chosen.one_hot(board.size()),
                reward: outcome.reward,
            })?;
            mover = mover.opponent();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transition(reward: f32) -> Transition {
        let board = Board::new(3);
        Transition {
            state: State::observe(&board, Player::X),
            action: crate::game::Action::new(0, 0).one_hot(3),
            reward,
        }
    }

    #[test]
    fn pending_front_is_ready_only_when_both_players_are_queued() {
        let mut queue = PendingQueue::new();
        queue.push(transition(0.1)).unwrap();
        assert!(queue.take_ready().is_none());

        queue.push(transition(0.2)).unwrap();
        assert_eq!(queue.take_ready().unwrap().reward, 0.1);
        // Back down to one entry: the remaining slot is the other player's.
        assert!(queue.take_ready().is_none());
        assert_eq!(queue.take_latest().unwrap().reward, 0.2);
    }

    #[test]
    fn pending_queue_latest_is_the_back() {
        let mut queue = PendingQueue::new();
        queue.push(transition(0.1)).unwrap();
        queue.push(transition(0.2)).unwrap();
        assert_eq!(queue.take_latest().unwrap().reward, 0.2);
        assert_eq!(queue.take_latest().unwrap().reward, 0.1);
    }

    #[test]
    fn pending_queue_rejects_a_third_entry() {
        let mut queue = PendingQueue::new();
        queue.push(transition(0.0)).unwrap();
        queue.push(transition(0.0)).unwrap();
        let err = queue.push(transition(0.0)).unwrap_err();
        assert!(matches!(err, Error::QueueOverflow { capacity: 2 }));
    }

    #[test]
    fn stats_window_aggregates_and_clears() {
        let mut window = StatsWindow::new();
        window.push(true, 5, 0.2);
        window.push(false, 9, 0.4);
        assert_eq!(window.len(), 2);

        let snapshot = window.snapshot(0.3);
        assert!((snapshot.win_rate - 0.5).abs() < 1e-12);
        assert!((snapshot.mean_length - 7.0).abs() < 1e-12);
        assert!((snapshot.mean_loss - 0.3).abs() < 1e-6);
        assert!((snapshot.epsilon - 0.3).abs() < 1e-12);
        assert_eq!(window.len(), 0);
    }

    #[test]
    fn trainer_rejects_invalid_configuration() {
        let config = TrainerConfig::default().with_gamma(1.5);
        assert!(matches!(
            Trainer::new(config),
            Err(Error::InvalidConfiguration { .. })
        ));
    }
}
