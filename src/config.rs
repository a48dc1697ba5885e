//! Training configuration.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Configuration for a self-play training run.
///
/// All tunables of the training loop live here; there is no module-level
/// mutable state. The estimator's learning rate is deliberately absent — it
/// belongs to the estimator adapter.
///
/// # Examples
///
/// ```
/// use qplay::TrainerConfig;
///
/// let config = TrainerConfig::new()
///     .with_episodes(2_000)
///     .with_gamma(0.9)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainerConfig {
    /// Board side length N
    pub board_size: usize,

    /// Reward discount rate, in [0, 1)
    pub gamma: f64,

    /// Initial exploration rate
    pub epsilon_initial: f64,

    /// Final exploration rate (epsilon is held here once reached)
    pub epsilon_final: f64,

    /// Number of episodes over which epsilon anneals from initial to final
    pub epsilon_anneal_episodes: usize,

    /// Number of training episodes to run
    pub episode_max: usize,

    /// Number of episodes accumulated per stats window
    pub stats_window: usize,

    /// Random seed for reproducible runs
    pub seed: Option<u64>,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            board_size: 3,
            gamma: 0.8,
            epsilon_initial: 1.0,
            epsilon_final: 0.01,
            epsilon_anneal_episodes: 5_000,
            episode_max: 10_000,
            stats_window: 100,
            seed: None,
        }
    }
}

impl TrainerConfig {
    /// Create a configuration with the default tunables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the board side length.
    pub fn with_board_size(mut self, board_size: usize) -> Self {
        self.board_size = board_size;
        self
    }

    /// Set the reward discount rate.
    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    /// Set the exploration schedule endpoints and annealing length.
    pub fn with_epsilon_schedule(mut self, initial: f64, final_: f64, anneal: usize) -> Self {
        self.epsilon_initial = initial;
        self.epsilon_final = final_;
        self.epsilon_anneal_episodes = anneal;
        self
    }

    /// Set the number of training episodes.
    pub fn with_episodes(mut self, episode_max: usize) -> Self {
        self.episode_max = episode_max;
        self
    }

    /// Set the stats window size.
    pub fn with_stats_window(mut self, stats_window: usize) -> Self {
        self.stats_window = stats_window;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check the configuration before training starts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] describing the first invalid
    /// field found.
    pub fn validate(&self) -> Result<()> {
        if self.board_size < 2 {
            return Err(invalid(format!(
                "board size must be at least 2, got {}",
                self.board_size
            )));
        }
        if !self.gamma.is_finite() || !(0.0..1.0).contains(&self.gamma) {
            return Err(invalid(format!(
                "gamma must lie in [0, 1), got {}",
                self.gamma
            )));
        }
        if !self.epsilon_initial.is_finite() || !self.epsilon_final.is_finite() {
            return Err(invalid("epsilon endpoints must be finite".to_string()));
        }
        if self.epsilon_final > self.epsilon_initial {
            return Err(invalid(format!(
                "epsilon_final ({}) must not exceed epsilon_initial ({})",
                self.epsilon_final, self.epsilon_initial
            )));
        }
        if self.epsilon_anneal_episodes == 0 {
            return Err(invalid(
                "epsilon_anneal_episodes must be positive".to_string(),
            ));
        }
        if self.stats_window == 0 {
            return Err(invalid("stats_window must be positive".to_string()));
        }
        Ok(())
    }
}

fn invalid(message: String) -> Error {
    Error::InvalidConfiguration { message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(TrainerConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_tiny_board() {
        let config = TrainerConfig::new().with_board_size(1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_gamma_of_one() {
        let config = TrainerConfig::new().with_gamma(1.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_anneal_episodes() {
        let config = TrainerConfig::new().with_epsilon_schedule(1.0, 0.1, 0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_rising_epsilon_schedule() {
        let config = TrainerConfig::new().with_epsilon_schedule(0.1, 0.5, 100);
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_stats_window() {
        let config = TrainerConfig::new().with_stats_window(0);
        assert!(config.validate().is_err());
    }
}
