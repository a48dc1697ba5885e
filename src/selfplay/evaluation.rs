//! Greedy evaluation games
//!
//! A probe game plays both sides greedily against the current estimator
//! without learning. The trainer runs one after every training episode to
//! measure progress, and one at the end for display.

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    game::{Board, Player, State, apply_action, winning_line},
    policy::choose_action,
    ports::{Renderer, ValueEstimator},
};

/// Result of one greedy evaluation game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvalOutcome {
    /// Total half-moves played
    pub move_count: usize,
    pub x_won: bool,
    pub o_won: bool,
}

impl EvalOutcome {
    /// Whether the game ended with a winner rather than a draw.
    pub fn decided(&self) -> bool {
        self.x_won || self.o_won
    }

    pub fn winner(&self) -> Option<Player> {
        if self.x_won {
            Some(Player::X)
        } else if self.o_won {
            Some(Player::O)
        } else {
            None
        }
    }
}

/// Play one game with both sides following the greedy policy.
///
/// No learning updates happen here. A negative epsilon is passed to action
/// selection so the RNG is never consumed and the game is a deterministic
/// function of the estimator. When a renderer is given, every position is
/// rendered as it is reached.
pub fn play_greedy(
    estimator: &mut dyn ValueEstimator,
    board_size: usize,
    rng: &mut StdRng,
    mut renderer: Option<&mut dyn Renderer>,
) -> Result<EvalOutcome> {
    let mut board = Board::new(board_size);
    let mut mover = Player::X;
    let mut move_count = 0;

    loop {
        let state = State::observe(&board, mover);
        let values = estimator.evaluate(&state)?;
        let chosen = choose_action(&values, &board, -1.0, rng)?;
        let outcome = apply_action(&mut board, mover, chosen.chosen)?;
        move_count += 1;

        let won = outcome.terminal && outcome.reward > 0.0;
        if let Some(r) = renderer.as_deref_mut() {
            let line = if won {
                winning_line(board.marks(mover))
            } else {
                None
            };
            r.render(&board, move_count, chosen.chosen, line.as_deref(), &values)?;
        }

        if outcome.terminal {
            let result = EvalOutcome {
                move_count,
                x_won: won && mover == Player::X,
                o_won: won && mover == Player::O,
            };
            if let Some(r) = renderer.as_deref_mut() {
                r.on_game_end(result.winner(), move_count)?;
            }
            return Ok(result);
        }
        mover = mover.opponent();
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;
    use crate::game::Grid;

    /// Fixed value surface, never updated.
    struct FrozenEstimator {
        values: Grid<f32>,
    }

    impl ValueEstimator for FrozenEstimator {
        fn evaluate(&mut self, _state: &State) -> Result<Grid<f32>> {
            Ok(self.values.clone())
        }

        fn update(
            &mut self,
            _states: &[State],
            _actions: &[Grid<f32>],
            _targets: &[f32],
        ) -> Result<()> {
            panic!("evaluation must not update the estimator");
        }

        fn loss(&mut self, _: &[State], _: &[Grid<f32>], _: &[f32]) -> Result<f32> {
            Ok(0.0)
        }
    }

    #[test]
    fn column_preference_lets_x_win_in_five() {
        // Both players prefer column 0 top-down, then (0, 1) and (1, 1).
        // X takes (0,0), (1,0), (2,0) on moves 1, 3, 5 and wins.
        let mut values = Grid::new(3);
        values.set(0, 0, 0.9);
        values.set(0, 1, 0.8);
        values.set(1, 0, 0.7);
        values.set(1, 1, 0.6);
        values.set(2, 0, 0.5);

        let mut estimator = FrozenEstimator { values };
        let mut rng = StdRng::seed_from_u64(0);
        let outcome = play_greedy(&mut estimator, 3, &mut rng, None).unwrap();
        assert!(outcome.x_won);
        assert!(!outcome.o_won);
        assert_eq!(outcome.move_count, 5);
        assert_eq!(outcome.winner(), Some(Player::X));
        assert!(outcome.decided());
    }

    #[test]
    fn flat_values_fill_the_board_row_major() {
        // All-equal values make both players play the first empty cell in
        // row-major order. X collects (0,0), (0,2), (1,1), (2,0) and the
        // anti-diagonal completes on move 7.
        let mut estimator = FrozenEstimator {
            values: Grid::new(3),
        };
        let mut rng = StdRng::seed_from_u64(0);
        let outcome = play_greedy(&mut estimator, 3, &mut rng, None).unwrap();
        assert!(outcome.x_won);
        assert_eq!(outcome.move_count, 7);
    }
}
