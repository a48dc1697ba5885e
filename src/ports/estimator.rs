//! Value estimator port - abstraction over the learned Q-function
//!
//! The training loop never manipulates function-approximator internals; it
//! evaluates states, pushes batched targets, and asks for a loss. Anything
//! that can do those three things can be trained, from a lookup table to a
//! neural network.

use crate::{
    Error, Result,
    game::{Grid, State},
};

/// The learned mapping from states to per-cell action values.
///
/// # Contract
///
/// * `evaluate` returns an N×N grid matching the state's board size.
/// * `update` receives index-aligned batches: `targets[i]` is the new value
///   for the cell marked in `actions[i]` at `states[i]`. One call may mix
///   samples from several positions (symmetry variants, both players'
///   terminal transitions).
/// * `loss` measures the current fit against the same batch layout without
///   changing any parameters. The pipeline calls it after the terminal
///   update of each episode.
///
/// All methods take `&mut self` so that implementations can cache freely.
pub trait ValueEstimator: Send {
    /// Estimate action values for every cell of `state`'s board.
    fn evaluate(&mut self, state: &State) -> Result<Grid<f32>>;

    /// Apply one training step toward the given targets.
    fn update(&mut self, states: &[State], actions: &[Grid<f32>], targets: &[f32]) -> Result<()>;

    /// Current loss against the batch, without updating parameters.
    fn loss(&mut self, states: &[State], actions: &[Grid<f32>], targets: &[f32]) -> Result<f32>;
}

/// Check that the three batch slices are index-aligned.
///
/// Estimator implementations call this at the top of `update` and `loss`.
///
/// # Errors
///
/// Returns [`Error::BatchLengthMismatch`] when the lengths differ.
pub fn ensure_batch_aligned(
    states: &[State],
    actions: &[Grid<f32>],
    targets: &[f32],
) -> Result<()> {
    if states.len() != actions.len() || states.len() != targets.len() {
        return Err(Error::BatchLengthMismatch {
            states: states.len(),
            actions: actions.len(),
            targets: targets.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Action, Board, Player};

    #[test]
    fn aligned_batches_pass() {
        let board = Board::new(3);
        let states = vec![State::observe(&board, Player::X)];
        let actions = vec![Action::new(0, 0).one_hot(3)];
        let targets = vec![0.5];
        assert!(ensure_batch_aligned(&states, &actions, &targets).is_ok());
    }

    #[test]
    fn ragged_batches_are_rejected() {
        let board = Board::new(3);
        let states = vec![State::observe(&board, Player::X)];
        let actions = vec![Action::new(0, 0).one_hot(3)];
        let targets = vec![0.5, 0.1];
        let err = ensure_batch_aligned(&states, &actions, &targets).unwrap_err();
        assert!(matches!(
            err,
            Error::BatchLengthMismatch {
                states: 1,
                actions: 1,
                targets: 2,
            }
        ));
    }
}
