//! Epsilon-greedy action selection
//!
//! Selection is a pure function of the value grid, the board, and the RNG
//! draw: no game state is mutated here.

use rand::{Rng, rngs::StdRng, seq::IndexedRandom};

use crate::{
    Error, Result,
    game::{Action, Board, Grid},
};

/// Greedy and actually chosen actions for one half-move.
///
/// The two coincide unless the epsilon draw picked a random valid action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chosen {
    pub greedy: Action,
    pub chosen: Action,
}

/// Choose an action from the cells empty in both planes.
///
/// The greedy action is the argmax of `values` over valid cells; ties break
/// to the first valid cell in row-major order, which keeps selection
/// deterministic for reproducible runs. With probability `epsilon` the
/// chosen action is instead drawn uniformly from the valid cells. Any
/// `epsilon <= 0` disables exploration entirely (evaluation passes -1).
///
/// # Errors
///
/// - [`Error::ShapeMismatch`] if the value grid does not match the board.
/// - [`Error::NoValidActions`] if the board is full; the training loop never
///   calls this on a terminal board, so hitting it is a caller bug.
/// - [`Error::NonFiniteValue`] if a valid cell's estimate is NaN or infinite;
///   an argmax over NaN is undefined, so this aborts instead of silently
///   picking an arbitrary action.
pub fn choose_action(
    values: &Grid<f32>,
    board: &Board,
    epsilon: f64,
    rng: &mut StdRng,
) -> Result<Chosen> {
    if values.size() != board.size() {
        return Err(Error::ShapeMismatch {
            expected: board.size(),
            got: values.size(),
        });
    }

    let valid = board.empty_cells();
    if valid.is_empty() {
        return Err(Error::NoValidActions);
    }

    let mut greedy = valid[0];
    let mut best = f32::NEG_INFINITY;
    for &action in &valid {
        let value = values.get(action.row, action.col);
        if !value.is_finite() {
            return Err(Error::NonFiniteValue {
                row: action.row,
                col: action.col,
            });
        }
        if value > best {
            best = value;
            greedy = action;
        }
    }

    let chosen = if epsilon > 0.0 && rng.random::<f64>() < epsilon {
        *valid.choose(rng).ok_or(Error::NoValidActions)?
    } else {
        greedy
    };

    Ok(Chosen { greedy, chosen })
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;
    use crate::game::{Player, apply_action};

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn greedy_mode_returns_the_argmax() {
        let board = Board::new(3);
        let mut values = Grid::new(3);
        values.set(2, 1, 0.9);
        let chosen = choose_action(&values, &board, -1.0, &mut rng()).unwrap();
        assert_eq!(chosen.greedy, Action::new(2, 1));
        assert_eq!(chosen.chosen, chosen.greedy);
    }

    #[test]
    fn greedy_action_skips_occupied_cells() {
        let mut board = Board::new(3);
        let mut values = Grid::new(3);
        values.set(0, 0, 1.0);
        values.set(1, 1, 0.5);
        apply_action(&mut board, Player::O, Action::new(0, 0)).unwrap();

        let chosen = choose_action(&values, &board, -1.0, &mut rng()).unwrap();
        assert_eq!(chosen.greedy, Action::new(1, 1));
    }

    #[test]
    fn exploration_still_returns_a_valid_cell() {
        let mut board = Board::new(3);
        apply_action(&mut board, Player::X, Action::new(1, 1)).unwrap();
        apply_action(&mut board, Player::O, Action::new(0, 0)).unwrap();
        let values = Grid::new(3);

        let mut r = rng();
        for _ in 0..50 {
            let chosen = choose_action(&values, &board, 1.0, &mut r).unwrap();
            assert!(board.is_empty_cell(chosen.chosen));
        }
    }

    #[test]
    fn ties_break_to_first_row_major_cell() {
        let board = Board::new(3);
        let values = Grid::filled(3, 0.25);
        let chosen = choose_action(&values, &board, -1.0, &mut rng()).unwrap();
        assert_eq!(chosen.greedy, Action::new(0, 0));
    }

    #[test]
    fn full_board_is_rejected() {
        let mut board = Board::new(2);
        for row in 0..2 {
            for col in 0..2 {
                board.marks_mut(Player::X).set(row, col, true);
            }
        }
        let values = Grid::new(2);
        let err = choose_action(&values, &board, 0.5, &mut rng()).unwrap_err();
        assert!(matches!(err, Error::NoValidActions));
    }

    #[test]
    fn nan_estimates_are_fatal() {
        let board = Board::new(3);
        let mut values = Grid::new(3);
        values.set(0, 1, f32::NAN);
        let err = choose_action(&values, &board, -1.0, &mut rng()).unwrap_err();
        assert!(matches!(err, Error::NonFiniteValue { row: 0, col: 1 }));
    }

    #[test]
    fn mismatched_value_grid_is_rejected() {
        let board = Board::new(3);
        let values = Grid::new(4);
        let err = choose_action(&values, &board, -1.0, &mut rng()).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { expected: 3, got: 4 }));
    }
}
