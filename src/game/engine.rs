//! Move application, reward computation, and terminal detection

use crate::{Error, Result};

use super::board::{Action, Board, Grid, Player};

/// Reward for a winning move
pub const REWARD_WIN: f32 = 1.0;
/// Reward for a move that fills the board without a winner
pub const REWARD_DRAW: f32 = 0.0;
/// Reward for an ordinary move
pub const REWARD_ACTION: f32 = 0.0;

/// Result of applying one half-move
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveOutcome {
    pub reward: f32,
    pub terminal: bool,
}

/// Apply the mover's action to the board in place.
///
/// Returns the mover's reward and whether the game ended. Win pays
/// [`REWARD_WIN`], a board-filling move with no winner pays [`REWARD_DRAW`],
/// anything else pays [`REWARD_ACTION`].
///
/// # Errors
///
/// Returns [`Error::CellOccupied`] if the target cell already holds a mark.
/// That is a contract violation by the caller, not a recoverable game event.
pub fn apply_action(board: &mut Board, mover: Player, action: Action) -> Result<MoveOutcome> {
    if !board.is_empty_cell(action) {
        return Err(Error::CellOccupied {
            row: action.row,
            col: action.col,
        });
    }
    board.marks_mut(mover).set(action.row, action.col, true);

    if winning_line(board.marks(mover)).is_some() {
        return Ok(MoveOutcome {
            reward: REWARD_WIN,
            terminal: true,
        });
    }
    if board.is_full() {
        return Ok(MoveOutcome {
            reward: REWARD_DRAW,
            terminal: true,
        });
    }
    Ok(MoveOutcome {
        reward: REWARD_ACTION,
        terminal: false,
    })
}

/// Find a fully marked line in one player's plane.
///
/// A player wins iff an entire row, column, or either diagonal is marked.
/// The win length is always the board side N. Returns the cells of the first
/// such line in row/column/diagonal scan order.
pub fn winning_line(marks: &Grid<bool>) -> Option<Vec<(usize, usize)>> {
    let n = marks.size();

    for row in 0..n {
        if (0..n).all(|col| marks.get(row, col)) {
            return Some((0..n).map(|col| (row, col)).collect());
        }
    }
    for col in 0..n {
        if (0..n).all(|row| marks.get(row, col)) {
            return Some((0..n).map(|row| (row, col)).collect());
        }
    }
    if (0..n).all(|i| marks.get(i, i)) {
        return Some((0..n).map(|i| (i, i)).collect());
    }
    if (0..n).all(|i| marks.get(i, n - 1 - i)) {
        return Some((0..n).map(|i| (i, n - 1 - i)).collect());
    }
    None
}

/// Whether the board is a finished draw: full with no winner on either plane.
pub fn is_draw(board: &Board) -> bool {
    board.is_full()
        && winning_line(board.marks(Player::X)).is_none()
        && winning_line(board.marks(Player::O)).is_none()
}
