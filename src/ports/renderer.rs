//! Renderer port - abstraction for displaying a game in progress

use crate::{
    Result,
    game::{Action, Board, Grid, Player},
};

/// Receiver for the move-by-move display of a demonstration game.
///
/// Only greedy evaluation games are rendered; self-play training episodes
/// never reach a renderer. Implementations get the board after each applied
/// move together with the value estimates that motivated it.
pub trait Renderer: Send {
    /// Called after each applied move.
    ///
    /// `win_line` is the completed line when this move ended the game with a
    /// win, `None` otherwise. `values` holds the mover's action-value
    /// estimates for the position the move was chosen in.
    fn render(
        &mut self,
        board: &Board,
        move_num: usize,
        last_action: Action,
        win_line: Option<&[(usize, usize)]>,
        values: &Grid<f32>,
    ) -> Result<()>;

    /// Called once when the game ends. `winner` is `None` for a draw.
    fn on_game_end(&mut self, _winner: Option<Player>, _move_count: usize) -> Result<()> {
        Ok(())
    }
}
