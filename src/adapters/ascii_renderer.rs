//! Text renderer for demonstration games

use std::io::Write;

use crate::{
    Result,
    game::{Action, Board, Grid, Player},
    ports::Renderer,
};

/// Renders each position of a greedy game as an ASCII board.
///
/// Cells show `X`/`O` marks and `.` for empty; the cells of a completed win
/// line are wrapped in brackets. The value estimates behind the rendered
/// move are printed alongside the board.
pub struct AsciiRenderer<W: Write + Send> {
    out: W,
    show_values: bool,
}

impl AsciiRenderer<std::io::Stdout> {
    /// Renderer writing to standard output.
    pub fn stdout() -> Self {
        AsciiRenderer {
            out: std::io::stdout(),
            show_values: true,
        }
    }
}

impl<W: Write + Send> AsciiRenderer<W> {
    pub fn new(out: W) -> Self {
        AsciiRenderer {
            out,
            show_values: false,
        }
    }

    fn mark(board: &Board, row: usize, col: usize) -> char {
        if board.marks(Player::X).get(row, col) {
            'X'
        } else if board.marks(Player::O).get(row, col) {
            'O'
        } else {
            '.'
        }
    }
}

impl<W: Write + Send> Renderer for AsciiRenderer<W> {
    fn render(
        &mut self,
        board: &Board,
        move_num: usize,
        last_action: Action,
        win_line: Option<&[(usize, usize)]>,
        values: &Grid<f32>,
    ) -> Result<()> {
        writeln!(
            self.out,
            "Move {} at ({}, {})",
            move_num, last_action.row, last_action.col
        )?;
        for row in 0..board.size() {
            for col in 0..board.size() {
                let mark = Self::mark(board, row, col);
                let on_line = win_line.is_some_and(|line| line.contains(&(row, col)));
                if on_line {
                    write!(self.out, "[{mark}]")?;
                } else {
                    write!(self.out, " {mark} ")?;
                }
            }
            if self.show_values {
                write!(self.out, "   ")?;
                for col in 0..board.size() {
                    write!(self.out, " {:>6.3}", values.get(row, col))?;
                }
            }
            writeln!(self.out)?;
        }
        writeln!(self.out)?;
        Ok(())
    }

    fn on_game_end(&mut self, winner: Option<Player>, move_count: usize) -> Result<()> {
        match winner {
            Some(player) => writeln!(self.out, "{player:?} wins in {move_count} moves")?,
            None => writeln!(self.out, "Draw after {move_count} moves")?,
        }
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::apply_action;

    #[test]
    fn marks_and_win_line_appear_in_output() {
        let mut board = Board::new(3);
        apply_action(&mut board, Player::X, Action::new(0, 0)).unwrap();
        apply_action(&mut board, Player::O, Action::new(1, 1)).unwrap();

        let mut renderer = AsciiRenderer::new(Vec::new());
        renderer
            .render(
                &board,
                2,
                Action::new(1, 1),
                Some(&[(0, 0)]),
                &Grid::new(3),
            )
            .unwrap();
        renderer.on_game_end(Some(Player::X), 5).unwrap();

        let text = String::from_utf8(renderer.out).unwrap();
        assert!(text.contains("[X]"));
        assert!(text.contains("O"));
        assert!(text.contains("Move 2 at (1, 1)"));
        assert!(text.contains("X wins in 5 moves"));
    }

    #[test]
    fn draw_message_has_no_winner() {
        let mut renderer = AsciiRenderer::new(Vec::new());
        renderer.on_game_end(None, 9).unwrap();
        let text = String::from_utf8(renderer.out).unwrap();
        assert!(text.contains("Draw after 9 moves"));
    }
}
