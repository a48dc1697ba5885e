//! Board state representation and basic operations

use serde::{Deserialize, Serialize};

/// A player in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

/// A single cell coordinate on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    pub row: usize,
    pub col: usize,
}

impl Action {
    pub fn new(row: usize, col: usize) -> Self {
        Action { row, col }
    }

    /// Encode the action as an N×N one-hot grid.
    pub fn one_hot(self, size: usize) -> Grid<f32> {
        let mut grid = Grid::new(size);
        grid.set(self.row, self.col, 1.0);
        grid
    }
}

/// Square row-major grid of cells.
///
/// Used as `Grid<bool>` for mark planes and `Grid<f32>` for value estimates,
/// one-hot actions, and state channels.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    size: usize,
    cells: Vec<T>,
}

impl<T: Copy + Default> Grid<T> {
    /// Create a grid filled with the default value.
    pub fn new(size: usize) -> Self {
        Grid {
            size,
            cells: vec![T::default(); size * size],
        }
    }

    /// Create a grid filled with a single value.
    pub fn filled(size: usize, value: T) -> Self {
        Grid {
            size,
            cells: vec![value; size * size],
        }
    }

    /// Create a grid from a per-cell function.
    pub fn from_fn(size: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut cells = Vec::with_capacity(size * size);
        for row in 0..size {
            for col in 0..size {
                cells.push(f(row, col));
            }
        }
        Grid { size, cells }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, row: usize, col: usize) -> T {
        self.cells[row * self.size + col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: T) {
        self.cells[row * self.size + col] = value;
    }

    /// Row-major cell slice
    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    /// Rotate 90 degrees counter-clockwise.
    pub fn rotate90(&self) -> Self {
        let n = self.size;
        Grid::from_fn(n, |row, col| self.get(col, n - 1 - row))
    }

    /// Mirror across the vertical axis (left-right flip).
    pub fn flip_horizontal(&self) -> Self {
        let n = self.size;
        Grid::from_fn(n, |row, col| self.get(row, n - 1 - col))
    }

    /// Mirror across the horizontal axis (up-down flip).
    pub fn flip_vertical(&self) -> Self {
        let n = self.size;
        Grid::from_fn(n, |row, col| self.get(n - 1 - row, col))
    }
}

/// The two mark planes of a game in progress.
///
/// Invariant: a cell is marked in at most one plane. Planes are cleared at
/// episode start and gain exactly one mark per half-move.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    size: usize,
    x: Grid<bool>,
    o: Grid<bool>,
}

impl Board {
    /// Create an empty board with side length `size`.
    pub fn new(size: usize) -> Self {
        Board {
            size,
            x: Grid::new(size),
            o: Grid::new(size),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Reset both planes to empty.
    pub fn clear(&mut self) {
        self.x = Grid::new(self.size);
        self.o = Grid::new(self.size);
    }

    /// The mark plane of a player.
    pub fn marks(&self, player: Player) -> &Grid<bool> {
        match player {
            Player::X => &self.x,
            Player::O => &self.o,
        }
    }

    pub(crate) fn marks_mut(&mut self, player: Player) -> &mut Grid<bool> {
        match player {
            Player::X => &mut self.x,
            Player::O => &mut self.o,
        }
    }

    /// Whether the cell is empty in both planes.
    pub fn is_empty_cell(&self, action: Action) -> bool {
        !self.x.get(action.row, action.col) && !self.o.get(action.row, action.col)
    }

    /// Empty cells in row-major order.
    pub fn empty_cells(&self) -> Vec<Action> {
        let mut cells = Vec::new();
        for row in 0..self.size {
            for col in 0..self.size {
                let action = Action::new(row, col);
                if self.is_empty_cell(action) {
                    cells.push(action);
                }
            }
        }
        cells
    }

    pub fn is_full(&self) -> bool {
        (0..self.size)
            .all(|row| (0..self.size).all(|col| !self.is_empty_cell(Action::new(row, col))))
    }
}

/// The 2-channel observation fed to the value estimator.
///
/// Channel 0 holds the mover's marks, channel 1 the opponent's. The
/// mover-first ordering lets one estimator serve both players without
/// knowing their identity. Recomputed every half-move; not stored outside
/// pending transitions.
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    channels: [Grid<f32>; 2],
}

impl State {
    /// Observe the board from the mover's perspective.
    pub fn observe(board: &Board, mover: Player) -> Self {
        let to_f32 = |marks: &Grid<bool>| {
            Grid::from_fn(board.size(), |r, c| if marks.get(r, c) { 1.0 } else { 0.0 })
        };
        State {
            channels: [
                to_f32(board.marks(mover)),
                to_f32(board.marks(mover.opponent())),
            ],
        }
    }

    pub(crate) fn from_channels(mover: Grid<f32>, opponent: Grid<f32>) -> Self {
        State {
            channels: [mover, opponent],
        }
    }

    pub fn size(&self) -> usize {
        self.channels[0].size()
    }

    /// The mover's channel.
    pub fn mover(&self) -> &Grid<f32> {
        &self.channels[0]
    }

    /// The opponent's channel.
    pub fn opponent(&self) -> &Grid<f32> {
        &self.channels[1]
    }

    /// Compact byte encoding of both channels, usable as a lookup key.
    pub fn encode(&self) -> Vec<u8> {
        self.channels
            .iter()
            .flat_map(|channel| channel.cells().iter().map(|&v| u8::from(v > 0.5)))
            .collect()
    }
}
