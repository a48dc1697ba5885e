//! Tabular value estimator
//!
//! Stores one value grid per observed state, keyed by the state's byte
//! encoding, and moves stored values toward targets by a fixed learning
//! rate. Tic-tac-toe's state space is small enough that a table stands in
//! for a function approximator without any generalization machinery.

use std::collections::HashMap;

use crate::{
    Error, Result,
    game::{Grid, State},
    ports::{ValueEstimator, ensure_batch_aligned},
};

/// Lookup-table Q-function with incremental updates.
pub struct TableEstimator {
    values: HashMap<Vec<u8>, Grid<f32>>,
    board_size: usize,
    learning_rate: f32,
    initial_value: f32,
}

impl TableEstimator {
    /// Create an empty table.
    ///
    /// Unseen states evaluate to `initial_value` everywhere. `learning_rate`
    /// scales each update step toward the target.
    pub fn new(board_size: usize, learning_rate: f32, initial_value: f32) -> Self {
        Self {
            values: HashMap::new(),
            board_size,
            learning_rate,
            initial_value,
        }
    }

    /// Number of distinct states with stored values.
    pub fn states_seen(&self) -> usize {
        self.values.len()
    }

    fn entry(&mut self, state: &State) -> &mut Grid<f32> {
        let size = self.board_size;
        let initial = self.initial_value;
        self.values
            .entry(state.encode())
            .or_insert_with(|| Grid::filled(size, initial))
    }

    /// The cell a one-hot action grid marks.
    fn action_cell(action: &Grid<f32>) -> Result<(usize, usize)> {
        for row in 0..action.size() {
            for col in 0..action.size() {
                if action.get(row, col) > 0.5 {
                    return Ok((row, col));
                }
            }
        }
        Err(Error::ActionNotMarked)
    }
}

impl ValueEstimator for TableEstimator {
    fn evaluate(&mut self, state: &State) -> Result<Grid<f32>> {
        if state.size() != self.board_size {
            return Err(Error::ShapeMismatch {
                expected: self.board_size,
                got: state.size(),
            });
        }
        Ok(self.entry(state).clone())
    }

    fn update(&mut self, states: &[State], actions: &[Grid<f32>], targets: &[f32]) -> Result<()> {
        ensure_batch_aligned(states, actions, targets)?;
        let rate = self.learning_rate;
        for ((state, action), &target) in states.iter().zip(actions).zip(targets) {
            let (row, col) = Self::action_cell(action)?;
            let grid = self.entry(state);
            let current = grid.get(row, col);
            grid.set(row, col, current + rate * (target - current));
        }
        Ok(())
    }

    fn loss(&mut self, states: &[State], actions: &[Grid<f32>], targets: &[f32]) -> Result<f32> {
        ensure_batch_aligned(states, actions, targets)?;
        if states.is_empty() {
            return Ok(0.0);
        }
        let mut sum = 0.0f32;
        for ((state, action), &target) in states.iter().zip(actions).zip(targets) {
            let (row, col) = Self::action_cell(action)?;
            let diff = self.entry(state).get(row, col) - target;
            sum += diff * diff;
        }
        Ok(sum / states.len() as f32)
    }
}
