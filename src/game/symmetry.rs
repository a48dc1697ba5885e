//! Symmetry expansion of training samples
//!
//! One (state, action) pair carries the same learning signal as any of its
//! rotations and flips. Expanding a sample into its geometrically distinct
//! variants multiplies the training data per half-move at no simulation cost.

use serde::{Deserialize, Serialize};

use super::board::{Grid, State};

/// A square-symmetry transform applied to training samples.
///
/// The candidate set is the reduced one used for expansion: identity, three
/// rotations, and the two axis flips. Diagonal reflections are reachable as
/// rotation+flip compositions and are deliberately not enumerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Transform {
    Identity,
    Rotate90,
    Rotate180,
    Rotate270,
    FlipHorizontal,
    FlipVertical,
}

impl Transform {
    /// Non-identity candidates, in expansion order.
    pub const CANDIDATES: [Transform; 5] = [
        Transform::Rotate90,
        Transform::Rotate180,
        Transform::Rotate270,
        Transform::FlipHorizontal,
        Transform::FlipVertical,
    ];

    /// Apply the transform to a grid.
    pub fn apply<T: Copy + Default>(self, grid: &Grid<T>) -> Grid<T> {
        match self {
            Transform::Identity => grid.clone(),
            Transform::Rotate90 => grid.rotate90(),
            Transform::Rotate180 => grid.rotate90().rotate90(),
            Transform::Rotate270 => grid.rotate90().rotate90().rotate90(),
            Transform::FlipHorizontal => grid.flip_horizontal(),
            Transform::FlipVertical => grid.flip_vertical(),
        }
    }

    /// Apply the transform to both channels of a state.
    pub fn apply_state(self, state: &State) -> State {
        State::from_channels(self.apply(state.mover()), self.apply(state.opponent()))
    }

    /// The transform undoing this one.
    pub fn inverse(self) -> Transform {
        match self {
            Transform::Rotate90 => Transform::Rotate270,
            Transform::Rotate270 => Transform::Rotate90,
            other => other,
        }
    }
}

/// Tolerance for the approximate composite comparison.
///
/// Comparison is numeric rather than exact so the dedup stays robust to the
/// floating-point state representation.
pub const DEDUP_TOLERANCE: f32 = 1e-6;

/// Index-aligned expansion of one training sample.
#[derive(Debug, Clone)]
pub struct Expansion {
    /// Accepted transforms, identity first
    pub transforms: Vec<Transform>,
    /// Transformed states, aligned with `transforms`
    pub states: Vec<State>,
    /// Transformed one-hot action grids, aligned with `transforms`
    pub actions: Vec<Grid<f32>>,
}

impl Expansion {
    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }
}

/// Expand a (state, action) sample into its geometrically distinct variants.
///
/// Each candidate transform is applied to a signed occupancy composite
/// (mover channel minus opponent channel, minus the action cell — the sign
/// keeps the candidate cell distinguishable from existing marks) and skipped
/// when the result numerically matches an already accepted composite. The
/// output always contains the identity variant, so its length lies in
/// `1..=6`; symmetric boards produce fewer variants than asymmetric ones.
///
/// Inputs are not mutated.
pub fn expand(state: &State, action: &Grid<f32>) -> Expansion {
    let base = composite(state, action);

    let mut expansion = Expansion {
        transforms: vec![Transform::Identity],
        states: vec![state.clone()],
        actions: vec![action.clone()],
    };
    let mut accepted = vec![base.clone()];

    for transform in Transform::CANDIDATES {
        let candidate = transform.apply(&base);
        if accepted
            .iter()
            .any(|seen| mean_squared_difference(seen, &candidate) < DEDUP_TOLERANCE)
        {
            continue;
        }
        expansion.transforms.push(transform);
        expansion.states.push(transform.apply_state(state));
        expansion.actions.push(transform.apply(action));
        accepted.push(candidate);
    }

    expansion
}

/// Signed occupancy composite: mover − opponent − action.
fn composite(state: &State, action: &Grid<f32>) -> Grid<f32> {
    Grid::from_fn(state.size(), |r, c| {
        state.mover().get(r, c) - state.opponent().get(r, c) - action.get(r, c)
    })
}

/// Mean squared difference between two equally sized grids.
pub fn mean_squared_difference(a: &Grid<f32>, b: &Grid<f32>) -> f32 {
    let n = a.cells().len();
    let sum: f32 = a
        .cells()
        .iter()
        .zip(b.cells())
        .map(|(&x, &y)| (x - y) * (x - y))
        .sum();
    sum / n as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::board::{Action, Board, Player, State};

    fn state_with(x: &[(usize, usize)], o: &[(usize, usize)], size: usize) -> State {
        let mut board = Board::new(size);
        for &(r, c) in x {
            board.marks_mut(Player::X).set(r, c, true);
        }
        for &(r, c) in o {
            board.marks_mut(Player::O).set(r, c, true);
        }
        State::observe(&board, Player::X)
    }

    #[test]
    fn center_action_on_empty_board_is_fully_symmetric() {
        let state = state_with(&[], &[], 3);
        let action = Action::new(1, 1).one_hot(3);
        let expansion = expand(&state, &action);
        assert_eq!(expansion.len(), 1);
        assert_eq!(expansion.transforms, vec![Transform::Identity]);
    }

    #[test]
    fn corner_action_on_empty_board_keeps_rotations_only() {
        // The flips of a lone corner coincide with rotations of it, so only
        // identity plus the three rotations survive dedup.
        let state = state_with(&[], &[], 3);
        let action = Action::new(0, 0).one_hot(3);
        let expansion = expand(&state, &action);
        assert_eq!(expansion.len(), 4);
        assert_eq!(
            expansion.transforms,
            vec![
                Transform::Identity,
                Transform::Rotate90,
                Transform::Rotate180,
                Transform::Rotate270,
            ]
        );
    }

    #[test]
    fn variant_count_stays_within_candidate_bound() {
        let state = state_with(&[(0, 0)], &[(0, 1)], 3);
        let action = Action::new(2, 2).one_hot(3);
        let expansion = expand(&state, &action);
        assert!(!expansion.is_empty());
        assert!(expansion.len() <= 1 + Transform::CANDIDATES.len());
        assert_eq!(expansion.states.len(), expansion.len());
        assert_eq!(expansion.actions.len(), expansion.len());
    }

    #[test]
    fn asymmetric_sample_yields_multiple_variants() {
        let state = state_with(&[(0, 0)], &[(1, 2)], 3);
        let action = Action::new(2, 1).one_hot(3);
        let expansion = expand(&state, &action);
        assert!(expansion.len() > 1);
    }

    #[test]
    fn inverse_transforms_reconstruct_the_original() {
        let state = state_with(&[(0, 0), (1, 1)], &[(0, 1)], 3);
        let action = Action::new(2, 0).one_hot(3);
        let expansion = expand(&state, &action);

        for (i, transform) in expansion.transforms.iter().enumerate() {
            let inverse = transform.inverse();
            assert_eq!(inverse.apply_state(&expansion.states[i]), state);
            assert_eq!(inverse.apply(&expansion.actions[i]), action);
        }
    }

    #[test]
    fn expand_does_not_mutate_inputs() {
        let state = state_with(&[(0, 0)], &[], 3);
        let action = Action::new(1, 0).one_hot(3);
        let state_before = state.clone();
        let action_before = action.clone();
        let _ = expand(&state, &action);
        assert_eq!(state, state_before);
        assert_eq!(action, action_before);
    }

    #[test]
    fn rotation_inverses_cancel() {
        let grid = Grid::from_fn(3, |r, c| (r * 3 + c) as f32);
        for transform in Transform::CANDIDATES {
            assert_eq!(transform.inverse().apply(&transform.apply(&grid)), grid);
        }
    }

    #[test]
    fn mover_and_opponent_marks_are_distinguished() {
        // Swapping the two players' marks must change the composite, so the
        // samples are not treated as symmetric duplicates of each other.
        let a = state_with(&[(0, 0)], &[(2, 2)], 3);
        let b = state_with(&[(2, 2)], &[(0, 0)], 3);
        let action = Action::new(0, 2).one_hot(3);
        let diff = mean_squared_difference(
            &super::composite(&a, &action),
            &super::composite(&b, &action),
        );
        assert!(diff > DEDUP_TOLERANCE);
    }
}
