//! Game domain: board representation, move application, symmetry transforms

pub mod board;
pub mod engine;
pub mod symmetry;

pub use board::{Action, Board, Grid, Player, State};
pub use engine::{
    MoveOutcome, REWARD_ACTION, REWARD_DRAW, REWARD_WIN, apply_action, is_draw, winning_line,
};
pub use symmetry::{Expansion, Transform, expand};
