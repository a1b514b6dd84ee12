//! Engine module: N x N board, the line collapse transform, directional
//! shifts built on it, and the `Game` aggregate that spawns tiles and tracks
//! score/moves/max tile.
//!
//! - `Board` is the square grid with query methods and a row/column line accessor.
//! - Free functions mirror the methods when convenient (e.g., `shift`).
//! - `collapse` is pure; score bookkeeping flows back through its result.

mod game;
mod line;
mod ops;
pub mod state;

pub use state::{Axis, Board, Direction, Score, Tile, DEFAULT_SIZE, MAX_TILE};

pub use game::{Game, GameStatus, GameSummary, INITIAL_MAX_TILE, WINNING_TILE};
pub use line::{collapse, has_adjacent_equal, Collapse};
pub use ops::{
    can_move, count_empty, has_merge, insert_random_tile, is_full, seed_starting_tiles, shift,
    ShiftOutcome,
};
