use rand::Rng;

use super::line::{collapse, has_adjacent_equal};
use super::state::{Axis, Board, Direction, Score, Tile};

/// Result of sliding every line of a board in one direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftOutcome {
    pub board: Board,
    /// Sum of all merges performed by the shift.
    pub score_delta: Score,
    /// Largest tile produced by a merge, or 0 if nothing merged.
    pub max_merged: Tile,
    /// True if at least one line changed.
    pub changed: bool,
}

/// Slide/merge tiles in the given direction. No randomness.
///
/// Each row (Left/Right) or column (Up/Down) is read in natural order,
/// reversed for Right/Down, collapsed, reversed back and written in place.
pub fn shift(board: &Board, direction: Direction) -> ShiftOutcome {
    let axis = direction.axis();
    let reversed = direction.is_reversed();
    let mut next = board.clone();
    let mut score_delta = 0;
    let mut max_merged = 0;
    let mut changed = false;

    for idx in 0..board.size() {
        let mut line = board.line(axis, idx);
        if reversed {
            line.reverse();
        }
        let mut res = collapse(&line);
        changed |= res.changed(&line);
        score_delta += res.score_delta;
        max_merged = max_merged.max(res.max_merged);
        if reversed {
            res.line.reverse();
        }
        next.set_line(axis, idx, &res.line);
    }

    ShiftOutcome {
        board: next,
        score_delta,
        max_merged,
        changed,
    }
}

/// Count the number of zero tiles.
pub fn count_empty(board: &Board) -> usize {
    board.tiles().iter().filter(|&&t| t == 0).count()
}

/// True if no cell is empty.
pub fn is_full(board: &Board) -> bool {
    !board.tiles().contains(&0)
}

/// True if any row or column holds equal non-zero neighbours.
pub fn has_merge(board: &Board) -> bool {
    (0..board.size()).any(|idx| {
        has_adjacent_equal(&board.line(Axis::Row, idx))
            || has_adjacent_equal(&board.line(Axis::Col, idx))
    })
}

/// True if an empty cell exists or some line can merge.
pub fn can_move(board: &Board) -> bool {
    !is_full(board) || has_merge(board)
}

pub(crate) fn generate_random_tile<R: Rng + ?Sized>(rng: &mut R) -> Tile {
    if rng.gen_range(0..10) < 9 { 2 } else { 4 }
}

/// Insert a random 2 (90%) or 4 (10%) tile into a uniformly chosen empty cell.
///
/// The cell is drawn from the actual set of empty positions, so this never
/// loops on a crowded board; a full board yields `None`.
pub fn insert_random_tile<R: Rng + ?Sized>(
    board: &mut Board,
    rng: &mut R,
) -> Option<(usize, usize, Tile)> {
    let empty = count_empty(board);
    if empty == 0 {
        return None;
    }
    let nth = rng.gen_range(0..empty);
    let (pos, _) = board.tiles().iter().enumerate().filter(|(_, &t)| t == 0).nth(nth)?;
    let (row, col) = (pos / board.size(), pos % board.size());
    let tile = generate_random_tile(rng);
    board.set(row, col, tile);
    log::trace!("spawned {} at ({}, {})", tile, row, col);
    Some((row, col, tile))
}

/// Zero the board, then place two tiles at distinct random cells.
pub fn seed_starting_tiles<R: Rng + ?Sized>(board: &mut Board, rng: &mut R) {
    board.clear();
    for _ in 0..2 {
        // a cleared board has at least four cells, so both placements succeed
        let placed = insert_random_tile(board, rng);
        debug_assert!(placed.is_some());
    }
}
