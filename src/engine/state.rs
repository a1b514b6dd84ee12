use rand::Rng;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ops;
use crate::error::{EngineError, Result};

pub type Tile = u32;
pub type Score = u64;

/// Largest representable tile. Two of these never merge.
pub const MAX_TILE: Tile = 1 << (Tile::BITS - 1);

/// Side length used when none is given.
pub const DEFAULT_SIZE: usize = 4;

/// A direction to move/merge tiles.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Map a `w`/`a`/`s`/`d` keypress (either case) to a direction.
    pub fn from_key(key: char) -> Option<Direction> {
        match key.to_ascii_lowercase() {
            'w' => Some(Direction::Up),
            'a' => Some(Direction::Left),
            's' => Some(Direction::Down),
            'd' => Some(Direction::Right),
            _ => None,
        }
    }

    /// Which lines a move in this direction slides along.
    #[inline]
    pub fn axis(self) -> Axis {
        match self {
            Direction::Left | Direction::Right => Axis::Row,
            Direction::Up | Direction::Down => Axis::Col,
        }
    }

    /// True if lines are read back-to-front before collapsing.
    #[inline]
    pub fn is_reversed(self) -> bool {
        matches!(self, Direction::Right | Direction::Down)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.write_str(name)
    }
}

impl FromStr for Direction {
    type Err = EngineError;

    /// Accepts a single `wasd` key or a direction name, case-insensitive.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Direction::from_key(c)
                .ok_or_else(|| EngineError::InvalidDirection(s.to_string()));
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Err(EngineError::InvalidDirection(s.to_string())),
        }
    }
}

/// Orientation of a line on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Row,
    Col,
}

/// Square grid of tiles stored row-major; 0 marks an empty cell.
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Board {
    size: usize,
    cells: Vec<Tile>,
}

impl Board {
    /// Zero-filled `size` x `size` board.
    pub fn new(size: usize) -> Result<Self> {
        Board::from_dims(size, size)
    }

    /// Zero-filled board from explicit dimensions, which must be square.
    pub fn from_dims(rows: usize, cols: usize) -> Result<Self> {
        if rows != cols || rows < 2 {
            return Err(EngineError::InvalidDimension { rows, cols });
        }
        Ok(Board {
            size: rows,
            cells: vec![0; rows * cols],
        })
    }

    /// Build a board from explicit rows, validating shape and tile values.
    ///
    /// ```
    /// use grid_2048::engine::{Board, Direction};
    /// let b = Board::from_rows(vec![vec![2, 2], vec![0, 4]]).unwrap();
    /// let out = b.shift(Direction::Left);
    /// assert_eq!(out.board.rows(), vec![vec![4, 0], vec![4, 0]]);
    /// ```
    pub fn from_rows(rows: Vec<Vec<Tile>>) -> Result<Self> {
        let size = rows.len();
        if let Some(bad) = rows.iter().find(|r| r.len() != size) {
            return Err(EngineError::InvalidDimension { rows: size, cols: bad.len() });
        }
        let mut board = Board::new(size)?;
        for (r, row) in rows.into_iter().enumerate() {
            for (c, value) in row.into_iter().enumerate() {
                if value != 0 && (value < 2 || !value.is_power_of_two()) {
                    return Err(EngineError::InvalidTile { row: r, col: c, value });
                }
                board.cells[r * size + c] = value;
            }
        }
        Ok(board)
    }

    /// Side length of the board.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Tile at (`row`, `col`), or `None` when out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<Tile> {
        if row < self.size && col < self.size {
            Some(self.cells[row * self.size + col])
        } else {
            None
        }
    }

    #[inline]
    pub(crate) fn set(&mut self, row: usize, col: usize, tile: Tile) {
        self.cells[row * self.size + col] = tile;
    }

    /// Copy of the grid as nested rows.
    pub fn rows(&self) -> Vec<Vec<Tile>> {
        self.cells.chunks(self.size).map(<[Tile]>::to_vec).collect()
    }

    /// Row-major tiles.
    #[inline]
    pub fn tiles(&self) -> &[Tile] {
        &self.cells
    }

    /// Convenience: collect tiles into a row-major `Vec`.
    #[inline]
    pub fn to_vec(&self) -> Vec<Tile> {
        self.cells.clone()
    }

    /// Copy out row or column `idx` in natural order (left-to-right, top-to-bottom).
    pub fn line(&self, axis: Axis, idx: usize) -> Vec<Tile> {
        match axis {
            Axis::Row => self.cells[idx * self.size..(idx + 1) * self.size].to_vec(),
            Axis::Col => (0..self.size).map(|r| self.cells[r * self.size + idx]).collect(),
        }
    }

    /// Overwrite row or column `idx` with `tiles` in natural order.
    pub fn set_line(&mut self, axis: Axis, idx: usize, tiles: &[Tile]) {
        debug_assert_eq!(tiles.len(), self.size);
        match axis {
            Axis::Row => self.cells[idx * self.size..(idx + 1) * self.size].copy_from_slice(tiles),
            Axis::Col => {
                for (r, &t) in tiles.iter().enumerate() {
                    self.cells[r * self.size + idx] = t;
                }
            }
        }
    }

    /// Zero every cell.
    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|t| *t = 0);
    }

    /// Return the result of sliding/merging tiles in `dir` (no random insert).
    #[inline]
    pub fn shift(&self, dir: Direction) -> ops::ShiftOutcome {
        ops::shift(self, dir)
    }

    /// Insert a random 2 (90%) or 4 (10%) tile into a uniformly chosen empty cell.
    ///
    /// Returns the placement, or `None` if the board is full.
    ///
    /// ```
    /// use grid_2048::engine::Board;
    /// use rand::{SeedableRng, rngs::StdRng};
    /// let mut rng = StdRng::seed_from_u64(123);
    /// let mut b = Board::new(4).unwrap();
    /// b.insert_random_tile(&mut rng);
    /// b.insert_random_tile(&mut rng);
    /// assert_eq!(b.count_empty(), 14);
    /// ```
    #[inline]
    pub fn insert_random_tile<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Option<(usize, usize, Tile)> {
        ops::insert_random_tile(self, rng)
    }

    /// Clear the board and place the two starting tiles at distinct cells.
    #[inline]
    pub fn seed_starting_tiles<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        ops::seed_starting_tiles(self, rng)
    }

    /// True if no cell is empty.
    #[inline]
    pub fn is_full(&self) -> bool {
        ops::is_full(self)
    }

    /// Count the number of empty cells on the board.
    #[inline]
    pub fn count_empty(&self) -> usize {
        ops::count_empty(self)
    }

    /// Return the highest tile value present on the board (0 if empty).
    #[inline]
    pub fn highest_tile(&self) -> Tile {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    /// True if any cell holds exactly `tile`.
    #[inline]
    pub fn contains(&self, tile: Tile) -> bool {
        self.cells.contains(&tile)
    }

    /// True if some row or column has equal non-zero neighbours.
    #[inline]
    pub fn has_merge(&self) -> bool {
        ops::has_merge(self)
    }

    /// True if at least one direction would change the board.
    #[inline]
    pub fn can_move(&self) -> bool {
        ops::can_move(self)
    }
}

impl Default for Board {
    /// Empty `DEFAULT_SIZE` x `DEFAULT_SIZE` board.
    fn default() -> Self {
        Board {
            size: DEFAULT_SIZE,
            cells: vec![0; DEFAULT_SIZE * DEFAULT_SIZE],
        }
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board").field("size", &self.size).field("rows", &self.rows()).finish()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.highest_tile().max(2).to_string().len();
        for row in self.cells.chunks(self.size) {
            let cells: Vec<String> = row
                .iter()
                .map(|&t| match t {
                    0 => format!("{:>width$}", "."),
                    t => format!("{:>width$}", t),
                })
                .collect();
            writeln!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_rejects_bad_dimensions() {
        assert_eq!(Board::new(0), Err(EngineError::InvalidDimension { rows: 0, cols: 0 }));
        assert_eq!(Board::new(1), Err(EngineError::InvalidDimension { rows: 1, cols: 1 }));
        assert_eq!(Board::from_dims(3, 4), Err(EngineError::InvalidDimension { rows: 3, cols: 4 }));
        assert!(Board::from_rows(vec![vec![0, 0], vec![0]]).is_err());
        assert_eq!(Board::new(5).unwrap().count_empty(), 25);
    }

    #[test]
    fn it_rejects_bad_tiles() {
        let err = Board::from_rows(vec![vec![2, 3], vec![0, 0]]).unwrap_err();
        assert_eq!(err, EngineError::InvalidTile { row: 0, col: 1, value: 3 });
        assert!(Board::from_rows(vec![vec![1, 0], vec![0, 0]]).is_err());
    }

    #[test]
    fn it_shifts_top_tiles_without_overflow() {
        let b = Board::from_rows(vec![vec![MAX_TILE, MAX_TILE], vec![0, 0]]).unwrap();
        for dir in Direction::ALL {
            let out = b.shift(dir);
            assert_eq!(out.score_delta, 0);
            assert_eq!(out.board.highest_tile(), MAX_TILE);
        }
        assert!(!b.shift(Direction::Left).changed);
        assert!(b.shift(Direction::Down).changed);

        let full = Board::from_rows(vec![vec![MAX_TILE, MAX_TILE], vec![2, 4]]).unwrap();
        assert!(!full.can_move());
    }

    #[test]
    fn it_reads_and_writes_lines() {
        let mut b =
            Board::from_rows(vec![vec![2, 4, 8], vec![16, 32, 64], vec![0, 0, 128]]).unwrap();
        assert_eq!(b.line(Axis::Row, 1), vec![16, 32, 64]);
        assert_eq!(b.line(Axis::Col, 2), vec![8, 64, 128]);
        b.set_line(Axis::Col, 0, &[0, 2, 4]);
        assert_eq!(b.rows(), vec![vec![0, 4, 8], vec![2, 32, 64], vec![4, 0, 128]]);
        b.set_line(Axis::Row, 2, &[2, 2, 2]);
        assert_eq!(b.line(Axis::Row, 2), vec![2, 2, 2]);
        assert_eq!(b.get(2, 2), Some(2));
        assert_eq!(b.get(3, 0), None);
    }

    #[test]
    fn it_parses_directions() {
        assert_eq!("w".parse::<Direction>(), Ok(Direction::Up));
        assert_eq!("A".parse::<Direction>(), Ok(Direction::Left));
        assert_eq!("down".parse::<Direction>(), Ok(Direction::Down));
        assert_eq!(" Right ".parse::<Direction>(), Ok(Direction::Right));
        assert_eq!("x".parse::<Direction>(), Err(EngineError::InvalidDirection("x".to_string())));
        assert!("sideways".parse::<Direction>().is_err());
        assert_eq!(Direction::from_key('q'), None);
        for dir in Direction::ALL {
            assert_eq!(dir.to_string().parse::<Direction>(), Ok(dir));
        }
    }

    #[test]
    fn it_displays_grid() {
        let b = Board::from_rows(vec![vec![2, 0], vec![0, 128]]).unwrap();
        assert_eq!(b.to_string(), "  2   .\n  . 128\n");
    }
}
