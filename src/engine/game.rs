use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::state::{Board, Direction, Score, Tile, DEFAULT_SIZE};
use crate::error::Result;

/// The tile that wins the game.
pub const WINNING_TILE: Tile = 2048;

/// Starting value of the max-tile counter.
pub const INITIAL_MAX_TILE: Tile = 2;

/// Coarse game outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
}

/// Snapshot of a game's counters and outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub size: usize,
    pub score: Score,
    pub moves: u64,
    pub max_tile: Tile,
    pub status: GameStatus,
}

/// A running game: board, counters, and the RNG used for spawning.
///
/// The RNG is injected so spawning and starting tiles can be made
/// deterministic; `Game::new` falls back to an entropy-seeded `StdRng`.
///
/// ```
/// use grid_2048::engine::{Direction, Game};
/// let mut game = Game::seeded(4, 42).unwrap();
/// assert_eq!(game.board().count_empty(), 14);
/// let before = game.moves();
/// if game.apply_move(Direction::Left) {
///     assert_eq!(game.moves(), before + 1);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Game<R: Rng = StdRng> {
    board: Board,
    score: Score,
    moves: u64,
    max_tile: Tile,
    rng: R,
}

impl Game<StdRng> {
    /// New `size` x `size` game with an entropy-seeded RNG.
    pub fn new(size: usize) -> Result<Self> {
        Game::with_rng(size, StdRng::from_entropy())
    }

    /// New game whose spawns are fully determined by `seed`.
    pub fn seeded(size: usize, seed: u64) -> Result<Self> {
        Game::with_rng(size, StdRng::seed_from_u64(seed))
    }

    /// Classic 4x4 game with an entropy-seeded RNG.
    pub fn default_size() -> Self {
        let mut rng = StdRng::from_entropy();
        let mut board = Board::default();
        board.seed_starting_tiles(&mut rng);
        Game::from_board(board, rng)
    }
}

impl Default for Game<StdRng> {
    fn default() -> Self {
        Game::default_size()
    }
}

impl<R: Rng> Game<R> {
    /// New game driven by the given RNG, seeded with two starting tiles.
    pub fn with_rng(size: usize, mut rng: R) -> Result<Self> {
        let mut board = Board::new(size)?;
        board.seed_starting_tiles(&mut rng);
        let max_tile = INITIAL_MAX_TILE.max(board.highest_tile());
        Ok(Game {
            board,
            score: 0,
            moves: 0,
            max_tile,
            rng,
        })
    }

    /// Resume play from an existing board with fresh counters.
    pub fn from_board(board: Board, rng: R) -> Self {
        let max_tile = INITIAL_MAX_TILE.max(board.highest_tile());
        Game {
            board,
            score: 0,
            moves: 0,
            max_tile,
            rng,
        }
    }

    /// Borrow the current board.
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Owned copy of the current board.
    #[inline]
    pub fn snapshot(&self) -> Board {
        self.board.clone()
    }

    /// Sum of every merge so far.
    #[inline]
    pub fn score(&self) -> Score {
        self.score
    }

    /// Number of moves that changed the board.
    #[inline]
    pub fn moves(&self) -> u64 {
        self.moves
    }

    /// Highest tile ever present on the board.
    #[inline]
    pub fn max_tile(&self) -> Tile {
        self.max_tile
    }

    /// Slide the board in `direction`; on change, spawn one tile and count the move.
    ///
    /// Returns whether the board changed.
    pub fn apply_move(&mut self, direction: Direction) -> bool {
        let outcome = self.board.shift(direction);
        if !outcome.changed {
            log::debug!("move {} left the board unchanged", direction);
            return false;
        }
        self.board = outcome.board;
        self.score += outcome.score_delta;
        self.max_tile = self.max_tile.max(outcome.max_merged);
        // a changed shift either had an empty cell already or freed one by merging
        if let Some((_, _, tile)) = self.board.insert_random_tile(&mut self.rng) {
            self.max_tile = self.max_tile.max(tile);
        }
        self.moves += 1;
        true
    }

    /// Dispatch a `wasd` keypress. Unrecognized keys are a no-op.
    ///
    /// Returns the direction applied, whether or not it changed the board.
    pub fn apply_key(&mut self, key: char) -> Option<Direction> {
        let Some(direction) = Direction::from_key(key) else {
            log::debug!("ignoring unrecognized key {:?}", key);
            return None;
        };
        self.apply_move(direction);
        Some(direction)
    }

    /// Dispatch a key or direction name. Unparseable input is a no-op.
    pub fn apply_str(&mut self, input: &str) -> Option<Direction> {
        match input.parse::<Direction>() {
            Ok(direction) => {
                self.apply_move(direction);
                Some(direction)
            }
            Err(e) => {
                log::debug!("{}", e);
                None
            }
        }
    }

    /// Directions that would change the board right now.
    pub fn legal_moves(&self) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|&dir| self.board.shift(dir).changed)
            .collect()
    }

    /// True if the board has an empty cell or a possible merge.
    #[inline]
    pub fn can_move(&self) -> bool {
        self.board.can_move()
    }

    /// True once any cell holds the winning tile.
    #[inline]
    pub fn is_won(&self) -> bool {
        self.board.contains(WINNING_TILE)
    }

    /// True if no move is possible and the game was not won.
    #[inline]
    pub fn is_lost(&self) -> bool {
        !self.can_move() && !self.is_won()
    }

    /// True while a move is possible and the game is not yet won.
    #[inline]
    pub fn is_playable(&self) -> bool {
        self.can_move() && !self.is_won()
    }

    pub fn status(&self) -> GameStatus {
        if self.is_won() {
            GameStatus::Won
        } else if self.can_move() {
            GameStatus::Playing
        } else {
            GameStatus::Lost
        }
    }

    pub fn summary(&self) -> GameSummary {
        GameSummary {
            size: self.board.size(),
            score: self.score,
            moves: self.moves,
            max_tile: self.max_tile,
            status: self.status(),
        }
    }

    /// Start over on the same board size, keeping the RNG stream.
    pub fn reset(&mut self) {
        self.board.seed_starting_tiles(&mut self.rng);
        self.score = 0;
        self.moves = 0;
        self.max_tile = INITIAL_MAX_TILE.max(self.board.highest_tile());
        log::debug!("reset {}x{} game", self.board.size(), self.board.size());
    }
}
