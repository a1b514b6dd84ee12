use crate::engine::Tile;

/// Errors surfaced by the engine's public constructors and parsers.
///
/// Moves themselves never fail: an unrecognized direction reaching the
/// dispatcher is treated as a no-op rather than an error.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("invalid board dimensions {rows}x{cols}: board must be square with side >= 2")]
    InvalidDimension { rows: usize, cols: usize },
    #[error("unrecognized direction: {0:?}")]
    InvalidDirection(String),
    #[error("invalid tile {value} at ({row}, {col}): must be 0 or a power of two >= 2")]
    InvalidTile { row: usize, col: usize, value: Tile },
}

pub type Result<T> = std::result::Result<T, EngineError>;
