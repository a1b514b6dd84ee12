//! grid-2048: a sliding-tile merge (2048) engine for square boards of any size.
//!
//! This crate provides:
//! - A `Board` type with a pure `shift` and query methods (`is_full`, `can_move`, ...)
//! - The `collapse` line transform that every directional move is built on
//! - A `Game` aggregate that spawns tiles, counts score/moves, and detects win/loss
//! - A small TOML-backed `config` for the self-play driver binary
//!
//! Quick start:
//! ```
//! use grid_2048::engine::{Direction, Game};
//!
//! // Deterministic game with a seeded RNG
//! let mut game = Game::seeded(4, 42).unwrap();
//! game.apply_move(Direction::Left);
//! assert!(game.score() >= 0);
//! ```
//!
//! Full loop (simplest possible)
//! ```
//! use grid_2048::engine::{Direction, Game};
//!
//! let mut game = Game::seeded(4, 123).unwrap();
//! let mut turns = 0;
//! while game.is_playable() && turns < 8 {
//!     game.apply_move(Direction::ALL[turns % 4]);
//!     turns += 1;
//! }
//! assert!(game.moves() <= turns as u64);
//! ```
//!
pub mod config;
pub mod engine;
pub mod error;

pub use error::EngineError;
