//! Fourline four-in-a-row engine library.
//!
//! Exposes the board topology, the game engine, round records, persisted
//! state handling, and random self-play. Rendering and input are left to
//! the embedding application.

pub mod board;
pub mod config;
pub mod engine;
pub mod record;
pub mod selfplay;
pub mod storage;

pub use config::{ConfigError, GameConfig};
pub use engine::{Engine, GameView, MoveError, Outcome};
pub use record::{GameRecord, GameStatus, Move, RoundHistory, Stats};
