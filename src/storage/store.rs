//! Store-backed sessions.
//!
//! A `Session` keeps no game state of its own. Every operation reads the
//! full snapshot from its `StateStore`, rebuilds the engine, applies the
//! operation, and writes the full snapshot back. Callers with more than one
//! input source must serialize access themselves.

use std::collections::HashMap;

use crate::board::CellId;
use crate::config::{ConfigError, GameConfig};
use crate::engine::{Engine, GameView, MoveError};
use crate::record::Stats;

use super::snapshot::{encode_snapshot, SnapshotError};

/// A key-value medium holding serialized snapshots.
pub trait StateStore {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&mut self, key: &str, value: String);
}

/// An in-process store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }
}

/// Errors from a session operation.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Move(#[from] MoveError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

/// One pair of players playing against a store.
pub struct Session<S: StateStore> {
    config: GameConfig,
    store: S,
    fresh: Engine,
}

impl<S: StateStore> Session<S> {
    /// Opens a session after validating `config`.
    pub fn new(config: GameConfig, store: S) -> Result<Self, ConfigError> {
        let fresh = Engine::from_config(&config)?;
        Ok(Session {
            config,
            store,
            fresh,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Rebuilds the engine from the store, falling back to a fresh one.
    pub fn engine(&self) -> Engine {
        self.load().0
    }

    /// The problem with the stored state, if it had to be discarded.
    pub fn load_error(&self) -> Option<SnapshotError> {
        self.load().1
    }

    fn load(&self) -> (Engine, Option<SnapshotError>) {
        let raw = self.store.read(&self.config.storage_key);
        self.fresh.clone().load_or_default(raw.as_deref())
    }

    fn save(&mut self, engine: &Engine) -> Result<(), SnapshotError> {
        let encoded = encode_snapshot(&engine.snapshot())?;
        self.store.write(&self.config.storage_key, encoded);
        Ok(())
    }

    fn update<T>(
        &mut self,
        op: impl FnOnce(&mut Engine) -> Result<T, MoveError>,
    ) -> Result<T, SessionError> {
        let mut engine = self.engine();
        let result = op(&mut engine)?;
        self.save(&engine)?;
        Ok(result)
    }

    pub fn game(&self) -> GameView {
        self.engine().view()
    }

    pub fn stats(&self) -> Stats {
        self.engine().compute_stats()
    }

    pub fn player_move(&mut self, column: u8) -> Result<CellId, SessionError> {
        self.update(|engine| engine.attempt_move(column))
    }

    pub fn player_move_at(&mut self, cell: u8) -> Result<CellId, SessionError> {
        self.update(|engine| engine.attempt_move_at(cell))
    }

    /// Clears the board, archiving a finished game. Returns whether one was archived.
    pub fn reset(&mut self) -> Result<bool, SessionError> {
        self.update(|engine| Ok(engine.reset_game()))
    }

    /// Starts a new round. Returns how many games were moved to the history.
    pub fn new_round(&mut self) -> Result<usize, SessionError> {
        self.update(|engine| Ok(engine.start_new_round()))
    }
}
