//! Persisted state encoding and decoding.
//!
//! A snapshot is the whole persisted state of a session: the active game's
//! moves and the round history. It is encoded as a single JSON object:
//!
//! `{"currentGameMoves":[{"cell":36,"playerId":1}],"history":{"currentRoundGames":[],"allGames":[]}}`
//!
//! Missing top-level keys decode to their empty defaults.

use serde::{Deserialize, Serialize};

use crate::engine::ReplayError;
use crate::record::{Move, RoundHistory};

/// Errors that can occur when decoding or validating persisted state.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("malformed state JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("current game is not legal: {0}")]
    CurrentGame(#[source] ReplayError),

    #[error("{list}[{index}] is not a legal game: {source}")]
    Record {
        list: &'static str,
        index: usize,
        source: ReplayError,
    },

    #[error("{list}[{index}] status does not match its moves")]
    RecordStatus { list: &'static str, index: usize },
}

/// The persisted state of a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Snapshot {
    pub current_game_moves: Vec<Move>,
    pub history: RoundHistory,
}

/// Encodes a snapshot as compact JSON.
pub fn encode_snapshot(snapshot: &Snapshot) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string(snapshot)?)
}

/// Decodes a snapshot. Only the shape is checked here; legality of the
/// recorded games is checked when an engine is restored from it.
pub fn parse_snapshot(s: &str) -> Result<Snapshot, SnapshotError> {
    Ok(serde_json::from_str(s)?)
}
