//! Session configuration.
//!
//! Names the two players and the key under which a session's state is
//! stored. Loaded from JSON by embedders, or taken from `Default`.

use serde::Deserialize;

use crate::board::{Player, PlayerId, ALL_PLAYER_IDS};

/// Default storage key for a session's snapshot.
pub const DEFAULT_STORAGE_KEY: &str = "fourline.state";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

/// Players and storage key for one session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameConfig {
    pub storage_key: String,
    /// Player one first, player two second.
    pub players: [Player; 2],
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            players: [
                Player::new(PlayerId::One, "Player 1", "magenta"),
                Player::new(PlayerId::Two, "Player 2", "purple"),
            ],
        }
    }
}

impl GameConfig {
    /// Parses and validates a JSON config. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::Validation("storageKey must not be empty".into()));
        }
        check_player_ids(&self.players)?;
        for (slot, player) in self.players.iter().enumerate() {
            if player.display_name.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "players[{slot}] needs a display name"
                )));
            }
        }
        Ok(())
    }
}

/// Checks that slot `i` holds the player with id `i + 1`, which is the
/// order turn parity assumes.
pub fn check_player_ids(players: &[Player; 2]) -> Result<(), ConfigError> {
    for (slot, (player, expected)) in players.iter().zip(ALL_PLAYER_IDS).enumerate() {
        if player.id != expected {
            return Err(ConfigError::Validation(format!(
                "players[{slot}] must have id {expected}, got {}",
                player.id
            )));
        }
    }
    Ok(())
}
