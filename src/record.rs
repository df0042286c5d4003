//! Moves, game results, and round history.
//!
//! These are the values that flow out of the engine and into persistence.
//! Field names serialize in camelCase to match the saved-state layout.

use serde::{Deserialize, Serialize};

use crate::board::{CellId, Player, PlayerId};

/// A single placed token.
///
/// Serializes as `{"cell", "playerId"}`. Older saved states wrote
/// `{"circleId", "player": {"id", ...}}`, which is also accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "StoredMove")]
pub struct Move {
    pub cell: CellId,
    pub player_id: PlayerId,
}

impl Move {
    pub const fn new(cell: CellId, player_id: PlayerId) -> Self {
        Move { cell, player_id }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("move at cell {0} does not name a player")]
pub struct MissingMover(CellId);

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredMove {
    #[serde(alias = "circleId")]
    cell: CellId,
    player_id: Option<PlayerId>,
    player: Option<MoverRef>,
}

#[derive(Deserialize)]
struct MoverRef {
    id: PlayerId,
}

impl TryFrom<StoredMove> for Move {
    type Error = MissingMover;

    fn try_from(stored: StoredMove) -> Result<Self, Self::Error> {
        let player_id = stored
            .player_id
            .or(stored.player.map(|p| p.id))
            .ok_or(MissingMover(stored.cell))?;
        Ok(Move::new(stored.cell, player_id))
    }
}

/// Derived status of a game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStatus {
    pub is_complete: bool,
    /// `None` while in progress and on a tie.
    pub winner: Option<Player>,
}

impl GameStatus {
    pub fn winner_id(&self) -> Option<PlayerId> {
        self.winner.as_ref().map(|p| p.id)
    }

    /// Whether the game ended with a full board and no line.
    pub fn is_tie(&self) -> bool {
        self.is_complete && self.winner.is_none()
    }
}

/// An archived finished game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub moves: Vec<Move>,
    pub status: GameStatus,
}

/// Finished games, split into the current round and everything before it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundHistory {
    pub current_round_games: Vec<GameRecord>,
    pub all_games: Vec<GameRecord>,
}

impl RoundHistory {
    pub fn archive(&mut self, record: GameRecord) {
        self.current_round_games.push(record);
    }

    /// Moves the current round's games into `all_games`, returning how many moved.
    pub fn close_round(&mut self) -> usize {
        let moved = self.current_round_games.len();
        self.all_games.append(&mut self.current_round_games);
        moved
    }

    /// Total games ever archived.
    pub fn total_games(&self) -> usize {
        self.current_round_games.len() + self.all_games.len()
    }
}

/// Win count for one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerStats {
    pub player: Player,
    pub wins: usize,
}

/// Scoreboard for a set of games.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub players: [PlayerStats; 2],
    pub ties: usize,
}

impl Stats {
    /// Tallies wins per player and ties over `games`.
    ///
    /// Games still in progress count toward neither.
    pub fn tally(players: &[Player; 2], games: &[GameRecord]) -> Stats {
        let wins_of = |player: &Player| {
            games
                .iter()
                .filter(|g| g.status.winner_id() == Some(player.id))
                .count()
        };
        let ties = games.iter().filter(|g| g.status.is_tie()).count();

        Stats {
            players: [
                PlayerStats {
                    player: players[0].clone(),
                    wins: wins_of(&players[0]),
                },
                PlayerStats {
                    player: players[1].clone(),
                    wins: wins_of(&players[1]),
                },
            ],
            ties,
        }
    }

    pub fn wins(&self, id: PlayerId) -> usize {
        self.players
            .iter()
            .find(|s| s.player.id == id)
            .map_or(0, |s| s.wins)
    }

    pub fn games(&self) -> usize {
        self.players.iter().map(|s| s.wins).sum::<usize>() + self.ties
    }
}
