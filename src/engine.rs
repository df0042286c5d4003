//! Game engine.
//!
//! Owns the move list of the active game and the round history. Turn order,
//! winner and completion are not stored; every query re-derives them from
//! the move list.

use serde::Serialize;

use crate::board::{
    capacity, drop_from, lowest_open_cell, winning_lines, CellId, Column, Line, Occupancy, Player,
    PlayerId, ALL_PLAYER_IDS, CELL_COUNT,
};
use crate::config::{check_player_ids, ConfigError, GameConfig};
use crate::record::{GameRecord, GameStatus, Move, RoundHistory, Stats};
use crate::storage::snapshot::{parse_snapshot, Snapshot, SnapshotError};

/// Errors returned when a move is rejected. The game is left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("the game is already complete")]
    GameOver,

    #[error("column {0} is outside 1..=7")]
    InvalidColumn(u8),

    #[error("cell {0} is outside 1..=42")]
    InvalidCell(u8),

    #[error("column {0} is full")]
    ColumnFull(u8),

    #[error("cell {0} is already occupied")]
    CellOccupied(u8),
}

/// Why a recorded move list is not a legal game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ReplayError {
    #[error("move {index}: played by player {found}, expected player {expected}")]
    OutOfTurn {
        index: usize,
        expected: PlayerId,
        found: PlayerId,
    },

    #[error("move {index}: cell {cell} is not where a token would land")]
    Unsupported { index: usize, cell: CellId },

    #[error("move {index}: the game was already complete")]
    AfterCompletion { index: usize },
}

/// Outcome of a move list, by player id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    Win { player: PlayerId, line: Line },
    Draw,
}

impl Outcome {
    pub fn is_complete(self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    pub fn winner(self) -> Option<PlayerId> {
        match self {
            Outcome::Win { player, .. } => Some(player),
            _ => None,
        }
    }
}

/// Evaluates a move list from scratch.
///
/// Both players are checked against every line. A legal game can never give
/// both players a line; if a corrupted list does, the player whose line was
/// completed first in move order wins and the anomaly is logged.
pub fn evaluate(moves: &[Move]) -> Outcome {
    let mut owned = [Occupancy::new(); 2];
    let mut placed_at = [0usize; CELL_COUNT];
    for (i, m) in moves.iter().enumerate() {
        owned[m.player_id.index()].insert(m.cell);
        placed_at[m.cell.index()] = i;
    }

    // Earliest completed line per player: (index of completing move, line).
    let mut earliest: [Option<(usize, Line)>; 2] = [None; 2];
    for id in ALL_PLAYER_IDS {
        let slot = &mut earliest[id.index()];
        for line in winning_lines() {
            if !owned[id.index()].covers(line) {
                continue;
            }
            let completed_at = line
                .cells()
                .iter()
                .map(|c| placed_at[c.index()])
                .max()
                .unwrap_or(0);
            if slot.map_or(true, |(at, _)| completed_at < at) {
                *slot = Some((completed_at, *line));
            }
        }
    }

    let win = match earliest {
        [Some((a, first)), Some((b, second))] => {
            log::error!(
                "both players hold a complete line (moves {} and {}); awarding the earlier",
                a,
                b
            );
            if a <= b {
                Some((PlayerId::One, first))
            } else {
                Some((PlayerId::Two, second))
            }
        }
        [Some((_, line)), None] => Some((PlayerId::One, line)),
        [None, Some((_, line))] => Some((PlayerId::Two, line)),
        [None, None] => None,
    };

    match win {
        Some((player, line)) => Outcome::Win { player, line },
        None if moves.len() >= capacity() => Outcome::Draw,
        None => Outcome::InProgress,
    }
}

/// Checks that `moves` is a legal game and returns its outcome.
///
/// Every move must be made by the player whose turn it is, land exactly where
/// gravity puts a token in its column, and come before the game completed.
pub fn replay(moves: &[Move]) -> Result<Outcome, ReplayError> {
    let mut occupied = Occupancy::new();
    for (index, m) in moves.iter().enumerate() {
        if evaluate(&moves[..index]).is_complete() {
            return Err(ReplayError::AfterCompletion { index });
        }
        let expected = PlayerId::for_turn(index);
        if m.player_id != expected {
            return Err(ReplayError::OutOfTurn {
                index,
                expected,
                found: m.player_id,
            });
        }
        if lowest_open_cell(m.cell.column(), occupied) != Some(m.cell) {
            return Err(ReplayError::Unsupported {
                index,
                cell: m.cell,
            });
        }
        occupied.insert(m.cell);
    }
    Ok(evaluate(moves))
}

/// Everything a presentation layer needs to draw the current game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameView {
    pub moves: Vec<Move>,
    pub current_player: Player,
    pub status: GameStatus,
}

/// The active game plus the round history for one pair of players.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Engine {
    players: [Player; 2],
    moves: Vec<Move>,
    history: RoundHistory,
}

impl Engine {
    /// Creates an engine with an empty board and no history.
    ///
    /// `players[0]` must be player one and `players[1]` player two.
    pub fn new(players: [Player; 2]) -> Result<Self, ConfigError> {
        check_player_ids(&players)?;
        Ok(Engine {
            players,
            moves: Vec::new(),
            history: RoundHistory::default(),
        })
    }

    pub fn from_config(config: &GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Engine::new(config.players.clone())
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    /// The move list of the active game, oldest first.
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn history(&self) -> &RoundHistory {
        &self.history
    }

    /// The player due to move, derived from the parity of the move count.
    pub fn current_player(&self) -> &Player {
        self.player(PlayerId::for_turn(self.moves.len()))
    }

    /// All occupied cells, regardless of owner.
    pub fn occupancy(&self) -> Occupancy {
        self.moves.iter().map(|m| m.cell).collect()
    }

    /// Cells held by one player.
    pub fn cells_of(&self, id: PlayerId) -> Occupancy {
        self.moves
            .iter()
            .filter(|m| m.player_id == id)
            .map(|m| m.cell)
            .collect()
    }

    /// Drops the current player's token into `column` (1..=7).
    ///
    /// Returns the cell where the token came to rest.
    pub fn attempt_move(&mut self, column: u8) -> Result<CellId, MoveError> {
        self.ensure_in_play()?;
        let column = Column::new(column).ok_or(MoveError::InvalidColumn(column))?;
        let cell = lowest_open_cell(column, self.occupancy())
            .ok_or(MoveError::ColumnFull(column.number()))?;
        Ok(self.place(cell))
    }

    /// Drops the current player's token starting from a chosen cell.
    ///
    /// The token falls from `cell` as far as gravity allows, which is the
    /// same resting place as a move into that cell's column.
    pub fn attempt_move_at(&mut self, cell: u8) -> Result<CellId, MoveError> {
        self.ensure_in_play()?;
        let start = CellId::new(cell).ok_or(MoveError::InvalidCell(cell))?;
        let resting = drop_from(start, self.occupancy()).ok_or(MoveError::CellOccupied(cell))?;
        Ok(self.place(resting))
    }

    fn ensure_in_play(&self) -> Result<(), MoveError> {
        if self.outcome().is_complete() {
            return Err(MoveError::GameOver);
        }
        Ok(())
    }

    fn place(&mut self, cell: CellId) -> CellId {
        let player_id = PlayerId::for_turn(self.moves.len());
        self.moves.push(Move::new(cell, player_id));
        log::debug!(
            "player {} placed at cell {} (move {})",
            player_id,
            cell,
            self.moves.len()
        );
        cell
    }

    /// Outcome of the active game by player id.
    pub fn outcome(&self) -> Outcome {
        evaluate(&self.moves)
    }

    /// Status of the active game, recomputed from the move list.
    pub fn status(&self) -> GameStatus {
        let outcome = self.outcome();
        GameStatus {
            is_complete: outcome.is_complete(),
            winner: outcome.winner().map(|id| self.player(id).clone()),
        }
    }

    /// The line that won the active game, if any.
    pub fn winning_line(&self) -> Option<Line> {
        match self.outcome() {
            Outcome::Win { line, .. } => Some(line),
            _ => None,
        }
    }

    pub fn view(&self) -> GameView {
        GameView {
            moves: self.moves.clone(),
            current_player: self.current_player().clone(),
            status: self.status(),
        }
    }

    /// Captures the active game as a record. Does not clear the board.
    pub fn end_game(&self) -> GameRecord {
        GameRecord {
            moves: self.moves.clone(),
            status: self.status(),
        }
    }

    /// Clears the board, archiving the game first if it is complete.
    ///
    /// Returns whether a record was archived.
    pub fn reset_game(&mut self) -> bool {
        let record = self.end_game();
        let archived = record.status.is_complete;
        if archived {
            log::info!(
                "archiving game of {} moves (winner: {})",
                record.moves.len(),
                record
                    .status
                    .winner
                    .as_ref()
                    .map_or("none", |p| p.display_name.as_str())
            );
            self.history.archive(record);
        }
        self.moves.clear();
        archived
    }

    /// Resets the game, then closes the round.
    ///
    /// Returns the number of records moved into the all-time history.
    pub fn start_new_round(&mut self) -> usize {
        self.reset_game();
        let moved = self.history.close_round();
        log::info!("new round started; {} games moved to history", moved);
        moved
    }

    /// Win and tie counts for the current round.
    pub fn compute_stats(&self) -> Stats {
        Stats::tally(&self.players, &self.history.current_round_games)
    }

    /// The persistable state of this engine.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            current_game_moves: self.moves.clone(),
            history: self.history.clone(),
        }
    }

    /// Replaces the game and history with a snapshot after checking that it
    /// is legal. The players are kept.
    pub fn restore(self, snapshot: Snapshot) -> Result<Self, SnapshotError> {
        replay(&snapshot.current_game_moves).map_err(SnapshotError::CurrentGame)?;
        check_records("currentRoundGames", &snapshot.history.current_round_games)?;
        check_records("allGames", &snapshot.history.all_games)?;

        Ok(Engine {
            players: self.players,
            moves: snapshot.current_game_moves,
            history: snapshot.history,
        })
    }

    /// Loads serialized state, falling back to an empty board and history.
    ///
    /// Missing state is not an error. Malformed or inconsistent state is
    /// logged, returned alongside the fresh engine, and otherwise discarded.
    pub fn load_or_default(self, raw: Option<&str>) -> (Self, Option<SnapshotError>) {
        let fresh = Engine {
            players: self.players,
            moves: Vec::new(),
            history: RoundHistory::default(),
        };
        let Some(raw) = raw else {
            return (fresh, None);
        };
        match parse_snapshot(raw).and_then(|snapshot| fresh.clone().restore(snapshot)) {
            Ok(engine) => (engine, None),
            Err(e) => {
                log::warn!("discarding persisted state: {}", e);
                (fresh, Some(e))
            }
        }
    }
}

fn check_records(list: &'static str, records: &[GameRecord]) -> Result<(), SnapshotError> {
    for (index, record) in records.iter().enumerate() {
        let outcome = replay(&record.moves)
            .map_err(|source| SnapshotError::Record { list, index, source })?;
        let consistent = outcome.is_complete()
            && record.status.is_complete
            && outcome.winner() == record.status.winner_id();
        if !consistent {
            return Err(SnapshotError::RecordStatus { list, index });
        }
    }
    Ok(())
}
