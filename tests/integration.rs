//! Integration tests for store-backed sessions.
//!
//! Each test drives a `Session` the way an embedding UI would, then builds a
//! second session over the same store to simulate a reload and checks that
//! nothing was lost.

use fourline::board::PlayerId;
use fourline::storage::{parse_snapshot, MemoryStore, Session, SessionError, StateStore};
use fourline::{GameConfig, MoveError};

/// Fills the board row by row without ever making four in a row.
const DRAW_SEQUENCE: [u8; 7] = [1, 3, 2, 4, 5, 7, 6];

/// Player one wins vertically in column 1.
const VERTICAL_WIN: [u8; 7] = [1, 2, 1, 2, 1, 2, 1];

/// Player two wins along the bottom row.
const BOTTOM_ROW_WIN: [u8; 8] = [7, 1, 1, 2, 2, 3, 3, 4];

fn open(store: MemoryStore) -> Session<MemoryStore> {
    Session::new(GameConfig::default(), store).unwrap()
}

fn new_session() -> Session<MemoryStore> {
    open(MemoryStore::new())
}

fn reload(session: Session<MemoryStore>) -> Session<MemoryStore> {
    let config = session.config().clone();
    Session::new(config, session.into_store()).unwrap()
}

fn play(session: &mut Session<MemoryStore>, columns: &[u8]) {
    for &col in columns {
        session.player_move(col).unwrap();
    }
}

#[test]
fn game_in_progress_survives_reload() {
    let mut session = new_session();
    play(&mut session, &[4, 4, 3]);
    let before = session.game();

    let session = reload(session);
    let after = session.game();
    assert_eq!(after, before);
    assert_eq!(after.current_player.id, PlayerId::Two);
    assert_eq!(after.moves.len(), 3);
}

#[test]
fn finished_game_blocks_moves_until_reset() {
    let mut session = new_session();
    play(&mut session, &VERTICAL_WIN);

    let game = session.game();
    assert!(game.status.is_complete);
    assert_eq!(game.status.winner.as_ref().map(|p| p.id), Some(PlayerId::One));

    let mut session = reload(session);
    assert!(matches!(
        session.player_move(5),
        Err(SessionError::Move(MoveError::GameOver))
    ));

    assert!(session.reset().unwrap());
    assert!(session.game().moves.is_empty());
    assert_eq!(session.stats().wins(PlayerId::One), 1);
}

#[test]
fn reset_mid_game_discards_without_archiving() {
    let mut session = new_session();
    play(&mut session, &[1, 2, 3, 4]);
    assert!(!session.reset().unwrap());

    let session = reload(session);
    assert!(session.game().moves.is_empty());
    assert_eq!(session.stats().games(), 0);
    assert!(session.engine().history().current_round_games.is_empty());
}

#[test]
fn scoreboard_accumulates_over_a_round() {
    let mut session = new_session();

    play(&mut session, &VERTICAL_WIN);
    session.reset().unwrap();
    play(&mut session, &BOTTOM_ROW_WIN);
    session.reset().unwrap();
    for _ in 0..6 {
        play(&mut session, &DRAW_SEQUENCE);
    }
    assert!(session.game().status.is_tie());
    session.reset().unwrap();
    play(&mut session, &VERTICAL_WIN);
    session.reset().unwrap();

    let session = reload(session);
    let stats = session.stats();
    assert_eq!(stats.wins(PlayerId::One), 2);
    assert_eq!(stats.wins(PlayerId::Two), 1);
    assert_eq!(stats.ties, 1);
    assert_eq!(stats.players[1].player.display_name, "Player 2");
}

#[test]
fn new_round_clears_scoreboard_but_keeps_history() {
    let mut session = new_session();
    play(&mut session, &VERTICAL_WIN);
    session.reset().unwrap();
    play(&mut session, &BOTTOM_ROW_WIN);

    // The finished second game is archived by the new round itself.
    assert_eq!(session.new_round().unwrap(), 2);

    let session = reload(session);
    assert_eq!(session.stats().games(), 0);
    let engine = session.engine();
    assert_eq!(engine.history().all_games.len(), 2);
    assert!(engine.history().current_round_games.is_empty());
    assert!(engine.moves().is_empty());
}

#[test]
fn stored_state_has_documented_shape() {
    let mut session = new_session();
    play(&mut session, &[2]);

    let raw = session.store().read("fourline.state").unwrap();
    assert_eq!(
        raw,
        r#"{"currentGameMoves":[{"cell":37,"playerId":1}],"history":{"currentRoundGames":[],"allGames":[]}}"#
    );
}

#[test]
fn state_saved_with_embedded_players_is_accepted() {
    let p1 = r#"{"id":1,"name":"Player 1","colorClass":"magenta"}"#;
    let p2 = r#"{"id":2,"name":"Player 2","colorClass":"purple"}"#;
    let win: Vec<String> = [36, 37, 29, 30, 22, 23, 15]
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            let player = if i % 2 == 0 { p1 } else { p2 };
            format!(r#"{{"circleId":{cell},"player":{player}}}"#)
        })
        .collect();
    let raw = format!(
        r#"{{"currentGameMoves":[{{"circleId":36,"player":{p1}}},{{"circleId":37,"player":{p2}}}],
            "history":{{"currentRoundGames":[{{"moves":[{}],
                "status":{{"isComplete":true,"winner":{p1}}}}}],"allGames":[]}}}}"#,
        win.join(",")
    );
    let mut store = MemoryStore::new();
    store.write("fourline.state", raw);

    let mut session = open(store);
    assert!(session.load_error().is_none());
    let game = session.game();
    assert_eq!(game.moves.len(), 2);
    assert_eq!(game.moves[1].player_id, PlayerId::Two);
    assert_eq!(game.current_player.id, PlayerId::One);
    assert_eq!(session.stats().wins(PlayerId::One), 1);

    // The next write uses the current layout.
    session.player_move(3).unwrap();
    let raw = session.store().read("fourline.state").unwrap();
    assert!(raw.contains(r#"{"cell":36,"playerId":1}"#));
    assert!(!raw.contains("circleId"));
}

#[test]
fn state_saved_with_player_ids_is_accepted() {
    let mut store = MemoryStore::new();
    store.write(
        "fourline.state",
        r#"{"currentGameMoves":[{"circleId":36,"playerId":1},{"circleId":37,"playerId":2}],
            "history":{"currentRoundGames":[],"allGames":[]}}"#
            .to_string(),
    );
    let session = open(store);
    assert!(session.load_error().is_none());
    assert_eq!(session.game().moves.len(), 2);
}

#[test]
fn tampered_state_is_reported_and_replaced() {
    let mut store = MemoryStore::new();
    // Two consecutive moves by player one.
    store.write(
        "fourline.state",
        r#"{"currentGameMoves":[{"cell":36,"playerId":1},{"cell":37,"playerId":1}]}"#.to_string(),
    );
    let mut session = open(store);

    let err = session.load_error().unwrap();
    assert_eq!(
        err.to_string(),
        "current game is not legal: move 1: played by player 1, expected player 2"
    );
    assert!(session.game().moves.is_empty());

    session.player_move(7).unwrap();
    let raw = session.store().read("fourline.state").unwrap();
    let snapshot = parse_snapshot(&raw).unwrap();
    assert_eq!(snapshot.current_game_moves.len(), 1);
    assert!(session.load_error().is_none());
}

#[test]
fn clicking_any_free_cell_in_a_column_drops_the_token() {
    let mut session = new_session();
    assert_eq!(session.player_move_at(3).unwrap().id(), 38);
    assert_eq!(session.player_move_at(17).unwrap().id(), 31);
    assert!(matches!(
        session.player_move_at(31),
        Err(SessionError::Move(MoveError::CellOccupied(31)))
    ));
}
