//! Player identities.
//!
//! There are exactly two players per session. Moves only carry a
//! `PlayerId`; display details live on `Player` and are supplied by the
//! caller's configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Rejected player id other than 1 or 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("player id {0} is not 1 or 2")]
pub struct InvalidPlayerId(pub u8);

/// Which of the two players; serialized as `1` or `2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum PlayerId {
    One = 1,
    Two = 2,
}

/// Both player ids in turn order.
pub const ALL_PLAYER_IDS: [PlayerId; 2] = [PlayerId::One, PlayerId::Two];

impl PlayerId {
    /// The player due to move after `move_count` moves. Player one opens.
    pub const fn for_turn(move_count: usize) -> PlayerId {
        if move_count % 2 == 0 {
            PlayerId::One
        } else {
            PlayerId::Two
        }
    }

    pub const fn other(self) -> PlayerId {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }

    /// Zero-based index into a two-element player array.
    pub const fn index(self) -> usize {
        self as usize - 1
    }

    pub const fn number(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for PlayerId {
    type Error = InvalidPlayerId;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        match id {
            1 => Ok(PlayerId::One),
            2 => Ok(PlayerId::Two),
            other => Err(InvalidPlayerId(other)),
        }
    }
}

impl From<PlayerId> for u8 {
    fn from(id: PlayerId) -> u8 {
        id.number()
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// A player as presented to callers.
///
/// `display_name` and `color_tag` also accept the `name` and `colorClass`
/// keys used by older saved states.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    #[serde(alias = "name")]
    pub display_name: String,
    #[serde(alias = "colorClass")]
    pub color_tag: String,
}

impl Player {
    pub fn new(
        id: PlayerId,
        display_name: impl Into<String>,
        color_tag: impl Into<String>,
    ) -> Self {
        Player {
            id,
            display_name: display_name.into(),
            color_tag: color_tag.into(),
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turns_alternate_from_player_one() {
        assert_eq!(PlayerId::for_turn(0), PlayerId::One);
        assert_eq!(PlayerId::for_turn(1), PlayerId::Two);
        assert_eq!(PlayerId::for_turn(41), PlayerId::Two);
        assert_eq!(PlayerId::for_turn(42), PlayerId::One);
    }

    #[test]
    fn other_and_index() {
        assert_eq!(PlayerId::One.other(), PlayerId::Two);
        assert_eq!(PlayerId::Two.other(), PlayerId::One);
        assert_eq!(PlayerId::One.index(), 0);
        assert_eq!(PlayerId::Two.index(), 1);
    }

    #[test]
    fn player_id_serializes_as_number() {
        assert_eq!(serde_json::to_string(&PlayerId::Two).unwrap(), "2");
        assert_eq!(serde_json::from_str::<PlayerId>("1").unwrap(), PlayerId::One);
        assert!(serde_json::from_str::<PlayerId>("3").is_err());
        assert_eq!(PlayerId::try_from(0), Err(InvalidPlayerId(0)));
    }

    #[test]
    fn player_accepts_legacy_keys() {
        let json = r#"{"id":1,"name":"Player 1","colorClass":"magenta"}"#;
        let player: Player = serde_json::from_str(json).unwrap();
        assert_eq!(player, Player::new(PlayerId::One, "Player 1", "magenta"));

        let encoded = serde_json::to_string(&player).unwrap();
        assert_eq!(encoded, r#"{"id":1,"displayName":"Player 1","colorTag":"magenta"}"#);
    }
}
