//! Strongly-typed identifiers and card descriptors
//!
//! Players, games, tickets and cards are all addressed by integers on the
//! wire. Wrapping them in distinct newtypes keeps a ticket id from ever being
//! passed where a game id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            pub const fn new(id: u64) -> Self {
                $name(id)
            }

            pub fn as_u64(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

numeric_id!(
    /// External user id of a player (owned by the account system)
    PlayerId
);
numeric_id!(
    /// Id of a live game in the `GameManager` registry
    GameId
);
numeric_id!(
    /// Matchmaking ticket id, monotonic across open and archived tickets
    TicketId
);

/// Which seat of a game a player occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    One,
    Two,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::One => Side::Two,
            Side::Two => Side::One,
        }
    }

    /// Array index of this side (0 or 1)
    pub fn index(self) -> usize {
        match self {
            Side::One => 0,
            Side::Two => 1,
        }
    }

    pub fn both() -> [Side; 2] {
        [Side::One, Side::Two]
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::One => write!(f, "player 1"),
            Side::Two => write!(f, "player 2"),
        }
    }
}

/// In-game card id
///
/// Assigned when a card enters a hand. The owning side is part of the id, so
/// the two players' counters can never produce the same id within one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId {
    pub side: Side,
    pub seq: u32,
}

impl CardId {
    pub fn new(side: Side, seq: u32) -> Self {
        CardId { side, seq }
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.side.index() + 1, self.seq)
    }
}

/// Card rarity, free-form in the card library ("common", "legendary", ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rarity(String);

impl Rarity {
    pub fn new(s: impl Into<String>) -> Self {
        Rarity(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Rarity {
    fn from(s: &str) -> Self {
        Rarity(s.to_string())
    }
}

/// Card race ("hacker", "android", ...), stored as `type` in card data files
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Race(String);

impl Race {
    pub fn new(s: impl Into<String>) -> Self {
        Race(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Race {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Race {
    fn from(s: &str) -> Self {
        Race(s.to_string())
    }
}

/// Broad category of a library card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardKind {
    Object,
    #[default]
    Character,
    Player,
}
