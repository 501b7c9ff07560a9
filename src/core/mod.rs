//! Core card types, boosts and players

pub mod boost;
pub mod card;
pub mod player;
pub mod types;

pub use boost::Boost;
pub use card::{BaseCard, Card, CardView};
pub use player::Player;
pub use types::{CardId, CardKind, GameId, PlayerId, Race, Rarity, Side, TicketId};
