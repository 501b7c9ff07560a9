//! Actions a player may take on their turn

use crate::core::CardId;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum GameAction {
    /// Play a card from hand onto the board
    Deploy { card: CardId },
    /// Attack an enemy card
    Attack { attacker: CardId, defender: CardId },
    /// Attack the enemy nexus directly
    AttackNexus { attacker: CardId },
    /// Pass the turn to the opponent
    EndTurn,
}

impl fmt::Display for GameAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameAction::Deploy { card } => write!(f, "deploy {card}"),
            GameAction::Attack { attacker, defender } => write!(f, "attack {defender} with {attacker}"),
            GameAction::AttackNexus { attacker } => write!(f, "attack nexus with {attacker}"),
            GameAction::EndTurn => write!(f, "end turn"),
        }
    }
}
