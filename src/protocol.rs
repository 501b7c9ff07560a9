//! Message intents exchanged with a game client
//!
//! Clients send one `ClientMessage` per request; the session layer answers
//! with one or more `ServerMessage`s, each addressed to a single player.
//! Both are JSON objects tagged by `type`.

use crate::core::{CardId, CardView, GameId, PlayerId};
use crate::game::outcome::{AttackResult, DeployResult, NexusAttackResult, TurnResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    Connect,
    DrawCard,
    DeployCard {
        card: CardId,
    },
    Attack {
        attacker: CardId,
        defender: CardId,
    },
    AttackNexus {
        attacker: CardId,
    },
    EndTurn,
    GetMana,
    GetNexusHealth {
        #[serde(default)]
        opponent: bool,
    },
    GetTurn,
    GetCard {
        card: CardId,
    },
}

impl ClientMessage {
    /// True for messages that change the game, as opposed to connecting or querying
    pub fn is_action(&self) -> bool {
        matches!(
            self,
            ClientMessage::DrawCard
                | ClientMessage::DeployCard { .. }
                | ClientMessage::Attack { .. }
                | ClientMessage::AttackNexus { .. }
                | ClientMessage::EndTurn
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Reply to `connect`; `waiting` while the opponent has not joined
    Connected { player: PlayerId, waiting: bool },
    /// Sent to each player once both are connected, with their opening hand
    GameStart {
        game: GameId,
        first_player: PlayerId,
        hand: Vec<CardView>,
    },
    /// Full draw result, for the player who drew
    DrawCard {
        code: i32,
        card: Option<CardView>,
    },
    /// Redacted draw notification, for the opponent
    DrawCardPrivate { player: PlayerId },
    DeployCard {
        player: PlayerId,
        code: i32,
        outcome: DeployResult,
    },
    Attack {
        player: PlayerId,
        attacker: CardId,
        defender: CardId,
        code: i32,
        outcome: AttackResult,
    },
    AttackNexus {
        player: PlayerId,
        attacker: CardId,
        code: i32,
        outcome: NexusAttackResult,
    },
    EndTurn {
        player: PlayerId,
        code: i32,
        outcome: TurnResult,
    },
    Mana {
        mana: i32,
        mana_cap: i32,
        mana_max: i32,
    },
    NexusHealth { opponent: bool, health: i32 },
    Turn { player: PlayerId },
    Card { card: Option<CardView> },
    GameOver { winner: PlayerId },
    Error { message: String },
}

/// A server message and the player it is for
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Envelope {
    pub to: PlayerId,
    pub message: ServerMessage,
}

impl Envelope {
    pub fn new(to: PlayerId, message: ServerMessage) -> Self {
        Envelope { to, message }
    }
}
