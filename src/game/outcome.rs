//! Outcomes of player actions
//!
//! Rejections such as "not your turn" are normal play, not errors, so each
//! action reports through its own closed enum. `code()` gives the legacy
//! integer code clients already understand: 0 success, -1 not your turn,
//! -2 insufficient mana, -3 not found, -4 board full, -5 already attacked,
//! -6 deck empty.

use crate::core::{CardId, CardView, Side};
use serde::{Deserialize, Serialize};

pub const CODE_OK: i32 = 0;
pub const CODE_NOT_YOUR_TURN: i32 = -1;
pub const CODE_INSUFFICIENT_MANA: i32 = -2;
pub const CODE_NOT_FOUND: i32 = -3;
pub const CODE_BOARD_FULL: i32 = -4;
pub const CODE_ALREADY_ATTACKED: i32 = -5;
pub const CODE_DECK_EMPTY: i32 = -6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum DeployResult {
    Deployed { card: CardView },
    NotYourTurn,
    CardNotFound,
    InsufficientMana { cost: i32, mana: i32 },
    BoardFull,
}

impl DeployResult {
    pub fn code(&self) -> i32 {
        match self {
            DeployResult::Deployed { .. } => CODE_OK,
            DeployResult::NotYourTurn => CODE_NOT_YOUR_TURN,
            DeployResult::CardNotFound => CODE_NOT_FOUND,
            DeployResult::InsufficientMana { .. } => CODE_INSUFFICIENT_MANA,
            DeployResult::BoardFull => CODE_BOARD_FULL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum AttackResult {
    Resolved {
        defender_destroyed: bool,
        attacker_destroyed: bool,
    },
    NotYourTurn,
    AttackerNotFound,
    DefenderNotFound,
    AlreadyAttacked,
}

impl AttackResult {
    pub fn code(&self) -> i32 {
        match self {
            AttackResult::Resolved { .. } => CODE_OK,
            AttackResult::NotYourTurn => CODE_NOT_YOUR_TURN,
            AttackResult::AttackerNotFound | AttackResult::DefenderNotFound => CODE_NOT_FOUND,
            AttackResult::AlreadyAttacked => CODE_ALREADY_ATTACKED,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum NexusAttackResult {
    Hit { damage: i32, remaining: i32 },
    NotYourTurn,
    AttackerNotFound,
    AlreadyAttacked,
}

impl NexusAttackResult {
    pub fn code(&self) -> i32 {
        match self {
            NexusAttackResult::Hit { .. } => CODE_OK,
            NexusAttackResult::NotYourTurn => CODE_NOT_YOUR_TURN,
            NexusAttackResult::AttackerNotFound => CODE_NOT_FOUND,
            NexusAttackResult::AlreadyAttacked => CODE_ALREADY_ATTACKED,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum DrawResult {
    Drawn { card: CardView },
    NotYourTurn,
    DeckEmpty,
}

impl DrawResult {
    pub fn code(&self) -> i32 {
        match self {
            DrawResult::Drawn { .. } => CODE_OK,
            DrawResult::NotYourTurn => CODE_NOT_YOUR_TURN,
            DrawResult::DeckEmpty => CODE_DECK_EMPTY,
        }
    }

    pub fn card_id(&self) -> Option<CardId> {
        match self {
            DrawResult::Drawn { card } => card.id,
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum TurnResult {
    Advanced { turn: u32, active: Side },
    NotYourTurn,
}

impl TurnResult {
    pub fn code(&self) -> i32 {
        match self {
            TurnResult::Advanced { .. } => CODE_OK,
            TurnResult::NotYourTurn => CODE_NOT_YOUR_TURN,
        }
    }
}
