//! Zero controller for testing and automation
//!
//! Always chooses the first available action. Legal actions are listed as
//! deploys, then attacks, then `EndTurn`, so this bot plays every card it can
//! afford, sends everything at the nexus and only then passes. Games between
//! two zero controllers are fully determined by the deck shuffle.

use crate::core::PlayerId;
use crate::game::actions::GameAction;
use crate::game::controller::{GameView, PlayerController};

pub struct ZeroController {
    player_id: PlayerId,
}

impl ZeroController {
    pub fn new(player_id: PlayerId) -> Self {
        ZeroController { player_id }
    }
}

impl PlayerController for ZeroController {
    fn player_id(&self) -> PlayerId {
        self.player_id
    }

    fn choose_action(&mut self, _view: &GameView<'_>, available: &[GameAction]) -> Option<GameAction> {
        available.first().copied()
    }
}
