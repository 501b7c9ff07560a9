//! Random AI controller for testing and baseline gameplay
//!
//! Makes random choices from available actions. Ending the turn is just one
//! option among the others, so turns vary in length.

use crate::core::PlayerId;
use crate::game::actions::GameAction;
use crate::game::controller::{GameView, PlayerController};
use rand::Rng;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

pub struct RandomController {
    player_id: PlayerId,
    rng: Xoshiro256PlusPlus,
}

impl RandomController {
    pub fn new(player_id: PlayerId) -> Self {
        RandomController {
            player_id,
            rng: Xoshiro256PlusPlus::from_entropy(),
        }
    }

    /// Seeded controller for reproducible games
    pub fn with_seed(player_id: PlayerId, seed: u64) -> Self {
        RandomController {
            player_id,
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
        }
    }
}

impl PlayerController for RandomController {
    fn player_id(&self) -> PlayerId {
        self.player_id
    }

    fn choose_action(&mut self, _view: &GameView<'_>, available: &[GameAction]) -> Option<GameAction> {
        if available.is_empty() {
            None
        } else {
            let index = self.rng.gen_range(0..available.len());
            Some(available[index])
        }
    }
}
