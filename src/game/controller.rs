//! Player controller trait and game view
//!
//! Controllers are the bots that drive a game in simulations and tests. The
//! game loop hands them a read-only view of the game from their seat and the
//! list of legal actions, and applies whatever they pick.

use crate::core::{PlayerId, Side};
use crate::game::actions::GameAction;
use crate::game::board::Slot;
use crate::game::Game;
use crate::zones::Hand;

/// Read-only view of a game from one player's seat
pub struct GameView<'a> {
    game: &'a Game,
    side: Side,
}

impl<'a> GameView<'a> {
    pub fn new(game: &'a Game, side: Side) -> Self {
        GameView { game, side }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn player_id(&self) -> PlayerId {
        self.game.player(self.side).id
    }

    pub fn turn(&self) -> u32 {
        self.game.turn()
    }

    pub fn mana(&self) -> i32 {
        self.game.player(self.side).mana()
    }

    pub fn hand(&self) -> &'a Hand {
        self.game.player(self.side).hand()
    }

    pub fn deck_size(&self) -> usize {
        self.game.player(self.side).deck().len()
    }

    pub fn own_board(&self) -> &'a [Slot] {
        self.game.board().slots(self.side)
    }

    pub fn enemy_board(&self) -> &'a [Slot] {
        self.game.board().slots(self.side.opposite())
    }

    pub fn own_nexus(&self) -> i32 {
        self.game.board().nexus_health(self.side)
    }

    pub fn enemy_nexus(&self) -> i32 {
        self.game.board().nexus_health(self.side.opposite())
    }
}

pub trait PlayerController {
    fn player_id(&self) -> PlayerId;

    /// Pick one of `available` (never empty; it always contains `EndTurn`).
    /// Returning `None` ends the turn.
    fn choose_action(&mut self, view: &GameView<'_>, available: &[GameAction]) -> Option<GameAction>;

    fn on_game_end(&mut self, _view: &GameView<'_>, _won: bool) {}
}
