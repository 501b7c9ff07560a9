//! Game loop implementation
//!
//! Drives a game with two controllers: each turn the active player draws,
//! then acts until they end the turn. After every action the loop checks the
//! nexuses, since the game itself never declares a winner.

use crate::core::{PlayerId, Side};
use crate::game::actions::GameAction;
use crate::game::controller::{GameView, PlayerController};
use crate::game::logger::{game_event, VerbosityLevel};
use crate::game::outcome::CODE_OK;
use crate::game::Game;
use crate::session::deal_opening_hands;

/// Result of running a game to completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameResult {
    /// Winner of the game (None if the turn limit was hit)
    pub winner: Option<PlayerId>,
    /// Turn counter when the game stopped
    pub turns_played: u32,
    pub end_reason: GameEndReason,
}

/// Reason the game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEndReason {
    /// The given player's nexus was destroyed
    NexusDestroyed(PlayerId),
    /// Game reached maximum turn limit
    TurnLimit,
}

/// Side whose opponent's nexus is down, if any
pub fn winner(game: &Game) -> Option<Side> {
    Side::both()
        .into_iter()
        .find(|side| game.board().nexus_health(side.opposite()) <= 0)
}

pub struct GameLoop<'a> {
    pub game: &'a mut Game,
    max_turns: u32,
    /// Actions allowed in one turn before the loop ends it on the player's behalf
    max_actions_per_turn: u32,
    actions_taken: u64,
}

impl<'a> GameLoop<'a> {
    pub fn new(game: &'a mut Game) -> Self {
        GameLoop {
            game,
            max_turns: 200,
            max_actions_per_turn: 64,
            actions_taken: 0,
        }
    }

    /// Set maximum turns before the game is abandoned without a winner
    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    pub fn with_verbosity(self, verbosity: VerbosityLevel) -> Self {
        self.game.logger.set_verbosity(verbosity);
        self
    }

    /// Total actions applied so far, including rejected ones
    pub fn actions_taken(&self) -> u64 {
        self.actions_taken
    }

    /// Connect both seats and deal the opening hands if that has not happened yet
    fn setup_game(&mut self) {
        for side in Side::both() {
            self.game.connect(side);
        }
        if self.game.mark_started() {
            deal_opening_hands(self.game);
        }
    }

    /// Run the game until a nexus falls or the turn limit is reached
    pub fn run_game(
        &mut self,
        controller1: &mut dyn PlayerController,
        controller2: &mut dyn PlayerController,
    ) -> GameResult {
        self.setup_game();

        let result = loop {
            if let Some(result) = self.finished() {
                break result;
            }
            let side = self.game.active_side();
            let controller: &mut dyn PlayerController = match side {
                Side::One => &mut *controller1,
                Side::Two => &mut *controller2,
            };
            self.run_turn(side, controller);
        };

        let winner_side = result.winner.and_then(|id| self.game.side_of(id));
        let view = GameView::new(self.game, Side::One);
        controller1.on_game_end(&view, winner_side == Some(Side::One));
        let view = GameView::new(self.game, Side::Two);
        controller2.on_game_end(&view, winner_side == Some(Side::Two));
        match winner_side {
            Some(side) => {
                self.game.declare_winner(side);
            }
            None => self
                .game
                .logger
                .minimal(&format!("No winner after {} turns", result.turns_played)),
        }
        result
    }

    fn finished(&self) -> Option<GameResult> {
        if let Some(side) = winner(self.game) {
            let loser = self.game.player(side.opposite()).id;
            return Some(GameResult {
                winner: Some(self.game.player(side).id),
                turns_played: self.game.turn(),
                end_reason: GameEndReason::NexusDestroyed(loser),
            });
        }
        if self.game.turn() > self.max_turns {
            return Some(GameResult {
                winner: None,
                turns_played: self.game.turn(),
                end_reason: GameEndReason::TurnLimit,
            });
        }
        None
    }

    fn run_turn(&mut self, side: Side, controller: &mut dyn PlayerController) {
        game_event!(self.game.logger, normal, "Turn {} ({side})", self.game.turn());
        self.game.draw_card(side, false);

        for _ in 0..self.max_actions_per_turn {
            let available = self.game.available_actions(side);
            let view = GameView::new(self.game, side);
            let action = controller
                .choose_action(&view, &available)
                .unwrap_or(GameAction::EndTurn);

            self.actions_taken += 1;
            let code = self.game.apply_action(side, action);
            if code != CODE_OK {
                game_event!(self.game.logger, verbose, "{side} tried to {action} (code {code})");
            }
            if action == GameAction::EndTurn || winner(self.game).is_some() {
                return;
            }
        }
        self.game.increase_turn(side);
    }
}
