//! A single match between two players
//!
//! `Game` owns both players and the board and decides whose turn it is.
//! Turn 1 belongs to player one; odd turns are player one's, even turns
//! player two's. Every action is gated by that rule except forced draws
//! (the opening hand).
//!
//! Winning is not decided here. Callers inspect the nexus health after each
//! action (see `GameLoop`) and record the result with `declare_winner`.

use crate::core::{CardId, GameId, Player, PlayerId, Side};
use crate::game::actions::GameAction;
use crate::game::board::{Board, BoardDeploy};
use crate::game::logger::{game_event, GameLogger};
use crate::game::outcome::{AttackResult, DeployResult, DrawResult, NexusAttackResult, TurnResult};
use crate::game::GameSettings;
use crate::zones::{Deck, HandTake};

#[derive(Debug)]
pub struct Game {
    pub id: GameId,
    players: [Player; 2],
    board: Board,
    turn: u32,
    connected: [bool; 2],
    started: bool,
    winner: Option<Side>,
    settings: GameSettings,
    pub logger: GameLogger,
}

impl Game {
    pub fn new(
        id: GameId,
        (p1, deck1): (PlayerId, Deck),
        (p2, deck2): (PlayerId, Deck),
        settings: &GameSettings,
    ) -> Self {
        let mut logger = GameLogger::new();
        logger.set_prefix(format!("[game {id}]"));
        Game {
            id,
            players: [
                Player::new(p1, Side::One, deck1, settings),
                Player::new(p2, Side::Two, deck2, settings),
            ],
            board: Board::new(settings.board_size, settings.nexus_health),
            turn: 1,
            connected: [false; 2],
            started: false,
            winner: None,
            settings: settings.clone(),
            logger,
        }
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn player(&self, side: Side) -> &Player {
        &self.players[side.index()]
    }

    /// Mutable player access for debug tooling (e.g. injecting cards)
    pub fn player_mut(&mut self, side: Side) -> &mut Player {
        &mut self.players[side.index()]
    }

    pub fn side_of(&self, player: PlayerId) -> Option<Side> {
        Side::both()
            .into_iter()
            .find(|side| self.players[side.index()].id == player)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn active_side(&self) -> Side {
        if self.turn % 2 == 1 {
            Side::One
        } else {
            Side::Two
        }
    }

    pub fn check_turn(&self, side: Side) -> bool {
        self.active_side() == side
    }

    /// Mark `side` as connected; true once both players are
    pub fn connect(&mut self, side: Side) -> bool {
        self.connected[side.index()] = true;
        self.both_connected()
    }

    pub fn is_connected(&self, side: Side) -> bool {
        self.connected[side.index()]
    }

    pub fn both_connected(&self) -> bool {
        self.connected[0] && self.connected[1]
    }

    /// Flip the started flag; true only for the call that flipped it
    pub fn mark_started(&mut self) -> bool {
        !std::mem::replace(&mut self.started, true)
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Record the winner; true only for the first call
    pub fn declare_winner(&mut self, side: Side) -> bool {
        if self.winner.is_some() {
            return false;
        }
        self.winner = Some(side);
        self.logger.minimal(&format!(
            "Player {} wins on turn {}",
            self.players[side.index()].id,
            self.turn
        ));
        true
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub fn is_finished(&self) -> bool {
        self.winner.is_some()
    }

    /// Draw a card for `side`; `force` skips the turn check
    pub fn draw_card(&mut self, side: Side, force: bool) -> DrawResult {
        if !force && !self.check_turn(side) {
            game_event!(self.logger, rejected, "{side} cannot draw: not their turn");
            return DrawResult::NotYourTurn;
        }
        let player = &mut self.players[side.index()];
        let Some(id) = player.draw_card() else {
            game_event!(self.logger, rejected, "{side} cannot draw: deck is empty");
            return DrawResult::DeckEmpty;
        };
        match player.hand().get(id) {
            Some(card) => {
                let card = card.view();
                game_event!(self.logger, verbose, "{side} draws {} ({id})", card.name);
                DrawResult::Drawn { card }
            }
            None => DrawResult::DeckEmpty,
        }
    }

    pub fn deploy_card(&mut self, side: Side, card_id: CardId) -> DeployResult {
        if !self.check_turn(side) {
            game_event!(self.logger, rejected, "{side} cannot deploy {card_id}: not their turn");
            return DeployResult::NotYourTurn;
        }
        let player = &self.players[side.index()];
        let Some(index) = player.hand().position(card_id) else {
            game_event!(self.logger, rejected, "{side} has no card {card_id} in hand");
            return DeployResult::CardNotFound;
        };
        let cost = player.hand().get_at(index).map_or(0, |card| card.cost());
        let mana = player.mana();
        if cost > mana {
            game_event!(
                self.logger,
                rejected,
                "{side} cannot afford {card_id}: costs {cost}, has {mana}"
            );
            return DeployResult::InsufficientMana { cost, mana };
        }
        // checked before the card leaves the hand so nothing has to be refunded
        if !self.board.has_room(side) {
            game_event!(self.logger, rejected, "{side} cannot deploy {card_id}: board is full");
            return DeployResult::BoardFull;
        }

        let player = &mut self.players[side.index()];
        let card = match player.use_card(card_id) {
            HandTake::Taken(card) => card,
            HandTake::TooExpensive { cost, mana } => {
                return DeployResult::InsufficientMana { cost, mana };
            }
            HandTake::NotInHand => return DeployResult::CardNotFound,
        };

        let view = card.view();
        match self.board.deploy_card(card, side) {
            BoardDeploy::Placed(_) => {
                game_event!(self.logger, normal, "{side} deploys {} ({card_id})", view.name);
                DeployResult::Deployed { card: view }
            }
            BoardDeploy::Full(card) => {
                self.players[side.index()].refund_card(index, card);
                DeployResult::BoardFull
            }
        }
    }

    pub fn attack_card(&mut self, side: Side, attacker: CardId, defender: CardId) -> AttackResult {
        if !self.check_turn(side) {
            game_event!(self.logger, rejected, "{side} cannot attack: not their turn");
            return AttackResult::NotYourTurn;
        }
        let result = self.board.attack_card(attacker, defender, side);
        match result {
            AttackResult::Resolved {
                defender_destroyed,
                attacker_destroyed,
            } => {
                game_event!(self.logger, normal, "{attacker} attacks {defender}");
                if defender_destroyed {
                    game_event!(self.logger, normal, "{defender} is destroyed");
                }
                if attacker_destroyed {
                    game_event!(self.logger, normal, "{attacker} is destroyed");
                }
            }
            rejected => {
                game_event!(self.logger, rejected, "{attacker} cannot attack {defender}: {rejected:?}");
            }
        }
        result
    }

    pub fn attack_nexus(&mut self, side: Side, attacker: CardId) -> NexusAttackResult {
        if !self.check_turn(side) {
            game_event!(self.logger, rejected, "{side} cannot attack: not their turn");
            return NexusAttackResult::NotYourTurn;
        }
        let result = self.board.attack_nexus(attacker, side.opposite());
        match result {
            NexusAttackResult::Hit { damage, remaining } => {
                game_event!(
                    self.logger,
                    normal,
                    "{attacker} hits the nexus of {} for {damage} ({remaining} left)",
                    side.opposite()
                );
            }
            rejected => {
                game_event!(self.logger, rejected, "{attacker} cannot attack the nexus: {rejected:?}");
            }
        }
        result
    }

    /// End `side`'s turn and hand over to the opponent
    pub fn increase_turn(&mut self, side: Side) -> TurnResult {
        if !self.check_turn(side) {
            game_event!(self.logger, rejected, "{side} cannot end the turn: not their turn");
            return TurnResult::NotYourTurn;
        }
        self.turn += 1;
        let next = side.opposite();
        self.players[next.index()].next_turn();
        self.board.end_turn(side);
        game_event!(self.logger, normal, "Turn {}: {next} to play", self.turn);
        TurnResult::Advanced {
            turn: self.turn,
            active: next,
        }
    }

    /// Perform `action` for `side`, returning its result code (0 on success)
    pub fn apply_action(&mut self, side: Side, action: GameAction) -> i32 {
        match action {
            GameAction::Deploy { card } => self.deploy_card(side, card).code(),
            GameAction::Attack { attacker, defender } => {
                self.attack_card(side, attacker, defender).code()
            }
            GameAction::AttackNexus { attacker } => self.attack_nexus(side, attacker).code(),
            GameAction::EndTurn => self.increase_turn(side).code(),
        }
    }

    /// Every action `side` could legally take right now
    pub fn available_actions(&self, side: Side) -> Vec<GameAction> {
        if !self.check_turn(side) {
            return Vec::new();
        }
        let player = self.player(side);
        let mut actions = Vec::new();

        if self.board.has_room(side) {
            actions.extend(
                player
                    .hand()
                    .iter()
                    .filter(|card| card.cost() <= player.mana())
                    .filter_map(|card| card.id())
                    .map(|card| GameAction::Deploy { card }),
            );
        }

        let enemies: Vec<CardId> = self
            .board
            .slots(side.opposite())
            .iter()
            .filter_map(|slot| slot.card.id())
            .collect();
        for slot in self.board.slots(side).iter().filter(|slot| !slot.has_attacked) {
            let Some(attacker) = slot.card.id() else { continue };
            actions.push(GameAction::AttackNexus { attacker });
            actions.extend(
                enemies
                    .iter()
                    .map(|&defender| GameAction::Attack { attacker, defender }),
            );
        }

        actions.push(GameAction::EndTurn);
        actions
    }
}

#[cfg(test)]
pub(crate) mod tests_support {
    use super::*;

    /// Game with empty decks and default settings
    pub fn empty_game() -> Game {
        Game::new(
            GameId::new(0),
            (PlayerId::new(1), Deck::default()),
            (PlayerId::new(2), Deck::default()),
            &GameSettings::default(),
        )
    }
}
