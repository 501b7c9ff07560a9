//! Client message dispatch for one seat of a game
//!
//! `handle_message` turns a client request into game calls and addresses the
//! replies. Public events (deploys, attacks, turn changes) go to both
//! players. Draws go in full to the drawer and redacted to the opponent.
//! Rejected actions are only reported back to the player who sent them.
//!
//! Game actions are only accepted between the start of the game (both players
//! connected) and the nexus hit that decides it. Queries are always answered.

use crate::core::{CardView, GameId, PlayerId, Side};
use crate::game::game_loop::winner;
use crate::game::outcome::{DrawResult, NexusAttackResult, CODE_OK};
use crate::game::{Game, GameManager};
use crate::protocol::{ClientMessage, Envelope, ServerMessage};

/// Deal the opening hand to both players with forced draws
pub fn deal_opening_hands(game: &mut Game) {
    let count = game.settings().starting_hand;
    for side in Side::both() {
        for _ in 0..count {
            if let DrawResult::DeckEmpty = game.draw_card(side, true) {
                break;
            }
        }
    }
    game.logger.normal(&format!(
        "Opening hands dealt, {} starts",
        game.player(game.active_side()).id
    ));
}

/// Handle one message from `player` in `game`
///
/// A game or player that cannot be resolved produces a single `error` reply
/// instead of failing.
pub fn handle_message(
    manager: &GameManager,
    game: GameId,
    player: PlayerId,
    message: ClientMessage,
) -> Vec<Envelope> {
    manager
        .with_game(game, player, |g, side| dispatch(g, side, message))
        .unwrap_or_else(|unresolved| {
            vec![Envelope::new(
                player,
                ServerMessage::Error {
                    message: unresolved.to_string(),
                },
            )]
        })
}

fn dispatch(game: &mut Game, side: Side, message: ClientMessage) -> Vec<Envelope> {
    let me = game.player(side).id;
    let opponent = game.player(side.opposite()).id;
    let mut out = Vec::new();

    if message.is_action() {
        if let Some(reply) = refuse_action(game) {
            out.push(Envelope::new(me, reply));
            return out;
        }
    }

    match message {
        ClientMessage::Connect => {
            let both = game.connect(side);
            out.push(Envelope::new(
                me,
                ServerMessage::Connected {
                    player: me,
                    waiting: !both,
                },
            ));
            if both && game.mark_started() {
                begin_game(game, &mut out);
            }
        }
        ClientMessage::DrawCard => {
            let result = game.draw_card(side, false);
            let code = result.code();
            let card = match result {
                DrawResult::Drawn { card } => Some(card),
                _ => None,
            };
            let drawn = card.is_some();
            out.push(Envelope::new(me, ServerMessage::DrawCard { code, card }));
            if drawn {
                out.push(Envelope::new(
                    opponent,
                    ServerMessage::DrawCardPrivate { player: me },
                ));
            }
        }
        ClientMessage::DeployCard { card } => {
            let outcome = game.deploy_card(side, card);
            let code = outcome.code();
            broadcast(
                &mut out,
                me,
                opponent,
                code,
                ServerMessage::DeployCard {
                    player: me,
                    code,
                    outcome,
                },
            );
        }
        ClientMessage::Attack { attacker, defender } => {
            let outcome = game.attack_card(side, attacker, defender);
            let code = outcome.code();
            broadcast(
                &mut out,
                me,
                opponent,
                code,
                ServerMessage::Attack {
                    player: me,
                    attacker,
                    defender,
                    code,
                    outcome,
                },
            );
        }
        ClientMessage::AttackNexus { attacker } => {
            let outcome = game.attack_nexus(side, attacker);
            let code = outcome.code();
            broadcast(
                &mut out,
                me,
                opponent,
                code,
                ServerMessage::AttackNexus {
                    player: me,
                    attacker,
                    code,
                    outcome,
                },
            );
            if matches!(outcome, NexusAttackResult::Hit { .. }) {
                if let Some(winning_side) = winner(game) {
                    if game.declare_winner(winning_side) {
                        let winner = game.player(winning_side).id;
                        for to in [me, opponent] {
                            out.push(Envelope::new(to, ServerMessage::GameOver { winner }));
                        }
                    }
                }
            }
        }
        ClientMessage::EndTurn => {
            let outcome = game.increase_turn(side);
            let code = outcome.code();
            broadcast(
                &mut out,
                me,
                opponent,
                code,
                ServerMessage::EndTurn {
                    player: me,
                    code,
                    outcome,
                },
            );
        }
        ClientMessage::GetMana => {
            let player = game.player(side);
            out.push(Envelope::new(
                me,
                ServerMessage::Mana {
                    mana: player.mana(),
                    mana_cap: player.mana_cap(),
                    mana_max: player.mana_max(),
                },
            ));
        }
        ClientMessage::GetNexusHealth { opponent: theirs } => {
            let target = if theirs { side.opposite() } else { side };
            out.push(Envelope::new(
                me,
                ServerMessage::NexusHealth {
                    opponent: theirs,
                    health: game.board().nexus_health(target),
                },
            ));
        }
        ClientMessage::GetTurn => {
            let active = game.player(game.active_side()).id;
            out.push(Envelope::new(me, ServerMessage::Turn { player: active }));
        }
        ClientMessage::GetCard { card } => {
            let view = game
                .player(side)
                .hand()
                .get(card)
                .or_else(|| game.board().card(card.side, card))
                .map(|c| c.view());
            out.push(Envelope::new(me, ServerMessage::Card { card: view }));
        }
    }
    out
}

/// Reply for an action arriving before the start or after the end of the game
fn refuse_action(game: &Game) -> Option<ServerMessage> {
    if let Some(side) = game.winner() {
        return Some(ServerMessage::GameOver {
            winner: game.player(side).id,
        });
    }
    if !game.is_started() {
        game.logger.rejected("action before both players connected");
        return Some(ServerMessage::Error {
            message: format!("game {} has not started", game.id),
        });
    }
    None
}

/// Successful actions go to both players, rejections only to the actor
fn broadcast(out: &mut Vec<Envelope>, me: PlayerId, opponent: PlayerId, code: i32, message: ServerMessage) {
    if code == CODE_OK {
        out.push(Envelope::new(opponent, message.clone()));
    }
    out.push(Envelope::new(me, message));
}

fn begin_game(game: &mut Game, out: &mut Vec<Envelope>) {
    deal_opening_hands(game);
    let first_player = game.player(game.active_side()).id;
    for side in Side::both() {
        let player = game.player(side);
        let hand: Vec<CardView> = player.hand().iter().map(|c| c.view()).collect();
        out.push(Envelope::new(
            player.id,
            ServerMessage::GameStart {
                game: game.id,
                first_player,
                hand,
            },
        ));
    }
}
