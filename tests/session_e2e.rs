//! Session tests: a game played entirely through client messages
//!
//! Players are paired by the matchmaker, connect, and then only talk to the
//! game through `handle_message`. The tests check who receives what.

use cyberarena::core::{BaseCard, CardId, CardView, GameId, PlayerId};
use cyberarena::game::{GameAction, GameManager, GameSettings};
use cyberarena::loader::CardCatalog;
use cyberarena::matchmaking::TicketManager;
use cyberarena::protocol::{ClientMessage, Envelope, ServerMessage};
use cyberarena::session::handle_message;
use std::sync::Arc;

const P1: PlayerId = PlayerId::new(100);
const P2: PlayerId = PlayerId::new(200);

fn cheap_catalog() -> CardCatalog {
    let cards = [("Pawn", 1, 2, 2, 0), ("Knight", 2, 3, 3, 1), ("Drone", 1, 1, 4, 0)]
        .into_iter()
        .zip(1u32..)
        .map(|((name, cost, hp, ap, dp), id)| {
            BaseCard::new(name, cost, hp, ap, dp).unwrap().with_catalog_id(id)
        });
    CardCatalog::from_cards(cards).unwrap()
}

/// Match two players and connect both; returns the opening hands
fn start() -> (GameManager, GameId, Vec<CardView>, Vec<CardView>) {
    let gm = GameManager::new(Arc::new(cheap_catalog()), GameSettings::default()).with_seed(21);
    let tm = TicketManager::new();
    tm.create_ticket(P1);
    tm.create_ticket(P2);
    let game = tm.find_match(&gm)[0].game;

    handle_message(&gm, game, P1, ClientMessage::Connect);
    let out = handle_message(&gm, game, P2, ClientMessage::Connect);
    let mut hands = out.into_iter().filter_map(|env| match env.message {
        ServerMessage::GameStart { hand, first_player, .. } => {
            assert_eq!(first_player, P1);
            Some((env.to, hand))
        }
        _ => None,
    });
    let (to1, hand1) = hands.next().expect("game start for player 1");
    let (to2, hand2) = hands.next().expect("game start for player 2");
    assert_eq!((to1, to2), (P1, P2));
    (gm, game, hand1, hand2)
}

fn card_id(view: &CardView) -> CardId {
    view.id.expect("cards in hand have an id")
}

fn to_message(action: GameAction) -> ClientMessage {
    match action {
        GameAction::Deploy { card } => ClientMessage::DeployCard { card },
        GameAction::Attack { attacker, defender } => ClientMessage::Attack { attacker, defender },
        GameAction::AttackNexus { attacker } => ClientMessage::AttackNexus { attacker },
        GameAction::EndTurn => ClientMessage::EndTurn,
    }
}

#[test]
fn test_deploy_is_broadcast_and_hand_stays_private() {
    let (gm, game, hand1, _) = start();
    let deployed = card_id(&hand1[0]);
    let kept = card_id(&hand1[1]);

    let out = handle_message(&gm, game, P1, ClientMessage::DeployCard { card: deployed });
    let recipients: Vec<PlayerId> = out.iter().map(|env| env.to).collect();
    assert_eq!(recipients, vec![P2, P1]);
    assert!(out
        .iter()
        .all(|env| matches!(env.message, ServerMessage::DeployCard { code: 0, .. })));

    // the board is public, the hand is not
    let seen = handle_message(&gm, game, P2, ClientMessage::GetCard { card: deployed });
    assert!(matches!(&seen[0].message, ServerMessage::Card { card: Some(view) } if view.id == Some(deployed)));
    let hidden = handle_message(&gm, game, P2, ClientMessage::GetCard { card: kept });
    assert_eq!(hidden, vec![Envelope::new(P2, ServerMessage::Card { card: None })]);
}

#[test]
fn test_out_of_turn_actions_are_rejected_privately() {
    let (gm, game, _, hand2) = start();
    let out = handle_message(&gm, game, P2, ClientMessage::DeployCard { card: card_id(&hand2[0]) });
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].to, P2);
    assert!(matches!(out[0].message, ServerMessage::DeployCard { code: -1, .. }));

    let out = handle_message(&gm, game, P2, ClientMessage::DrawCard);
    assert_eq!(out, vec![Envelope::new(P2, ServerMessage::DrawCard { code: -1, card: None })]);
}

#[test]
fn test_turn_handover() {
    let (gm, game, _, _) = start();
    let out = handle_message(&gm, game, P1, ClientMessage::EndTurn);
    assert_eq!(out.len(), 2);

    let turn = handle_message(&gm, game, P1, ClientMessage::GetTurn);
    assert_eq!(turn, vec![Envelope::new(P1, ServerMessage::Turn { player: P2 })]);

    let mana = handle_message(&gm, game, P2, ClientMessage::GetMana);
    assert_eq!(
        mana,
        vec![Envelope::new(
            P2,
            ServerMessage::Mana {
                mana: 6,
                mana_cap: 6,
                mana_max: 10
            }
        )]
    );

    let health = handle_message(&gm, game, P2, ClientMessage::GetNexusHealth { opponent: true });
    assert_eq!(
        health,
        vec![Envelope::new(P2, ServerMessage::NexusHealth { opponent: true, health: 20 })]
    );
}

#[test]
fn test_game_plays_to_game_over() {
    let (gm, game, _, _) = start();
    let mut winner = None;

    'turns: for _ in 0..200 {
        let active = gm.get_turn(game).unwrap();
        handle_message(&gm, game, active, ClientMessage::DrawCard);
        loop {
            let actions = gm.available_actions(game, active).unwrap();
            let action = actions[0];
            let out = handle_message(&gm, game, active, to_message(action));
            for env in &out {
                if let ServerMessage::GameOver { winner: w } = env.message {
                    winner = Some(w);
                }
            }
            if winner.is_some() {
                break 'turns;
            }
            if action == GameAction::EndTurn {
                break;
            }
        }
    }

    assert!(winner == Some(P1) || winner == Some(P2), "no winner: {winner:?}");
    let loser = if winner == Some(P1) { P2 } else { P1 };
    let health = handle_message(&gm, game, loser, ClientMessage::GetNexusHealth { opponent: false });
    assert!(matches!(health[0].message, ServerMessage::NexusHealth { health: hp, .. } if hp <= 0));

    // a decided game accepts no more actions
    let winner = if loser == P1 { P2 } else { P1 };
    for player in [P1, P2] {
        let out = handle_message(&gm, game, player, ClientMessage::EndTurn);
        assert_eq!(out, vec![Envelope::new(player, ServerMessage::GameOver { winner })]);
    }
}

#[test]
fn test_unconnected_game_cannot_be_played() {
    let gm = GameManager::new(Arc::new(cheap_catalog()), GameSettings::default()).with_seed(3);
    let game = gm.create_game(P1, P2);
    handle_message(&gm, game, P1, ClientMessage::Connect);

    for _ in 0..3 {
        let out = handle_message(&gm, game, P1, ClientMessage::DrawCard);
        assert!(matches!(&out[..], [Envelope { to, message: ServerMessage::Error { .. } }] if *to == P1));
    }
    assert!(gm.hand(game, P1).unwrap().is_empty());
    assert_eq!(gm.get_nexus_health(game, P1, true), Ok(20));
}
