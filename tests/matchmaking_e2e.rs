//! Matchmaking tests across threads
//!
//! Players queue, cancel and get matched concurrently. Whatever the
//! interleaving, every ticket must end up in exactly one terminal state and
//! every created game must belong to exactly two closed tickets.

use cyberarena::core::{PlayerId, TicketId};
use cyberarena::game::{GameManager, GameSettings};
use cyberarena::loader::CardCatalog;
use cyberarena::matchmaking::{MatchMade, OpenTicket, TicketManager, TicketStatus};
use rustc_hash::FxHashMap;
use std::sync::{Arc, Mutex};
use std::thread;

fn manager() -> GameManager {
    GameManager::new(Arc::new(CardCatalog::builtin()), GameSettings::default()).with_seed(11)
}

#[test]
fn test_single_ticket_stays_open() {
    let gm = manager();
    let tm = TicketManager::new();
    let ticket = tm.create_ticket(PlayerId::new(1));

    assert!(tm.find_match(&gm).is_empty());
    assert_eq!(tm.get_ticket_status(ticket.id), TicketStatus::Open);
    assert!(gm.is_empty());
}

#[test]
fn test_terminal_status_is_stable() {
    let gm = manager();
    let tm = TicketManager::new();
    let a = tm.create_ticket(PlayerId::new(1)).id;
    let b = tm.create_ticket(PlayerId::new(2)).id;
    let c = tm.create_ticket(PlayerId::new(3)).id;
    tm.cancel_ticket(b);
    tm.create_ticket(PlayerId::new(4));

    let matches = tm.find_match(&gm);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].tickets, [a, c]);

    for _ in 0..3 {
        assert_eq!(tm.get_ticket_status(a), TicketStatus::Closed);
        assert_eq!(tm.get_ticket_status(b), TicketStatus::Cancel);
        assert_eq!(tm.get_ticket_status(c), TicketStatus::Closed);
    }
    // terminal tickets cannot be cancelled or closed again
    assert!(tm.cancel_ticket(a).is_none());
    assert!(tm.close_ticket(b).is_none());
    assert_eq!(tm.get_ticket_status(b), TicketStatus::Cancel);
}

#[test]
fn test_matched_players_can_find_their_game() {
    let gm = manager();
    let tm = TicketManager::new();
    tm.create_ticket(PlayerId::new(10));
    tm.create_ticket(PlayerId::new(20));
    let made = tm.find_match(&gm)[0];

    assert_eq!(gm.find_player(PlayerId::new(10)), Some(made.game));
    assert_eq!(gm.find_player(PlayerId::new(20)), Some(made.game));
    assert_eq!(gm.get_turn(made.game), Ok(PlayerId::new(10)));
}

#[test]
fn test_concurrent_queue_cancel_and_match() {
    const THREADS: u64 = 8;
    const PER_THREAD: u64 = 50;

    let gm = manager();
    let tm = TicketManager::new();
    let matches: Mutex<Vec<MatchMade>> = Mutex::new(Vec::new());
    let cancelled: Mutex<Vec<TicketId>> = Mutex::new(Vec::new());

    thread::scope(|scope| {
        for t in 0..THREADS {
            let (gm, tm, matches, cancelled) = (&gm, &tm, &matches, &cancelled);
            scope.spawn(move || {
                for i in 0..PER_THREAD {
                    let user = PlayerId::new(t * PER_THREAD + i);
                    let OpenTicket::Opened(ticket) = tm.open_ticket(user) else {
                        panic!("user {user} queued twice");
                    };
                    if i % 5 == 0 {
                        if let Some(gone) = tm.cancel_ticket(ticket.id) {
                            cancelled.lock().unwrap().push(gone.id);
                        }
                    }
                    let made = tm.find_match(gm);
                    matches.lock().unwrap().extend(made);
                }
            });
        }
    });
    let mut matches = matches.into_inner().unwrap();
    matches.extend(tm.find_match(&gm));
    let cancelled = cancelled.into_inner().unwrap();

    let total = THREADS * PER_THREAD;
    let mut seen: FxHashMap<TicketId, TicketStatus> = FxHashMap::default();
    for made in &matches {
        for id in made.tickets {
            assert!(seen.insert(id, TicketStatus::Closed).is_none(), "{id} matched twice");
            let ticket = tm.get_ticket(id).unwrap();
            assert_eq!(ticket.game, Some(made.game));
        }
        assert!(gm.contains(made.game));
    }
    for id in &cancelled {
        assert!(seen.insert(*id, TicketStatus::Cancel).is_none(), "{id} matched and cancelled");
    }

    // at most one ticket is left waiting
    assert!(tm.len() <= 1);
    assert_eq!(seen.len() as u64 + tm.len() as u64, total);
    assert_eq!(gm.len(), matches.len());
    for id in 0..total {
        let id = TicketId::new(id);
        let expected = seen.get(&id).copied().unwrap_or(TicketStatus::Open);
        assert_eq!(tm.get_ticket_status(id), expected);
    }
}
