//! Ticket-based matchmaking
//!
//! A player asks for a game by opening a ticket. `find_match` pairs the two
//! oldest open tickets, creates a game for them and archives both tickets as
//! closed with the game id attached. A cancelled ticket is archived as well.
//!
//! Open tickets and the archive live behind one mutex, so a ticket can never
//! be matched and cancelled at the same time. When matching, the ticket lock
//! is taken before the game registry lock.

use crate::core::{GameId, PlayerId, TicketId};
use crate::game::GameManager;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Open,
    Closed,
    Cancel,
    /// Reported for ids that were never issued
    DontExist,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: TicketId,
    pub user: PlayerId,
    pub status: TicketStatus,
    /// Game created for this ticket, once matched
    pub game: Option<GameId>,
}

/// A pairing produced by `find_match`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchMade {
    pub game: GameId,
    pub tickets: [TicketId; 2],
    /// Player one (moves first) and player two
    pub players: [PlayerId; 2],
}

/// Result of `open_ticket`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenTicket {
    Opened(Ticket),
    /// The user is already waiting with this ticket
    AlreadyOpen(Ticket),
}

#[derive(Debug, Default)]
struct Book {
    /// Ordered by id, which is also arrival order
    open: BTreeMap<TicketId, Ticket>,
    history: FxHashMap<TicketId, Ticket>,
    next_id: u64,
}

impl Book {
    fn create(&mut self, user: PlayerId) -> Ticket {
        let id = TicketId::new(self.next_id);
        self.next_id += 1;
        let ticket = Ticket {
            id,
            user,
            status: TicketStatus::Open,
            game: None,
        };
        self.open.insert(id, ticket.clone());
        ticket
    }

    fn open_for(&self, user: PlayerId) -> Option<&Ticket> {
        self.open.values().find(|ticket| ticket.user == user)
    }

    /// Oldest open ticket with a partner from a different user, and that partner
    fn oldest_pair(&self) -> Option<[(TicketId, PlayerId); 2]> {
        let mut tickets = self.open.values();
        while let Some(first) = tickets.next() {
            if let Some(second) = tickets.clone().find(|t| t.user != first.user) {
                return Some([(first.id, first.user), (second.id, second.user)]);
            }
        }
        None
    }

    fn archive(&mut self, id: TicketId, status: TicketStatus, game: Option<GameId>) -> Option<Ticket> {
        let mut ticket = self.open.remove(&id)?;
        ticket.status = status;
        ticket.game = game;
        self.history.insert(id, ticket.clone());
        Some(ticket)
    }
}

#[derive(Debug, Default)]
pub struct TicketManager {
    book: Mutex<Book>,
}

impl TicketManager {
    pub fn new() -> Self {
        TicketManager::default()
    }

    fn book(&self) -> MutexGuard<'_, Book> {
        self.book.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of open tickets
    pub fn len(&self) -> usize {
        self.book().open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Open a new ticket without checking for an existing one
    pub fn create_ticket(&self, user: PlayerId) -> Ticket {
        self.book().create(user)
    }

    /// Open a ticket unless the user already has one, atomically
    pub fn open_ticket(&self, user: PlayerId) -> OpenTicket {
        let mut book = self.book();
        if let Some(existing) = book.open_for(user) {
            return OpenTicket::AlreadyOpen(existing.clone());
        }
        OpenTicket::Opened(book.create(user))
    }

    pub fn ticket_active(&self, id: TicketId) -> bool {
        self.book().open.contains_key(&id)
    }

    /// Open or archived ticket with this id
    pub fn get_ticket(&self, id: TicketId) -> Option<Ticket> {
        let book = self.book();
        book.open.get(&id).or_else(|| book.history.get(&id)).cloned()
    }

    pub fn has_open_ticket(&self, user: PlayerId) -> bool {
        self.book().open_for(user).is_some()
    }

    /// The user's open ticket, if any
    pub fn get_ticket_by_user_id(&self, user: PlayerId) -> Option<Ticket> {
        self.book().open_for(user).cloned()
    }

    pub fn get_ticket_status(&self, id: TicketId) -> TicketStatus {
        self.get_ticket(id)
            .map_or(TicketStatus::DontExist, |ticket| ticket.status)
    }

    /// Cancel an open ticket; `None` if it is not open
    pub fn cancel_ticket(&self, id: TicketId) -> Option<Ticket> {
        self.book().archive(id, TicketStatus::Cancel, None)
    }

    /// Close an open ticket without a game; `None` if it is not open
    pub fn close_ticket(&self, id: TicketId) -> Option<Ticket> {
        self.book().archive(id, TicketStatus::Closed, None)
    }

    /// Pair open tickets oldest first, creating one game per pair
    ///
    /// With an odd number of open tickets the newest stays open. Two tickets of
    /// the same user are never paired with each other.
    pub fn find_match(&self, games: &GameManager) -> Vec<MatchMade> {
        let mut book = self.book();
        let mut matches = Vec::new();
        while let Some([(first, p1), (second, p2)]) = book.oldest_pair() {
            let game = games.create_game(p1, p2);
            book.archive(first, TicketStatus::Closed, Some(game));
            book.archive(second, TicketStatus::Closed, Some(game));
            matches.push(MatchMade {
                game,
                tickets: [first, second],
                players: [p1, p2],
            });
        }
        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameSettings;
    use crate::loader::CardCatalog;
    use std::sync::Arc;

    fn games() -> GameManager {
        GameManager::new(Arc::new(CardCatalog::builtin()), GameSettings::default())
    }

    #[test]
    fn test_ticket_ids_are_sequential() {
        let tm = TicketManager::new();
        assert_eq!(tm.create_ticket(PlayerId::new(5)).id, TicketId::new(0));
        assert_eq!(tm.create_ticket(PlayerId::new(6)).id, TicketId::new(1));
        tm.cancel_ticket(TicketId::new(0));
        // archived tickets still count
        assert_eq!(tm.create_ticket(PlayerId::new(7)).id, TicketId::new(2));
    }

    #[test]
    fn test_open_ticket_is_unique_per_user() {
        let tm = TicketManager::new();
        let OpenTicket::Opened(ticket) = tm.open_ticket(PlayerId::new(1)) else {
            panic!("first ticket should open");
        };
        assert_eq!(tm.open_ticket(PlayerId::new(1)), OpenTicket::AlreadyOpen(ticket.clone()));
        assert_eq!(tm.get_ticket_by_user_id(PlayerId::new(1)), Some(ticket));
        assert_eq!(tm.len(), 1);
    }

    #[test]
    fn test_status_lifecycle() {
        let tm = TicketManager::new();
        let a = tm.create_ticket(PlayerId::new(1)).id;
        let b = tm.create_ticket(PlayerId::new(2)).id;
        assert_eq!(tm.get_ticket_status(a), TicketStatus::Open);
        assert!(tm.ticket_active(a));

        assert_eq!(tm.cancel_ticket(a).map(|t| t.status), Some(TicketStatus::Cancel));
        assert!(tm.cancel_ticket(a).is_none());
        assert_eq!(tm.get_ticket_status(a), TicketStatus::Cancel);
        assert!(!tm.has_open_ticket(PlayerId::new(1)));

        assert_eq!(tm.close_ticket(b).map(|t| t.status), Some(TicketStatus::Closed));
        assert_eq!(tm.get_ticket_status(b), TicketStatus::Closed);
        assert_eq!(tm.get_ticket_status(TicketId::new(77)), TicketStatus::DontExist);
        assert!(tm.is_empty());
    }

    #[test]
    fn test_find_match_pairs_oldest_first() {
        let tm = TicketManager::new();
        let gm = games();
        let ids: Vec<TicketId> = (1..=3).map(|u| tm.create_ticket(PlayerId::new(u)).id).collect();

        let matches = tm.find_match(&gm);
        assert_eq!(matches.len(), 1);
        let made = matches[0];
        assert_eq!(made.tickets, [ids[0], ids[1]]);
        assert_eq!(made.players, [PlayerId::new(1), PlayerId::new(2)]);
        assert!(gm.contains(made.game));

        for id in &ids[..2] {
            let ticket = tm.get_ticket(*id).unwrap();
            assert_eq!(ticket.status, TicketStatus::Closed);
            assert_eq!(ticket.game, Some(made.game));
        }
        assert!(tm.ticket_active(ids[2]));
        assert!(tm.find_match(&gm).is_empty());
    }

    #[test]
    fn test_find_match_never_pairs_a_user_with_themselves() {
        let tm = TicketManager::new();
        let gm = games();
        let a1 = tm.create_ticket(PlayerId::new(1)).id;
        let a2 = tm.create_ticket(PlayerId::new(1)).id;
        assert!(tm.find_match(&gm).is_empty());
        assert_eq!(tm.len(), 2);

        let b = tm.create_ticket(PlayerId::new(2)).id;
        let matches = tm.find_match(&gm);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].tickets, [a1, b]);
        assert_eq!(matches[0].players, [PlayerId::new(1), PlayerId::new(2)]);
        assert!(tm.ticket_active(a2));
        assert_eq!(gm.len(), 1);
    }

    #[test]
    fn test_find_match_drains_pairs() {
        let tm = TicketManager::new();
        let gm = games();
        for user in 0..6 {
            tm.create_ticket(PlayerId::new(user));
        }
        assert_eq!(tm.find_match(&gm).len(), 3);
        assert!(tm.is_empty());
        assert_eq!(gm.len(), 3);
    }
}
