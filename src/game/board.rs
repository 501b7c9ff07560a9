//! The shared battlefield: two rows of deployed cards and two nexuses
//!
//! The board enforces capacity and the once-per-turn attack limit and
//! resolves combat. It knows nothing about whose turn it is; `Game` gates
//! access by turn before calling in.

use crate::core::{Boost, Card, CardId, Side};
use crate::game::outcome::{AttackResult, NexusAttackResult};
use smallvec::SmallVec;

/// A deployed card and whether it has attacked since its side's turn began
#[derive(Debug, Clone)]
pub struct Slot {
    pub card: Card,
    pub has_attacked: bool,
}

type Row = SmallVec<[Slot; 5]>;

/// Result of placing a card on the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardDeploy {
    Placed(CardId),
    /// The row is full; the card is handed back untouched
    Full(Card),
}

#[derive(Debug, Clone)]
pub struct Board {
    rows: [Row; 2],
    nexus: [i32; 2],
    capacity: usize,
}

impl Board {
    pub fn new(capacity: usize, nexus_health: i32) -> Self {
        Board {
            rows: [Row::new(), Row::new()],
            nexus: [nexus_health; 2],
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn has_room(&self, side: Side) -> bool {
        self.rows[side.index()].len() < self.capacity
    }

    pub fn len(&self, side: Side) -> usize {
        self.rows[side.index()].len()
    }

    pub fn is_empty(&self, side: Side) -> bool {
        self.rows[side.index()].is_empty()
    }

    pub fn nexus_health(&self, side: Side) -> i32 {
        self.nexus[side.index()]
    }

    pub fn slots(&self, side: Side) -> &[Slot] {
        &self.rows[side.index()]
    }

    pub fn card(&self, side: Side, id: CardId) -> Option<&Card> {
        self.slot(side, id).map(|slot| &slot.card)
    }

    pub fn card_at(&self, side: Side, index: usize) -> Option<&Card> {
        self.rows[side.index()].get(index).map(|slot| &slot.card)
    }

    pub fn has_attacked(&self, side: Side, id: CardId) -> Option<bool> {
        self.slot(side, id).map(|slot| slot.has_attacked)
    }

    fn slot(&self, side: Side, id: CardId) -> Option<&Slot> {
        self.rows[side.index()]
            .iter()
            .find(|slot| slot.card.id() == Some(id))
    }

    fn position(row: &Row, id: CardId) -> Option<usize> {
        row.iter().position(|slot| slot.card.id() == Some(id))
    }

    /// Mutable access to (own row, opposing row)
    fn rows_mut(&mut self, side: Side) -> (&mut Row, &mut Row) {
        let [one, two] = &mut self.rows;
        match side {
            Side::One => (one, two),
            Side::Two => (two, one),
        }
    }

    pub fn deploy_card(&mut self, card: Card, side: Side) -> BoardDeploy {
        if !self.has_room(side) {
            return BoardDeploy::Full(card);
        }
        let Some(id) = card.id() else {
            debug_assert!(false, "cards are given an id when they enter a hand");
            return BoardDeploy::Full(card);
        };
        self.rows[side.index()].push(Slot {
            card,
            has_attacked: false,
        });
        BoardDeploy::Placed(id)
    }

    /// Card `attacker` on `side` attacks card `defender` on the opposite side
    pub fn attack_card(&mut self, attacker: CardId, defender: CardId, side: Side) -> AttackResult {
        let (own, enemy) = self.rows_mut(side);
        let Some(a) = Self::position(own, attacker) else {
            return AttackResult::AttackerNotFound;
        };
        let Some(d) = Self::position(enemy, defender) else {
            return AttackResult::DefenderNotFound;
        };
        if own[a].has_attacked {
            return AttackResult::AlreadyAttacked;
        }

        own[a].card.attack(&mut enemy[d].card);
        own[a].card.collapse();
        enemy[d].card.collapse();
        own[a].has_attacked = true;

        let defender_destroyed = !enemy[d].card.is_alive();
        if defender_destroyed {
            enemy.remove(d);
        }
        let attacker_destroyed = !own[a].card.is_alive();
        if attacker_destroyed {
            own.remove(a);
        }
        AttackResult::Resolved {
            defender_destroyed,
            attacker_destroyed,
        }
    }

    /// A card on the side opposite `defender_side` hits that side's nexus
    ///
    /// Nexus damage ignores defense and may leave the nexus below zero.
    pub fn attack_nexus(&mut self, attacker: CardId, defender_side: Side) -> NexusAttackResult {
        let row = &mut self.rows[defender_side.opposite().index()];
        let Some(a) = Self::position(row, attacker) else {
            return NexusAttackResult::AttackerNotFound;
        };
        if row[a].has_attacked {
            return NexusAttackResult::AlreadyAttacked;
        }
        let damage = row[a].card.ap();
        row[a].has_attacked = true;
        let nexus = &mut self.nexus[defender_side.index()];
        *nexus -= damage;
        NexusAttackResult::Hit {
            damage,
            remaining: *nexus,
        }
    }

    /// Close `ending_side`'s turn: the other side's cards tick their boosts
    /// and may attack again
    pub fn end_turn(&mut self, ending_side: Side) {
        for slot in self.rows[ending_side.opposite().index()].iter_mut() {
            slot.card.end_turn();
            slot.card.collapse();
            slot.has_attacked = false;
        }
    }

    /// Apply a boost to a deployed card; false if the card is not there
    pub fn boost_card(&mut self, side: Side, id: CardId, boost: Boost) -> bool {
        let row = &mut self.rows[side.index()];
        match Self::position(row, id) {
            Some(index) => {
                row[index].card.boost(boost);
                row[index].card.collapse();
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(side: Side, seq: u32, hp: i32, ap: i32, dp: i32) -> Card {
        let mut card = Card::new("unit", 1, hp, ap, dp).unwrap();
        card.set_id(CardId::new(side, seq));
        card
    }

    #[test]
    fn test_capacity_hands_card_back() {
        let mut board = Board::new(5, 20);
        for seq in 0..5 {
            assert!(matches!(
                board.deploy_card(card(Side::One, seq, 1, 1, 0), Side::One),
                BoardDeploy::Placed(_)
            ));
        }
        let extra = card(Side::One, 5, 1, 1, 0);
        assert_eq!(board.deploy_card(extra.clone(), Side::One), BoardDeploy::Full(extra));
        assert_eq!(board.len(Side::One), 5);

        for seq in 0..5 {
            board.deploy_card(card(Side::Two, seq, 1, 1, 0), Side::Two);
        }
        assert_eq!(board.len(Side::One) + board.len(Side::Two), 10);
    }

    #[test]
    fn test_attack_destroys_defender_and_flags_attacker() {
        let mut board = Board::new(5, 20);
        let a = CardId::new(Side::One, 0);
        let d = CardId::new(Side::Two, 0);
        board.deploy_card(card(Side::One, 0, 3, 4, 0), Side::One);
        board.deploy_card(card(Side::Two, 0, 2, 1, 1), Side::Two);

        let result = board.attack_card(a, d, Side::One);
        assert_eq!(
            result,
            AttackResult::Resolved {
                defender_destroyed: true,
                attacker_destroyed: false
            }
        );
        assert!(board.card(Side::Two, d).is_none());
        assert_eq!(board.has_attacked(Side::One, a), Some(true));
    }

    #[test]
    fn test_attack_once_per_turn() {
        let mut board = Board::new(5, 20);
        let a = CardId::new(Side::One, 0);
        let d = CardId::new(Side::Two, 0);
        board.deploy_card(card(Side::One, 0, 3, 1, 0), Side::One);
        board.deploy_card(card(Side::Two, 0, 10, 1, 0), Side::Two);

        assert!(matches!(board.attack_card(a, d, Side::One), AttackResult::Resolved { .. }));
        assert_eq!(board.attack_card(a, d, Side::One), AttackResult::AlreadyAttacked);
        assert_eq!(board.attack_nexus(a, Side::Two), NexusAttackResult::AlreadyAttacked);
        assert_eq!(board.card(Side::Two, d).unwrap().hp(), 9);

        // side two's turn ends, side one's begins
        board.end_turn(Side::Two);
        assert!(matches!(board.attack_card(a, d, Side::One), AttackResult::Resolved { .. }));
    }

    #[test]
    fn test_attack_lookup_failures() {
        let mut board = Board::new(5, 20);
        let a = CardId::new(Side::One, 0);
        board.deploy_card(card(Side::One, 0, 3, 1, 0), Side::One);
        assert_eq!(
            board.attack_card(CardId::new(Side::One, 9), a, Side::One),
            AttackResult::AttackerNotFound
        );
        assert_eq!(
            board.attack_card(a, CardId::new(Side::Two, 0), Side::One),
            AttackResult::DefenderNotFound
        );
        assert_eq!(board.has_attacked(Side::One, a), Some(false));
    }

    #[test]
    fn test_nexus_damage_ignores_defense() {
        let mut board = Board::new(5, 20);
        let a = CardId::new(Side::Two, 0);
        board.deploy_card(card(Side::Two, 0, 1, 25, 0), Side::Two);
        assert_eq!(
            board.attack_nexus(a, Side::One),
            NexusAttackResult::Hit {
                damage: 25,
                remaining: -5
            }
        );
        assert_eq!(board.nexus_health(Side::One), -5);
        assert_eq!(board.nexus_health(Side::Two), 20);
        // the attacker must sit on the side opposite the nexus
        assert_eq!(board.attack_nexus(a, Side::Two), NexusAttackResult::AttackerNotFound);
    }

    #[test]
    fn test_end_turn_expires_boosts_of_starting_side() {
        let mut board = Board::new(5, 20);
        let id = CardId::new(Side::One, 0);
        board.deploy_card(card(Side::One, 0, 1, 1, 0), Side::One);
        assert!(board.boost_card(Side::One, id, Boost::temporary_turn_attack(10, 1)));
        assert_eq!(board.card(Side::One, id).unwrap().ap(), 11);

        board.end_turn(Side::One);
        assert_eq!(board.card(Side::One, id).unwrap().ap(), 11);

        board.end_turn(Side::Two);
        let card = board.card(Side::One, id).unwrap();
        assert_eq!(card.ap(), 1);
        assert_eq!(card.boost_depth(), 0);
        assert!(!board.boost_card(Side::Two, id, Boost::health(1)));
    }

    #[test]
    fn test_card_at_index() {
        let mut board = Board::new(2, 20);
        board.deploy_card(card(Side::Two, 3, 1, 1, 0), Side::Two);
        assert_eq!(board.card_at(Side::Two, 0).unwrap().id(), Some(CardId::new(Side::Two, 3)));
        assert!(board.card_at(Side::Two, 1).is_none());
    }
}
