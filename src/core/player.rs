//! Player state: zones, mana economy and card id allocation

use crate::core::{Card, CardId, PlayerId, Side};
use crate::game::GameSettings;
use crate::zones::{Deck, Hand, HandTake};

#[derive(Debug, Clone)]
pub struct Player {
    pub id: PlayerId,
    pub side: Side,
    hand: Hand,
    deck: Deck,
    mana: i32,
    /// Mana refilled at the start of each of this player's turns
    mana_cap: i32,
    mana_max: i32,
    mana_increment: i32,
    next_card_seq: u32,
}

impl Player {
    pub fn new(id: PlayerId, side: Side, deck: Deck, settings: &GameSettings) -> Self {
        Player {
            id,
            side,
            hand: Hand::new(),
            deck,
            mana: settings.starting_mana,
            mana_cap: settings.starting_mana,
            mana_max: settings.mana_max,
            mana_increment: settings.mana_increment,
            next_card_seq: 0,
        }
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn mana(&self) -> i32 {
        self.mana
    }

    pub fn mana_cap(&self) -> i32 {
        self.mana_cap
    }

    pub fn mana_max(&self) -> i32 {
        self.mana_max
    }

    fn next_card_id(&self) -> CardId {
        CardId::new(self.side, self.next_card_seq)
    }

    /// Draw the top card of the deck into the hand
    ///
    /// The id counter only advances when a card was actually drawn.
    pub fn draw_card(&mut self) -> Option<CardId> {
        let id = self.next_card_id();
        let id = self.hand.draw_from(&mut self.deck, id)?;
        self.next_card_seq += 1;
        Some(id)
    }

    /// Put a card straight into the hand (debug/test helper)
    pub fn cheat_add_card_to_hand(&mut self, card: Card) -> CardId {
        let id = self.next_card_id();
        let id = self.hand.insert(card, id);
        self.next_card_seq += 1;
        id
    }

    /// Play the card with `id` from hand, paying its cost on success
    pub fn use_card(&mut self, id: CardId) -> HandTake {
        let taken = self.hand.take(id, self.mana);
        self.pay_for(&taken);
        taken
    }

    /// Play the card at `index` in hand, paying its cost on success
    pub fn use_card_at(&mut self, index: usize) -> HandTake {
        let taken = self.hand.take_at(index, self.mana);
        self.pay_for(&taken);
        taken
    }

    fn pay_for(&mut self, taken: &HandTake) {
        if let HandTake::Taken(card) = taken {
            self.mana -= card.cost();
        }
    }

    /// Give back a card that was taken but could not be placed, refunding it
    pub fn refund_card(&mut self, index: usize, card: Card) {
        self.mana += card.cost();
        self.hand.restore(index, card);
    }

    /// Start-of-turn mana refresh: grow the cap toward the maximum, then refill
    pub fn next_turn(&mut self) {
        if self.mana_cap < self.mana_max {
            self.mana_cap = (self.mana_cap + self.mana_increment).min(self.mana_max);
        }
        self.mana = self.mana_cap;
    }
}
