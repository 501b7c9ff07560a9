//! Card zones owned by a player (Deck and Hand)
//!
//! A card lives in exactly one zone at a time. Moving a card between zones
//! moves the value; nothing is ever copied.

use crate::core::{Card, CardId};
use rand::seq::SliceRandom;

/// Shuffled draw pile, consumed from the back
#[derive(Debug, Clone, Default)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Build a deck in the given order (top of the deck is the last card)
    pub fn new(cards: Vec<Card>) -> Self {
        Deck { cards }
    }

    /// Build a deck and shuffle it once with the provided RNG
    pub fn shuffled(mut cards: Vec<Card>, rng: &mut impl rand::Rng) -> Self {
        cards.shuffle(rng);
        Deck { cards }
    }

    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    pub fn peek_top(&self) -> Option<&Card> {
        self.cards.last()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Outcome of trying to take a card out of a hand to play it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandTake {
    Taken(Card),
    TooExpensive { cost: i32, mana: i32 },
    NotInHand,
}

/// Cards drawn but not yet played, in draw order
#[derive(Debug, Clone, Default)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Hand { cards: Vec::new() }
    }

    /// Draw the top card of `deck`, stamp it with `id` and keep it
    ///
    /// Returns the id on success, `None` when the deck is exhausted.
    pub fn draw_from(&mut self, deck: &mut Deck, id: CardId) -> Option<CardId> {
        let card = deck.draw()?;
        Some(self.insert(card, id))
    }

    /// Add an arbitrary card with the given id
    pub fn insert(&mut self, mut card: Card, id: CardId) -> CardId {
        card.set_id(id);
        self.cards.push(card);
        id
    }

    /// Remove the card with `id` if its cost fits in `mana`
    pub fn take(&mut self, id: CardId, mana: i32) -> HandTake {
        match self.position(id) {
            Some(index) => self.take_at(index, mana),
            None => HandTake::NotInHand,
        }
    }

    /// Remove the card at `index` if its cost fits in `mana`
    pub fn take_at(&mut self, index: usize, mana: i32) -> HandTake {
        let Some(card) = self.cards.get(index) else {
            return HandTake::NotInHand;
        };
        if card.cost() > mana {
            return HandTake::TooExpensive {
                cost: card.cost(),
                mana,
            };
        }
        HandTake::Taken(self.cards.remove(index))
    }

    /// Put a card back where it was after a failed play
    pub fn restore(&mut self, index: usize, card: Card) {
        let index = index.min(self.cards.len());
        self.cards.insert(index, card);
    }

    pub fn position(&self, id: CardId) -> Option<usize> {
        self.cards.iter().position(|card| card.id() == Some(id))
    }

    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|card| card.id() == Some(id))
    }

    pub fn get_at(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Card> {
        self.cards.iter()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
