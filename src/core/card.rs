//! Card definitions and combat arithmetic

use crate::core::{Boost, CardId, CardKind, Race, Rarity};
use crate::{ArenaError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Undecorated card as it comes out of the card library
///
/// Stats are validated once at construction and never clamped afterwards:
/// `hp` keeps going down (possibly below zero) as damage lands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseCard {
    id: Option<CardId>,
    catalog_id: u32,
    name: String,
    description: String,
    cost: i32,
    hp: i32,
    ap: i32,
    dp: i32,
    rarity: Rarity,
    race: Race,
    kind: CardKind,
}

impl BaseCard {
    /// Create a character card, rejecting negative stats and empty names
    pub fn new(name: impl Into<String>, cost: i32, hp: i32, ap: i32, dp: i32) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ArenaError::InvalidCard("card name must not be empty".to_string()));
        }
        for (stat, value) in [("cost", cost), ("hp", hp), ("ap", ap), ("dp", dp)] {
            if value < 0 {
                return Err(ArenaError::InvalidCard(format!(
                    "'{name}' has negative {stat} ({value})"
                )));
            }
        }
        Ok(BaseCard {
            id: None,
            catalog_id: 0,
            name,
            description: String::new(),
            cost,
            hp,
            ap,
            dp,
            rarity: Rarity::new("common"),
            race: Race::new("human"),
            kind: CardKind::Character,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_catalog_id(mut self, catalog_id: u32) -> Self {
        self.catalog_id = catalog_id;
        self
    }

    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    pub fn with_race(mut self, race: Race) -> Self {
        self.race = race;
        self
    }

    pub fn with_kind(mut self, kind: CardKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn id(&self) -> Option<CardId> {
        self.id
    }

    pub fn catalog_id(&self) -> u32 {
        self.catalog_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn cost(&self) -> i32 {
        self.cost
    }

    pub fn hp(&self) -> i32 {
        self.hp
    }

    pub fn ap(&self) -> i32 {
        self.ap
    }

    pub fn dp(&self) -> i32 {
        self.dp
    }

    pub fn rarity(&self) -> &Rarity {
        &self.rarity
    }

    pub fn race(&self) -> &Race {
        &self.race
    }

    pub fn kind(&self) -> CardKind {
        self.kind
    }

    /// Damage only gets through when it is strictly greater than defense
    fn receive_damage(&mut self, damage: i32) {
        if damage > self.dp {
            self.hp -= damage - self.dp;
        }
    }

    /// Stand-in left behind while a boost layer is being unwrapped
    fn vacant() -> Self {
        BaseCard {
            id: None,
            catalog_id: 0,
            name: String::new(),
            description: String::new(),
            cost: 0,
            hp: 0,
            ap: 0,
            dp: 0,
            rarity: Rarity::new(String::new()),
            race: Race::new(String::new()),
            kind: CardKind::Character,
        }
    }
}

/// A card in play: a base card optionally wrapped in boost layers
///
/// The outermost layer is the most recently applied boost and intercepts
/// damage first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Card {
    Base(BaseCard),
    Boosted { boost: Boost, inner: Box<Card> },
}

impl Card {
    pub fn new(name: impl Into<String>, cost: i32, hp: i32, ap: i32, dp: i32) -> Result<Self> {
        Ok(Card::Base(BaseCard::new(name, cost, hp, ap, dp)?))
    }

    /// The undecorated card at the bottom of the boost chain
    pub fn base(&self) -> &BaseCard {
        match self {
            Card::Base(base) => base,
            Card::Boosted { inner, .. } => inner.base(),
        }
    }

    fn base_mut(&mut self) -> &mut BaseCard {
        match self {
            Card::Base(base) => base,
            Card::Boosted { inner, .. } => inner.base_mut(),
        }
    }

    pub fn id(&self) -> Option<CardId> {
        self.base().id
    }

    pub fn set_id(&mut self, id: CardId) {
        self.base_mut().id = Some(id);
    }

    pub fn name(&self) -> &str {
        self.base().name()
    }

    pub fn cost(&self) -> i32 {
        self.base().cost()
    }

    pub fn hp(&self) -> i32 {
        match self {
            Card::Base(base) => base.hp,
            Card::Boosted { boost, inner } => inner.hp() + boost.hp_bonus(),
        }
    }

    pub fn ap(&self) -> i32 {
        match self {
            Card::Base(base) => base.ap,
            Card::Boosted { boost, inner } => inner.ap() + boost.ap_bonus(),
        }
    }

    pub fn dp(&self) -> i32 {
        match self {
            Card::Base(base) => base.dp,
            Card::Boosted { boost, inner } => inner.dp() + boost.dp_bonus(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp() > 0
    }

    /// Number of boost layers currently wrapping the base card
    pub fn boost_depth(&self) -> usize {
        match self {
            Card::Base(_) => 0,
            Card::Boosted { inner, .. } => 1 + inner.boost_depth(),
        }
    }

    /// Deal this card's effective attack to `target`
    pub fn attack(&self, target: &mut Card) {
        target.receive_damage(self.ap());
    }

    pub fn receive_damage(&mut self, damage: i32) {
        match self {
            Card::Base(base) => base.receive_damage(damage),
            Card::Boosted { boost, inner } => {
                let forwarded = boost.absorb(damage);
                inner.receive_damage(forwarded);
            }
        }
    }

    /// Advance every turn-limited boost in the chain by one turn
    pub fn end_turn(&mut self) {
        if let Card::Boosted { boost, inner } = self {
            boost.end_turn();
            inner.end_turn();
        }
    }

    /// Wrap this card in a new outermost boost
    pub fn boost(&mut self, boost: Boost) {
        let inner = std::mem::replace(self, Card::Base(BaseCard::vacant()));
        *self = Card::Boosted {
            boost,
            inner: Box::new(inner),
        };
    }

    /// Strip every expired boost layer anywhere in the chain
    pub fn collapse(&mut self) {
        if let Card::Boosted { inner, .. } = self {
            inner.collapse();
        }
        let expired = matches!(self, Card::Boosted { boost, .. } if boost.is_expired());
        if expired {
            let vacated = std::mem::replace(self, Card::Base(BaseCard::vacant()));
            if let Card::Boosted { inner, .. } = vacated {
                *self = *inner;
            }
        }
    }

    pub fn view(&self) -> CardView {
        let base = self.base();
        CardView {
            id: base.id,
            catalog_id: base.catalog_id,
            name: base.name.clone(),
            description: base.description.clone(),
            cost: base.cost,
            hp: self.hp(),
            ap: self.ap(),
            dp: self.dp(),
            rarity: base.rarity.clone(),
            race: base.race.clone(),
            boosts: self.boost_depth(),
        }
    }
}

impl From<BaseCard> for Card {
    fn from(base: BaseCard) -> Self {
        Card::Base(base)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}/{}/{}, cost {})",
            self.name(),
            self.hp(),
            self.ap(),
            self.dp(),
            self.cost()
        )
    }
}

/// Snapshot of a card's effective stats, as reported to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardView {
    pub id: Option<CardId>,
    pub catalog_id: u32,
    pub name: String,
    pub description: String,
    pub cost: i32,
    pub hp: i32,
    pub ap: i32,
    pub dp: i32,
    pub rarity: Rarity,
    pub race: Race,
    pub boosts: usize,
}
