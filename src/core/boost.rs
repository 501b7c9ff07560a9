//! Stat boosts layered on top of a card
//!
//! A boost modifies one stat accessor and may intercept incoming damage
//! before the rest is forwarded to the card underneath. Boosts that have
//! run out are stripped by `Card::collapse`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Boost {
    /// Separate hit point pool drained before the card's own hp
    Health { pool: i32 },
    /// Flat defense bonus that never decays on its own
    Defense { dp: i32 },
    /// Defense bonus that wears down by the raw damage of every hit
    TemporaryHitDefense { dp: i32 },
    /// Defense bonus lasting a number of turns
    TemporaryTurnDefense { dp: i32, turns: u32 },
    /// Attack bonus lasting a number of turns
    TemporaryTurnAttack { ap: i32, turns: u32 },
}

impl Boost {
    pub fn health(pool: i32) -> Self {
        Boost::Health { pool }
    }

    pub fn defense(dp: i32) -> Self {
        Boost::Defense { dp }
    }

    pub fn temporary_hit_defense(dp: i32) -> Self {
        Boost::TemporaryHitDefense { dp }
    }

    pub fn temporary_turn_defense(dp: i32, turns: u32) -> Self {
        Boost::TemporaryTurnDefense { dp, turns }
    }

    pub fn temporary_turn_attack(ap: i32, turns: u32) -> Self {
        Boost::TemporaryTurnAttack { ap, turns }
    }

    pub fn hp_bonus(&self) -> i32 {
        match *self {
            Boost::Health { pool } => pool,
            _ => 0,
        }
    }

    pub fn ap_bonus(&self) -> i32 {
        match *self {
            Boost::TemporaryTurnAttack { ap, .. } => ap,
            _ => 0,
        }
    }

    pub fn dp_bonus(&self) -> i32 {
        match *self {
            Boost::Defense { dp }
            | Boost::TemporaryHitDefense { dp }
            | Boost::TemporaryTurnDefense { dp, .. } => dp,
            _ => 0,
        }
    }

    /// Intercept `damage` and return how much reaches the wrapped card
    pub fn absorb(&mut self, damage: i32) -> i32 {
        match self {
            Boost::Health { pool } => {
                *pool -= damage;
                if *pool < 0 {
                    let overflow = -*pool;
                    *pool = 0;
                    overflow
                } else {
                    0
                }
            }
            Boost::Defense { dp } | Boost::TemporaryTurnDefense { dp, .. } => (damage - *dp).max(0),
            Boost::TemporaryHitDefense { dp } => {
                let forwarded = (damage - *dp).max(0);
                *dp = (*dp - damage).max(0);
                forwarded
            }
            Boost::TemporaryTurnAttack { .. } => damage,
        }
    }

    /// Count down turn-limited boosts; an elapsed boost drops to zero
    pub fn end_turn(&mut self) {
        match self {
            Boost::TemporaryTurnDefense { dp: value, turns }
            | Boost::TemporaryTurnAttack { ap: value, turns } => {
                *turns = turns.saturating_sub(1);
                if *turns == 0 {
                    *value = 0;
                }
            }
            _ => {}
        }
    }

    /// An expired boost no longer changes anything and must be stripped
    pub fn is_expired(&self) -> bool {
        match *self {
            Boost::Health { pool } => pool <= 0,
            Boost::Defense { dp }
            | Boost::TemporaryHitDefense { dp }
            | Boost::TemporaryTurnDefense { dp, .. } => dp <= 0,
            Boost::TemporaryTurnAttack { ap, .. } => ap <= 0,
        }
    }
}
