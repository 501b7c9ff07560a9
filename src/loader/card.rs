//! Card data file loader (`data.json`)
//!
//! Every card of the library lives in its own folder with a `data.json`
//! describing it:
//!
//! ```json
//! { "id": 1, "name": "Cyber-Heisenberg", "description": "...",
//!   "type": "chemist", "rarity": "common", "card_type": "character",
//!   "cost": 1, "hp": 1, "ap": 1, "dp": 1 }
//! ```

use crate::core::{BaseCard, CardKind, Race, Rarity};
use crate::{ArenaError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Raw card definition as stored on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Race of the card; named `type` in the data files
    #[serde(rename = "type")]
    pub race: String,
    pub rarity: String,
    #[serde(default)]
    pub card_type: CardKind,
    pub cost: i32,
    pub hp: i32,
    pub ap: i32,
    pub dp: i32,
}

impl CardDefinition {
    pub fn parse(content: &str) -> Result<Self> {
        let definition: CardDefinition = serde_json::from_str(content)?;
        Ok(definition)
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content).map_err(|e| with_path(e, path))
    }

    /// Validate the definition and build the card it describes
    pub fn into_card(self) -> Result<BaseCard> {
        if self.race.trim().is_empty() {
            return Err(ArenaError::InvalidCard(format!("'{}' has an empty type", self.name)));
        }
        if self.rarity.trim().is_empty() {
            return Err(ArenaError::InvalidCard(format!("'{}' has an empty rarity", self.name)));
        }
        Ok(BaseCard::new(self.name, self.cost, self.hp, self.ap, self.dp)?
            .with_catalog_id(self.id)
            .with_description(self.description)
            .with_race(Race::new(self.race))
            .with_rarity(Rarity::new(self.rarity))
            .with_kind(self.card_type))
    }

    pub fn from_card(card: &BaseCard) -> Self {
        CardDefinition {
            id: card.catalog_id(),
            name: card.name().to_string(),
            description: card.description().to_string(),
            race: card.race().to_string(),
            rarity: card.rarity().to_string(),
            card_type: card.kind(),
            cost: card.cost(),
            hp: card.hp(),
            ap: card.ap(),
            dp: card.dp(),
        }
    }
}

/// Attach the offending file to a parse or validation error
pub(crate) fn with_path(err: ArenaError, path: &Path) -> ArenaError {
    match err {
        ArenaError::IoError(e) => ArenaError::IoError(e),
        other => ArenaError::InvalidCatalog(format!("{}: {other}", path.display())),
    }
}
