//! The card library every deck is built from
//!
//! The catalog is read-only once built. It is constructed at startup (either
//! from the built-in card set or from a card library directory) and shared
//! through an `Arc` with whatever creates games.

use crate::core::{BaseCard, Card, Race, Rarity};
use crate::loader::card::{with_path, CardDefinition};
use crate::zones::Deck;
use crate::{ArenaError, Result};
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::time::Instant;

/// Name of the data file inside each card folder
pub const CARD_DATA_FILE: &str = "data.json";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardCatalog {
    cards: BTreeMap<u32, BaseCard>,
}

impl CardCatalog {
    /// Build a catalog, rejecting duplicate ids
    ///
    /// Duplicate names are allowed but reported, matching names after
    /// unicode folding and case normalization.
    pub fn from_cards(cards: impl IntoIterator<Item = BaseCard>) -> Result<Self> {
        let mut by_id = BTreeMap::new();
        let mut names: FxHashMap<String, u32> = FxHashMap::default();
        for card in cards {
            let id = card.catalog_id();
            let folded = deunicode::deunicode(card.name()).to_lowercase();
            if let Some(previous) = names.insert(folded, id) {
                eprintln!(
                    "Warning: card name '{}' is used by both card {previous} and card {id}",
                    card.name()
                );
            }
            if by_id.insert(id, card).is_some() {
                return Err(ArenaError::InvalidCatalog(format!("duplicate card id {id}")));
            }
        }
        Ok(CardCatalog { cards: by_id })
    }

    /// The stock CyberArena card set
    pub fn builtin() -> Self {
        let cards = BUILTIN_CARDS
            .iter()
            .filter_map(|&(id, name, cost, hp, ap, dp, rarity, race, description)| {
                BaseCard::new(name, cost, hp, ap, dp).ok().map(|card| {
                    card.with_catalog_id(id)
                        .with_rarity(Rarity::from(rarity))
                        .with_race(Race::from(race))
                        .with_description(description)
                })
            })
            .map(|card| (card.catalog_id(), card))
            .collect();
        CardCatalog { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&BaseCard> {
        self.cards.get(&id)
    }

    /// Fresh, undamaged copy of catalog card `id`
    pub fn get_card_from_id(&self, id: u32) -> Result<Card> {
        self.cards
            .get(&id)
            .cloned()
            .map(Card::from)
            .ok_or(ArenaError::CardNotInCatalog(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &BaseCard> {
        self.cards.values()
    }

    /// `copies` of every catalog card, shuffled once with `rng`
    pub fn create_deck(&self, rng: &mut impl rand::Rng, copies: usize) -> Deck {
        let cards = self
            .cards
            .values()
            .flat_map(|card| std::iter::repeat(card).take(copies))
            .map(|card| Card::from(card.clone()))
            .collect();
        Deck::shuffled(cards, rng)
    }

    /// Load every `<folder>/data.json` below `dir`
    ///
    /// Folders are discovered with a parallel directory walk and the files
    /// are read and parsed concurrently. Any invalid file fails the whole
    /// load. Returns the catalog and the time spent.
    pub async fn load_dir(dir: &Path) -> Result<(CardCatalog, Duration)> {
        let start = Instant::now();
        if !dir.is_dir() {
            return Err(ArenaError::InvalidCatalog(format!(
                "card library path is not a directory: {}",
                dir.display()
            )));
        }

        let root = dir.to_path_buf();
        let paths = tokio::task::spawn_blocking(move || discover_card_files(&root)).await??;

        let mut tasks = Vec::with_capacity(paths.len());
        for path in paths {
            tasks.push(tokio::spawn(async move {
                let content = tokio::fs::read_to_string(&path).await?;
                let card = CardDefinition::parse(&content)
                    .and_then(CardDefinition::into_card)
                    .map_err(|e| with_path(e, &path))?;
                Ok::<BaseCard, ArenaError>(card)
            }));
        }

        let mut cards = Vec::with_capacity(tasks.len());
        for task in tasks {
            cards.push(task.await??);
        }
        let catalog = CardCatalog::from_cards(cards)?;
        if catalog.is_empty() {
            return Err(ArenaError::InvalidCatalog(format!(
                "no {CARD_DATA_FILE} files found in {}",
                dir.display()
            )));
        }
        Ok((catalog, start.elapsed()))
    }
}

fn discover_card_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in jwalk::WalkDir::new(root).sort(true) {
        let entry = entry.map_err(|e| ArenaError::InvalidCatalog(format!("walking card library: {e}")))?;
        if entry.file_type().is_file() && entry.file_name() == CARD_DATA_FILE {
            paths.push(entry.path());
        }
    }
    Ok(paths)
}

/// (id, name, cost, hp, ap, dp, rarity, race, description)
type BuiltinCard = (u32, &'static str, i32, i32, i32, i32, &'static str, &'static str, &'static str);

const BUILTIN_CARDS: [BuiltinCard; 13] = [
    (1, "Cyber-Heisenberg", 1, 1, 1, 1, "common", "chemist", "Walter White en personne"),
    (2, "Neon Runner", 1, 2, 1, 0, "common", "human", "Delivers anything, anywhere, before the cops do."),
    (3, "Script Kiddie", 2, 2, 2, 0, "common", "hacker", "Copy, paste, pwn."),
    (4, "Firewall Golem", 3, 5, 1, 3, "rare", "construct", "Nothing gets through. Nothing gets out."),
    (5, "Street Samurai", 3, 3, 3, 1, "rare", "human", "Chrome blade, paper honor."),
    (6, "Data Wraith", 2, 1, 3, 0, "common", "ghost", "A deleted user who refused to leave."),
    (7, "Chrome Medic", 2, 3, 1, 1, "common", "android", "Patches flesh and firmware alike."),
    (8, "Black ICE", 4, 4, 4, 2, "epic", "program", "Intrusion countermeasure. Lethal by design."),
    (9, "Netrunner Queen", 5, 5, 5, 1, "epic", "hacker", "Rules the net from a bathtub of ice."),
    (10, "Riot Drone", 3, 4, 2, 2, "common", "drone", "Crowd control, now with extra crowd."),
    (11, "Corpo Enforcer", 4, 6, 3, 1, "rare", "human", "Your contract has been terminated."),
    (12, "Glitch Phantom", 1, 1, 2, 0, "common", "ghost", "Now you see it. Now you segfault."),
    (13, "Singularity Core", 7, 8, 7, 3, "legendary", "ai", "The last thing humanity compiled."),
];
