//! Game rule configuration
//!
//! Values come from `Default`, a JSON file, or `GAME_MODULE_*` environment
//! variables layered on top of either.

use crate::{ArenaError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Prefix of the environment variables read by [`GameSettings::apply_env`]
pub const ENV_PREFIX: &str = "GAME_MODULE_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Copies of every catalog card in a fresh deck
    pub deck_copies: usize,
    /// Maximum cards deployed per board side
    pub board_size: usize,
    pub nexus_health: i32,
    pub starting_mana: i32,
    pub mana_increment: i32,
    pub mana_max: i32,
    /// Cards each player draws once both players are connected
    pub starting_hand: usize,
}

impl Default for GameSettings {
    fn default() -> Self {
        GameSettings {
            deck_copies: 2,
            board_size: 5,
            nexus_health: 20,
            starting_mana: 5,
            mana_increment: 1,
            mana_max: 10,
            starting_hand: 3,
        }
    }
}

impl GameSettings {
    /// Load settings from a JSON file; missing fields keep their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: GameSettings = serde_json::from_str(&content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Defaults overridden by the process environment
    pub fn from_env() -> Result<Self> {
        let mut settings = GameSettings::default();
        settings.apply_env(|key| std::env::var(key).ok())?;
        Ok(settings)
    }

    /// Override fields from `GAME_MODULE_<FIELD>` variables
    ///
    /// `lookup` is the environment accessor, so tests can pass a map.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        fn parse<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T> {
            raw.trim().parse().map_err(|_| {
                ArenaError::InvalidSettings(format!("{key}={raw:?} is not a valid number"))
            })
        }

        let var = |field: &str| {
            let key = format!("{ENV_PREFIX}{}", field.to_uppercase());
            lookup(&key).map(|raw| (key, raw))
        };

        if let Some((key, raw)) = var("deck_copies") {
            self.deck_copies = parse(&key, &raw)?;
        }
        if let Some((key, raw)) = var("board_size") {
            self.board_size = parse(&key, &raw)?;
        }
        if let Some((key, raw)) = var("nexus_health") {
            self.nexus_health = parse(&key, &raw)?;
        }
        if let Some((key, raw)) = var("starting_mana") {
            self.starting_mana = parse(&key, &raw)?;
        }
        if let Some((key, raw)) = var("mana_increment") {
            self.mana_increment = parse(&key, &raw)?;
        }
        if let Some((key, raw)) = var("mana_max") {
            self.mana_max = parse(&key, &raw)?;
        }
        if let Some((key, raw)) = var("starting_hand") {
            self.starting_hand = parse(&key, &raw)?;
        }
        self.validate()
    }

    pub fn validate(&self) -> Result<()> {
        if self.board_size == 0 {
            return Err(ArenaError::InvalidSettings("board_size must be at least 1".to_string()));
        }
        if self.nexus_health <= 0 {
            return Err(ArenaError::InvalidSettings("nexus_health must be positive".to_string()));
        }
        if self.starting_mana < 0 || self.mana_increment < 0 {
            return Err(ArenaError::InvalidSettings(
                "mana values must not be negative".to_string(),
            ));
        }
        if self.mana_max < self.starting_mana {
            return Err(ArenaError::InvalidSettings(format!(
                "mana_max ({}) is below starting_mana ({})",
                self.mana_max, self.starting_mana
            )));
        }
        Ok(())
    }
}
