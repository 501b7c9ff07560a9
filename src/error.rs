//! Error types for the CyberArena engine
//!
//! Only construction and loading failures are errors. Gameplay rejections
//! (not your turn, not enough mana, ...) are ordinary outcomes and live in
//! `game::outcome`.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArenaError {
    #[error("Invalid card: {0}")]
    InvalidCard(String),

    #[error("Invalid card library: {0}")]
    InvalidCatalog(String),

    #[error("Card {0} is not in the catalog")]
    CardNotInCatalog(u32),

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Task join error: {0}")]
    JoinError(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, ArenaError>;
