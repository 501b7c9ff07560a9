//! CyberArena - a two-player card battle engine
//!
//! Players queue through matchmaking tickets, get paired into games, and
//! fight with decks drawn from a shared card catalog. Cards can be wrapped in
//! boosts that change their stats and soak damage until they wear off.

pub mod core;
pub mod game;
pub mod zones;
pub mod loader;
pub mod matchmaking;
pub mod protocol;
pub mod session;
pub mod simulation;
pub mod error;

pub use error::{ArenaError, Result};
