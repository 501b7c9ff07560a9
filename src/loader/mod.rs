//! Card library loading
//!
//! Parses `data.json` card definitions and assembles them into the
//! read-only catalog decks are built from.

pub mod card;
pub mod catalog;

pub use card::CardDefinition;
pub use catalog::{CardCatalog, CARD_DATA_FILE};
