//! Game state, turn rules and the drivers around them

pub mod actions;
pub mod board;
pub mod controller;
pub mod game_loop;
pub mod logger;
pub mod manager;
pub mod outcome;
pub mod random_controller;
pub mod settings;
pub mod state;
pub mod zero_controller;

pub use actions::GameAction;
pub use board::{Board, BoardDeploy, Slot};
pub use controller::{GameView, PlayerController};
pub use game_loop::{GameEndReason, GameLoop, GameResult};
pub use logger::{GameLogger, LogEntry, OutputFormat, OutputMode, VerbosityLevel};
pub use manager::{GameManager, Routed, Unresolved};
pub use outcome::{AttackResult, DeployResult, DrawResult, NexusAttackResult, TurnResult};
pub use random_controller::RandomController;
pub use settings::GameSettings;
pub use state::Game;
pub use zero_controller::ZeroController;
