//! Simulation mode: run many bot games in parallel and collect statistics
//!
//! Every game goes through the same path a real match does. Two players
//! open tickets, the matchmaker pairs open tickets into games, and the
//! paired game is played out under its lock. Workers run on rayon, so
//! matchmaking and play happen concurrently across games.

use crate::core::{GameId, PlayerId};
use crate::game::{
    GameEndReason, GameLoop, GameManager, PlayerController, RandomController, ZeroController,
};
use crate::matchmaking::{MatchMade, OpenTicket, TicketManager};
use rand::{RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use rayon::prelude::*;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Bot type driving one seat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerType {
    Zero,
    Random,
}

#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub games: usize,
    pub seed: Option<u64>,
    pub p1: ControllerType,
    pub p2: ControllerType,
    pub max_turns: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            games: 100,
            seed: None,
            p1: ControllerType::Random,
            p2: ControllerType::Random,
            max_turns: 200,
        }
    }
}

/// Statistics collected across a simulation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimulationStats {
    pub games_played: usize,
    /// Wins by the player seated first (who moves on turn 1)
    pub p1_wins: usize,
    pub p2_wins: usize,
    /// Games stopped by the turn limit
    pub draws: usize,
    pub total_turns: u64,
    pub total_actions: u64,
    pub tickets_opened: usize,
}

impl SimulationStats {
    pub fn average_turns(&self) -> f64 {
        if self.games_played == 0 {
            0.0
        } else {
            self.total_turns as f64 / self.games_played as f64
        }
    }
}

#[derive(Debug, Clone)]
pub struct SimulationReport {
    pub stats: SimulationStats,
    pub elapsed: Duration,
}

fn controller(kind: ControllerType, player: PlayerId, seed: u64) -> Box<dyn PlayerController> {
    match kind {
        ControllerType::Zero => Box::new(ZeroController::new(player)),
        ControllerType::Random => Box::new(RandomController::with_seed(player, seed)),
    }
}

/// Play one matched game to completion and remove it from the registry
fn play_match(
    manager: &GameManager,
    made: &MatchMade,
    config: &SimulationConfig,
    stats: &Mutex<SimulationStats>,
) {
    let Some(handle) = manager.game(made.game) else {
        eprintln!("Warning: game {} vanished before it was played", made.game);
        return;
    };

    let mut seeds = match config.seed {
        Some(seed) => Xoshiro256PlusPlus::seed_from_u64(game_seed(seed, made.game)),
        None => Xoshiro256PlusPlus::from_entropy(),
    };
    let [p1, p2] = made.players;
    let mut controller1 = controller(config.p1, p1, seeds.next_u64());
    let mut controller2 = controller(config.p2, p2, seeds.next_u64());

    let (result, actions) = {
        let mut game = handle.lock().unwrap_or_else(PoisonError::into_inner);
        let mut game_loop = GameLoop::new(&mut game).with_max_turns(config.max_turns);
        let result = game_loop.run_game(&mut *controller1, &mut *controller2);
        (result, game_loop.actions_taken())
    };
    manager.end_game(made.game);

    let mut stats = stats.lock().unwrap_or_else(PoisonError::into_inner);
    stats.games_played += 1;
    stats.total_turns += u64::from(result.turns_played);
    stats.total_actions += actions;
    match result.end_reason {
        GameEndReason::NexusDestroyed(_) if result.winner == Some(p1) => stats.p1_wins += 1,
        GameEndReason::NexusDestroyed(_) => stats.p2_wins += 1,
        GameEndReason::TurnLimit => stats.draws += 1,
    }
}

fn game_seed(seed: u64, game: GameId) -> u64 {
    seed.wrapping_add(game.as_u64().wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Run `config.games` games between freshly queued players
///
/// Player ids `1..=2 * games` are used for the simulated users. The
/// manager's own seed decides the deck shuffles; `config.seed` decides the
/// bots' choices.
pub fn run_simulation(
    manager: &GameManager,
    tickets: &TicketManager,
    config: &SimulationConfig,
) -> SimulationReport {
    let stats = Arc::new(Mutex::new(SimulationStats::default()));
    let start = Instant::now();

    (0..config.games).into_par_iter().for_each(|index| {
        let base = index as u64 * 2;
        for user in [base + 1, base + 2] {
            if let OpenTicket::Opened(_) = tickets.open_ticket(PlayerId::new(user)) {
                stats.lock().unwrap_or_else(PoisonError::into_inner).tickets_opened += 1;
            }
        }
        // whoever pairs a ticket plays the game, not necessarily the opener
        for made in tickets.find_match(manager) {
            play_match(manager, &made, config, &stats);
        }
    });
    for made in tickets.find_match(manager) {
        play_match(manager, &made, config, &stats);
    }

    let stats = stats.lock().unwrap_or_else(PoisonError::into_inner).clone();
    SimulationReport {
        stats,
        elapsed: start.elapsed(),
    }
}

pub fn print_report(report: &SimulationReport, config: &SimulationConfig) {
    let stats = &report.stats;
    let secs = report.elapsed.as_secs_f64();
    let played = stats.games_played.max(1) as f64;

    println!("\n=== Simulation Complete ===");
    println!("Controllers: P1={:?}, P2={:?}", config.p1, config.p2);
    println!("Tickets opened: {}", stats.tickets_opened);
    println!("Total games played: {}", stats.games_played);
    println!("Elapsed time: {secs:.2}s");
    if secs > 0.0 {
        println!("Games per second: {:.2}", stats.games_played as f64 / secs);
    }
    println!();
    println!("=== Results ===");
    println!(
        "Player 1 wins: {} ({:.1}%)",
        stats.p1_wins,
        stats.p1_wins as f64 * 100.0 / played
    );
    println!(
        "Player 2 wins: {} ({:.1}%)",
        stats.p2_wins,
        stats.p2_wins as f64 * 100.0 / played
    );
    println!(
        "Turn limit reached: {} ({:.1}%)",
        stats.draws,
        stats.draws as f64 * 100.0 / played
    );
    println!("Average turns per game: {:.1}", stats.average_turns());
    println!("Actions applied: {}", stats.total_actions);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameSettings, VerbosityLevel};
    use crate::loader::CardCatalog;

    fn manager() -> GameManager {
        GameManager::new(Arc::new(CardCatalog::builtin()), GameSettings::default())
            .with_seed(5)
            .with_verbosity(VerbosityLevel::Silent)
    }

    #[test]
    fn test_every_game_is_played_and_released() {
        let gm = manager();
        let tm = TicketManager::new();
        let config = SimulationConfig {
            games: 16,
            seed: Some(1),
            ..SimulationConfig::default()
        };
        let report = run_simulation(&gm, &tm, &config);
        let stats = &report.stats;

        assert_eq!(stats.tickets_opened, 32);
        assert_eq!(stats.games_played, 16);
        assert_eq!(stats.p1_wins + stats.p2_wins + stats.draws, 16);
        assert!(gm.is_empty());
        assert!(tm.is_empty());
    }

    #[test]
    fn test_zero_bots_finish_before_turn_limit() {
        let gm = manager();
        let tm = TicketManager::new();
        let config = SimulationConfig {
            games: 4,
            seed: Some(2),
            p1: ControllerType::Zero,
            p2: ControllerType::Zero,
            max_turns: 200,
        };
        let stats = run_simulation(&gm, &tm, &config).stats;
        assert_eq!(stats.games_played, 4);
        assert_eq!(stats.draws, 0);
    }
}
