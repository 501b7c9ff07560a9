//! Performance benchmarks for the CyberArena engine
//!
//! - **game_execution**: a full game between two seeded random bots,
//!   including deck creation from the built-in catalog
//! - **combat**: card-vs-card attacks through a stack of boosts
//! - **matchmaking**: pairing a queue of open tickets into games
//!
//! Build with `--no-default-features` to drop per-action log formatting.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use cyberarena::{
    core::{Boost, Card, PlayerId},
    game::{GameLoop, GameManager, GameSettings, RandomController},
    loader::CardCatalog,
    matchmaking::TicketManager,
};
use std::sync::{Arc, PoisonError};
use std::time::{Duration, Instant};

/// Metrics collected during game execution
#[derive(Debug, Clone)]
struct GameMetrics {
    turns: u32,
    actions: u64,
    duration: Duration,
}

impl GameMetrics {
    fn actions_per_sec(&self) -> f64 {
        self.actions as f64 / self.duration.as_secs_f64()
    }

    fn actions_per_turn(&self) -> f64 {
        if self.turns == 0 {
            0.0
        } else {
            self.actions as f64 / self.turns as f64
        }
    }
}

fn manager(seed: u64) -> GameManager {
    GameManager::new(Arc::new(CardCatalog::builtin()), GameSettings::default()).with_seed(seed)
}

fn run_game_with_metrics(gm: &GameManager, seed: u64) -> GameMetrics {
    let start = Instant::now();
    let (p1, p2) = (PlayerId::new(1), PlayerId::new(2));
    let id = gm.create_game(p1, p2);
    let handle = gm.game(id).expect("game was just created");

    let mut controller1 = RandomController::with_seed(p1, seed);
    let mut controller2 = RandomController::with_seed(p2, seed + 1);

    let mut game = handle.lock().unwrap_or_else(PoisonError::into_inner);
    let mut game_loop = GameLoop::new(&mut game);
    let result = game_loop.run_game(&mut controller1, &mut controller2);
    let actions = game_loop.actions_taken();
    drop(game);
    gm.end_game(id);

    GameMetrics {
        turns: result.turns_played,
        actions,
        duration: start.elapsed(),
    }
}

fn bench_game_fresh(c: &mut Criterion) {
    let mut group = c.benchmark_group("game_execution");
    group.sample_size(50);

    let seed = 42u64;
    let gm = manager(seed);
    let metrics = run_game_with_metrics(&gm, seed);
    println!("\nWarmup game (seed {seed}):");
    println!("  Turns: {}", metrics.turns);
    println!("  Actions: {}", metrics.actions);
    println!("  Duration: {:?}", metrics.duration);
    println!("  Actions/sec: {:.2}", metrics.actions_per_sec());
    println!("  Actions/turn: {:.2}", metrics.actions_per_turn());

    group.bench_with_input(BenchmarkId::new("fresh", seed), &seed, |b, &seed| {
        b.iter(|| run_game_with_metrics(&gm, black_box(seed)));
    });
    group.finish();
}

fn bench_combat(c: &mut Criterion) {
    let mut group = c.benchmark_group("combat");

    for depth in [0usize, 4, 16] {
        group.bench_with_input(BenchmarkId::new("boosted_defender", depth), &depth, |b, &depth| {
            b.iter(|| {
                let attacker = Card::new("Striker", 1, 10, 3, 0).expect("valid card");
                let mut defender = Card::new("Wall", 1, 50, 0, 1).expect("valid card");
                for _ in 0..depth {
                    defender.boost(Boost::temporary_hit_defense(2));
                }
                while defender.is_alive() {
                    attacker.attack(&mut defender);
                    defender.collapse();
                }
                black_box(defender.boost_depth())
            });
        });
    }
    group.finish();
}

fn bench_matchmaking(c: &mut Criterion) {
    let mut group = c.benchmark_group("matchmaking");

    for players in [64u64, 1024] {
        group.bench_with_input(BenchmarkId::new("find_match", players), &players, |b, &players| {
            b.iter(|| {
                let gm = manager(7);
                let tm = TicketManager::new();
                for user in 0..players {
                    tm.create_ticket(PlayerId::new(user));
                }
                black_box(tm.find_match(&gm).len())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_game_fresh, bench_combat, bench_matchmaking);
criterion_main!(benches);
