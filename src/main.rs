//! CyberArena - command line driver
//!
//! Runs bot simulations through matchmaking and inspects card libraries.

use clap::{Parser, Subcommand, ValueEnum};
use cyberarena::{
    game::{GameManager, GameSettings, VerbosityLevel},
    loader::CardCatalog,
    matchmaking::TicketManager,
    simulation::{self, SimulationConfig},
    Result,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Controller type for bot players
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ControllerType {
    /// Always chooses the first legal action
    Zero,
    /// Makes random choices
    Random,
}

impl From<ControllerType> for simulation::ControllerType {
    fn from(kind: ControllerType) -> Self {
        match kind {
            ControllerType::Zero => simulation::ControllerType::Zero,
            ControllerType::Random => simulation::ControllerType::Random,
        }
    }
}

/// Verbosity level for game output (custom parser supporting both names and numbers)
#[derive(Debug, Clone, Copy)]
struct VerbosityArg(VerbosityLevel);

impl std::str::FromStr for VerbosityArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityArg(VerbosityLevel::Silent)),
            "minimal" | "1" => Ok(VerbosityArg(VerbosityLevel::Minimal)),
            "normal" | "2" => Ok(VerbosityArg(VerbosityLevel::Normal)),
            "verbose" | "3" => Ok(VerbosityArg(VerbosityLevel::Verbose)),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, minimal/1, normal/2, verbose/3)"
            )),
        }
    }
}

impl From<VerbosityArg> for VerbosityLevel {
    fn from(arg: VerbosityArg) -> Self {
        arg.0
    }
}

#[derive(Parser)]
#[command(name = "arena")]
#[command(about = "CyberArena - card battle engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Queue bot players through matchmaking and play the games in parallel
    Simulate {
        /// Number of games to play
        #[arg(long, short = 'g', default_value_t = 100)]
        games: usize,

        /// Random seed for deterministic runs
        #[arg(long)]
        seed: Option<u64>,

        /// Verbosity level for game output (0=silent, 1=minimal, 2=normal, 3=verbose)
        #[arg(long, default_value = "silent", short = 'v')]
        verbosity: VerbosityArg,

        /// Card library directory (one folder with a data.json per card); built-in cards if omitted
        #[arg(long, value_name = "DIR")]
        cards: Option<PathBuf>,

        /// JSON settings file; GAME_MODULE_* variables override it
        #[arg(long, value_name = "FILE")]
        settings: Option<PathBuf>,

        /// Turn limit after which a game ends without a winner
        #[arg(long, default_value_t = 200)]
        max_turns: u32,

        /// Player 1 controller type
        #[arg(long, value_enum, default_value = "random")]
        p1: ControllerType,

        /// Player 2 controller type
        #[arg(long, value_enum, default_value = "random")]
        p2: ControllerType,
    },

    /// List the cards of a library
    Cards {
        /// Card library directory; built-in cards if omitted
        #[arg(long, value_name = "DIR")]
        cards: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            games,
            seed,
            verbosity,
            cards,
            settings,
            max_turns,
            p1,
            p2,
        } => {
            let config = SimulationConfig {
                games,
                seed,
                p1: p1.into(),
                p2: p2.into(),
                max_turns,
            };
            run_simulate(config, verbosity.into(), cards, settings).await?
        }
        Commands::Cards { cards } => run_cards(cards).await?,
    }

    Ok(())
}

async fn load_catalog(dir: Option<&Path>) -> Result<CardCatalog> {
    match dir {
        Some(dir) => {
            println!("Loading card library from {}...", dir.display());
            let (catalog, duration) = CardCatalog::load_dir(dir).await?;
            println!(
                "  Loaded {} cards in {:.2}ms\n",
                catalog.len(),
                duration.as_secs_f64() * 1000.0
            );
            Ok(catalog)
        }
        None => Ok(CardCatalog::builtin()),
    }
}

fn load_settings(path: Option<&Path>) -> Result<GameSettings> {
    let mut settings = match path {
        Some(path) => GameSettings::from_json_file(path)?,
        None => GameSettings::default(),
    };
    settings.apply_env(|key| std::env::var(key).ok())?;
    Ok(settings)
}

async fn run_simulate(
    config: SimulationConfig,
    verbosity: VerbosityLevel,
    cards: Option<PathBuf>,
    settings: Option<PathBuf>,
) -> Result<()> {
    println!("=== CyberArena - Simulation Mode ===\n");

    let catalog = Arc::new(load_catalog(cards.as_deref()).await?);
    let settings = load_settings(settings.as_deref())?;
    let mut manager = GameManager::new(catalog, settings).with_verbosity(verbosity);
    if let Some(seed) = config.seed {
        println!("Using seed: {seed}");
        manager = manager.with_seed(seed);
    }
    let tickets = TicketManager::new();

    println!("Running {} games...", config.games);
    let (report, config) = tokio::task::spawn_blocking(move || {
        let report = simulation::run_simulation(&manager, &tickets, &config);
        (report, config)
    })
    .await?;

    simulation::print_report(&report, &config);
    Ok(())
}

async fn run_cards(cards: Option<PathBuf>) -> Result<()> {
    let catalog = load_catalog(cards.as_deref()).await?;

    println!(
        "{:>4}  {:<24} {:>4} {:>4} {:>4} {:>4}  {:<10} {}",
        "id", "name", "cost", "hp", "ap", "dp", "rarity", "race"
    );
    for card in catalog.iter() {
        println!(
            "{:>4}  {:<24} {:>4} {:>4} {:>4} {:>4}  {:<10} {}",
            card.catalog_id(),
            card.name(),
            card.cost(),
            card.hp(),
            card.ap(),
            card.dp(),
            card.rarity().as_str(),
            card.race()
        );
    }
    println!("\n{} cards", catalog.len());
    Ok(())
}
