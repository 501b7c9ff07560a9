//! Registry of live games
//!
//! The registry map sits behind an `RwLock` and each game behind its own
//! `Mutex`, so unrelated games never contend. Every routed call holds the
//! game's mutex for its whole read-modify-write sequence.
//!
//! Lock order is registry, then game. Nothing acquires the registry while
//! holding a game lock. A poisoned lock is recovered rather than propagated:
//! game state is only mutated through methods that leave it consistent
//! between statements that can panic.

use crate::core::{CardId, CardView, GameId, PlayerId, Side};
use crate::game::actions::GameAction;
use crate::game::logger::VerbosityLevel;
use crate::game::outcome::{AttackResult, DeployResult, DrawResult, NexusAttackResult, TurnResult};
use crate::game::{Game, GameSettings};
use crate::loader::CardCatalog;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use rustc_hash::FxHashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use thiserror::Error;

/// A `(game_id, player_id)` pair that does not name a live seat
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unresolved {
    #[error("game {0} does not exist")]
    GameNotFound(GameId),
    #[error("player {player} is not in game {game}")]
    PlayerNotInGame { game: GameId, player: PlayerId },
}

#[derive(Debug)]
struct Entry {
    players: [PlayerId; 2],
    game: Arc<Mutex<Game>>,
}

pub type Routed<T> = std::result::Result<T, Unresolved>;

#[derive(Debug)]
pub struct GameManager {
    games: RwLock<FxHashMap<GameId, Entry>>,
    next_id: AtomicU64,
    catalog: Arc<CardCatalog>,
    settings: GameSettings,
    seed: Option<u64>,
    verbosity: VerbosityLevel,
    capture_logs: bool,
}

fn lock(game: &Mutex<Game>) -> MutexGuard<'_, Game> {
    game.lock().unwrap_or_else(PoisonError::into_inner)
}

impl GameManager {
    pub fn new(catalog: Arc<CardCatalog>, settings: GameSettings) -> Self {
        GameManager {
            games: RwLock::new(FxHashMap::default()),
            next_id: AtomicU64::new(1),
            catalog,
            settings,
            seed: None,
            verbosity: VerbosityLevel::Silent,
            capture_logs: false,
        }
    }

    /// Shuffle decks deterministically: game `n` derives its RNG from `seed` and `n`
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Verbosity given to the logger of every new game
    pub fn with_verbosity(mut self, verbosity: VerbosityLevel) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Capture every new game's log in memory
    pub fn with_log_capture(mut self) -> Self {
        self.capture_logs = true;
        self
    }

    pub fn catalog(&self) -> &Arc<CardCatalog> {
        &self.catalog
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    /// Start a game between two players; `p1` moves first
    pub fn create_game(&self, p1: PlayerId, p2: PlayerId) -> GameId {
        let id = GameId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        let mut rng = match self.seed {
            Some(seed) => ChaCha12Rng::seed_from_u64(
                seed.wrapping_add(id.as_u64().wrapping_mul(0x9E37_79B9_7F4A_7C15)),
            ),
            None => ChaCha12Rng::from_entropy(),
        };
        let copies = self.settings.deck_copies;
        let deck1 = self.catalog.create_deck(&mut rng, copies);
        let deck2 = self.catalog.create_deck(&mut rng, copies);

        let mut game = Game::new(id, (p1, deck1), (p2, deck2), &self.settings);
        game.logger.set_verbosity(self.verbosity);
        if self.capture_logs {
            game.logger.enable_capture();
        }
        game.logger.normal(&format!("Game {id} created: {p1} vs {p2}"));

        let entry = Entry {
            players: [p1, p2],
            game: Arc::new(Mutex::new(game)),
        };
        self.games
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, entry);
        id
    }

    /// Drop a game from the registry; false if it was not there
    pub fn end_game(&self, id: GameId) -> bool {
        self.games
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)
            .is_some()
    }

    pub fn contains(&self, id: GameId) -> bool {
        self.games
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.games.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Shared handle to a game, for callers that drive it directly
    pub fn game(&self, id: GameId) -> Option<Arc<Mutex<Game>>> {
        self.games
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .map(|entry| Arc::clone(&entry.game))
    }

    /// Most recently created game `player` takes part in
    pub fn find_player(&self, player: PlayerId) -> Option<GameId> {
        self.games
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|(_, entry)| entry.players.contains(&player))
            .map(|(&id, _)| id)
            .max()
    }

    fn resolve(&self, game: GameId, player: PlayerId) -> Routed<(Side, Arc<Mutex<Game>>)> {
        let games = self.games.read().unwrap_or_else(PoisonError::into_inner);
        let entry = games.get(&game).ok_or(Unresolved::GameNotFound(game))?;
        let side = match entry.players {
            [p1, _] if p1 == player => Side::One,
            [_, p2] if p2 == player => Side::Two,
            _ => return Err(Unresolved::PlayerNotInGame { game, player }),
        };
        Ok((side, Arc::clone(&entry.game)))
    }

    /// Run `f` on the game with the player's side, holding the game lock
    /// for the whole call
    pub fn with_game<R>(
        &self,
        game: GameId,
        player: PlayerId,
        f: impl FnOnce(&mut Game, Side) -> R,
    ) -> Routed<R> {
        let (side, handle) = self.resolve(game, player)?;
        let mut guard = lock(&handle);
        Ok(f(&mut *guard, side))
    }

    pub fn draw_card(&self, game: GameId, player: PlayerId, force: bool) -> Routed<DrawResult> {
        self.with_game(game, player, |g, side| g.draw_card(side, force))
    }

    pub fn deploy_card(&self, game: GameId, player: PlayerId, card: CardId) -> Routed<DeployResult> {
        self.with_game(game, player, |g, side| g.deploy_card(side, card))
    }

    pub fn attack_card(
        &self,
        game: GameId,
        player: PlayerId,
        attacker: CardId,
        defender: CardId,
    ) -> Routed<AttackResult> {
        self.with_game(game, player, |g, side| g.attack_card(side, attacker, defender))
    }

    pub fn attack_nexus(
        &self,
        game: GameId,
        player: PlayerId,
        attacker: CardId,
    ) -> Routed<NexusAttackResult> {
        self.with_game(game, player, |g, side| g.attack_nexus(side, attacker))
    }

    /// End `player`'s turn
    pub fn next_turn(&self, game: GameId, player: PlayerId) -> Routed<TurnResult> {
        self.with_game(game, player, |g, side| g.increase_turn(side))
    }

    pub fn get_mana(&self, game: GameId, player: PlayerId) -> Routed<i32> {
        self.with_game(game, player, |g, side| g.player(side).mana())
    }

    pub fn get_mana_cap(&self, game: GameId, player: PlayerId) -> Routed<i32> {
        self.with_game(game, player, |g, side| g.player(side).mana_cap())
    }

    pub fn get_mana_max(&self, game: GameId, player: PlayerId) -> Routed<i32> {
        self.with_game(game, player, |g, side| g.player(side).mana_max())
    }

    /// Nexus health of `player`, or of their opponent when `opponent` is set
    pub fn get_nexus_health(&self, game: GameId, player: PlayerId, opponent: bool) -> Routed<i32> {
        self.with_game(game, player, |g, side| {
            let side = if opponent { side.opposite() } else { side };
            g.board().nexus_health(side)
        })
    }

    /// Id of the player whose turn it is
    pub fn get_turn(&self, game: GameId) -> Routed<PlayerId> {
        let handle = self.game(game).ok_or(Unresolved::GameNotFound(game))?;
        let guard = lock(&handle);
        Ok(guard.player(guard.active_side()).id)
    }

    /// Mark `player` connected; true once both players are
    pub fn connect(&self, game: GameId, player: PlayerId) -> Routed<bool> {
        self.with_game(game, player, |g, side| g.connect(side))
    }

    /// Current stats of a card in the player's hand or anywhere on the board
    pub fn card_stats(&self, game: GameId, player: PlayerId, card: CardId) -> Routed<Option<CardView>> {
        self.with_game(game, player, |g, side| {
            g.player(side)
                .hand()
                .get(card)
                .or_else(|| g.board().card(card.side, card))
                .map(|c| c.view())
        })
    }

    pub fn hand(&self, game: GameId, player: PlayerId) -> Routed<Vec<CardView>> {
        self.with_game(game, player, |g, side| {
            g.player(side).hand().iter().map(|c| c.view()).collect()
        })
    }

    pub fn available_actions(&self, game: GameId, player: PlayerId) -> Routed<Vec<GameAction>> {
        self.with_game(game, player, |g, side| g.available_actions(side))
    }
}
