//! Turn-bounded tuning game: players, configuration, and the state machine
//!
//! Two players alternate blocks of moves: the client plays
//! `max_client_moves_per_turn` workload submissions, then the tuner plays
//! `max_server_moves_per_turn` schema actions, until the configured number
//! of moves has been made. All operations here are in-memory and
//! synchronous; payoff computation lives behind the database boundary.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::catalog::{GameSpec, TuningCatalog, WorkloadCatalog};
use crate::error::ConfigError;
use crate::DuelResult;

/// Move index into the acting player's catalog.
pub type ActionId = usize;

/// The two roles. The client submits workload transactions, the server
/// (tuner) submits schema actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    Client,
    Server,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::Client => Player::Server,
            Player::Server => Player::Client,
        }
    }

    /// Position of this player in payoff vectors and per-player counters.
    pub fn index(self) -> usize {
        match self {
            Player::Client => 0,
            Player::Server => 1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Client => write!(f, "client"),
            Player::Server => write!(f, "server"),
        }
    }
}

/// Turn bounds, fixed per game instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Consecutive client moves before control passes to the server.
    pub max_client_moves_per_turn: usize,
    /// Consecutive server moves before control passes back to the client.
    pub max_server_moves_per_turn: usize,
    /// Number of tuning epochs.
    pub max_server_turns: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_client_moves_per_turn: 1,
            max_server_moves_per_turn: 1,
            max_server_turns: 6,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_client_moves_per_turn == 0 {
            return Err(ConfigError::ZeroBound {
                field: "max_client_moves_per_turn",
            });
        }
        if self.max_server_moves_per_turn == 0 {
            return Err(ConfigError::ZeroBound {
                field: "max_server_moves_per_turn",
            });
        }
        if self.max_server_turns == 0 {
            return Err(ConfigError::ZeroBound {
                field: "max_server_turns",
            });
        }
        Ok(())
    }

    /// Total number of moves in a complete game.
    pub fn max_game_length(&self) -> usize {
        self.max_server_turns * self.max_client_moves_per_turn * self.max_server_moves_per_turn
    }

    fn moves_per_turn(&self, player: Player) -> usize {
        match player {
            Player::Client => self.max_client_moves_per_turn,
            Player::Server => self.max_server_moves_per_turn,
        }
    }
}

/// One applied move: who played it and which catalog entry they picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryEntry {
    pub player: Player,
    pub action: ActionId,
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.player, self.action)
    }
}

/// An instantiated game: immutable catalogs plus turn bounds.
///
/// Constructed once at setup and shared by reference across every state
/// cloned from it.
#[derive(Debug)]
pub struct TuningGame {
    workload: WorkloadCatalog,
    tuning: TuningCatalog,
    config: GameConfig,
}

impl TuningGame {
    pub fn new(
        workload: WorkloadCatalog,
        tuning: TuningCatalog,
        config: GameConfig,
    ) -> DuelResult<Arc<Self>> {
        config.validate()?;
        Ok(Arc::new(Self {
            workload,
            tuning,
            config,
        }))
    }

    /// Validate a declarative spec and build the game from it.
    pub fn from_spec(spec: GameSpec) -> DuelResult<Arc<Self>> {
        let workload = WorkloadCatalog::new(spec.workload)?;
        let tuning = TuningCatalog::new(spec.tuning)?;
        Self::new(workload, tuning, spec.game)
    }

    pub fn workload(&self) -> &WorkloadCatalog {
        &self.workload
    }

    pub fn tuning(&self) -> &TuningCatalog {
        &self.tuning
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn num_players(&self) -> usize {
        2
    }

    pub fn num_distinct_actions(&self) -> usize {
        self.workload.len().max(self.tuning.len())
    }

    pub fn max_game_length(&self) -> usize {
        self.config.max_game_length()
    }

    pub fn min_utility(&self) -> f64 {
        -999_999.0
    }

    pub fn max_utility(&self) -> f64 {
        999_999.0
    }

    pub fn utility_sum(&self) -> f64 {
        0.0
    }

    /// Catalog size for the given role.
    pub fn catalog_len(&self, player: Player) -> usize {
        match player {
            Player::Client => self.workload.len(),
            Player::Server => self.tuning.len(),
        }
    }

    /// Fresh state at the start of the game. The client moves first.
    pub fn new_initial_state(self: &Arc<Self>) -> GameState {
        GameState {
            game: Arc::clone(self),
            current: Player::Client,
            moves_in_turn: [0, 0],
            total_moves: 0,
            history: Vec::new(),
        }
    }
}

/// In-play game state: current player, per-turn move counters, and the
/// append-only move history.
///
/// Cloning deep-copies the history and counters and shares the immutable
/// game by reference, so each clone advances independently.
#[derive(Debug, Clone)]
pub struct GameState {
    game: Arc<TuningGame>,
    current: Player,
    moves_in_turn: [usize; 2],
    total_moves: usize,
    history: Vec<HistoryEntry>,
}

impl GameState {
    /// The player to move, or `None` once the state is terminal.
    pub fn current_player(&self) -> Option<Player> {
        if self.is_terminal() {
            None
        } else {
            Some(self.current)
        }
    }

    /// Every index into the current player's catalog, ascending. Empty if
    /// terminal. No filtering beyond catalog bounds is applied.
    pub fn legal_actions(&self) -> Vec<ActionId> {
        match self.current_player() {
            Some(player) => (0..self.game.catalog_len(player)).collect(),
            None => Vec::new(),
        }
    }

    /// Apply a move for the current player.
    ///
    /// # Panics
    ///
    /// Panics if the state is terminal or `action` is outside the current
    /// player's catalog; both are contract violations by the caller, not
    /// recoverable failures.
    pub fn apply_action(&mut self, action: ActionId) {
        assert!(
            !self.is_terminal(),
            "apply_action called on a terminal state"
        );
        let player = self.current;
        let catalog_len = self.game.catalog_len(player);
        assert!(
            action < catalog_len,
            "illegal action {} for {} (catalog has {} entries)",
            action,
            player,
            catalog_len
        );

        self.history.push(HistoryEntry { player, action });
        self.moves_in_turn[player.index()] += 1;
        self.total_moves += 1;
        if self.moves_in_turn[player.index()] == self.game.config.moves_per_turn(player) {
            self.moves_in_turn[player.index()] = 0;
            self.current = player.opponent();
        }
    }

    /// Undo the immediately preceding [`GameState::apply_action`].
    ///
    /// Only valid directly after the matching apply; the caller must guard
    /// any other usage.
    ///
    /// # Panics
    ///
    /// Panics if the history is empty or its last entry is not
    /// `(player, action)`.
    pub fn undo_action(&mut self, player: Player, action: ActionId) {
        let last = self
            .history
            .pop()
            .expect("undo_action called on an empty history");
        assert!(
            last.player == player && last.action == action,
            "undo_action({},{}) does not match last applied move ({},{})",
            player,
            action,
            last.player,
            last.action
        );

        if self.current == player {
            self.moves_in_turn[player.index()] -= 1;
        } else {
            // The apply closed the player's turn: counter was reset and
            // control switched. Reverse both.
            self.current = player;
            self.moves_in_turn[player.index()] =
                self.game.config.moves_per_turn(player) - 1;
        }
        self.total_moves -= 1;
    }

    /// Terminal exactly when the configured number of moves has been made.
    /// Depends only on move counts, never on history contents.
    pub fn is_terminal(&self) -> bool {
        self.total_moves >= self.game.max_game_length()
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn total_moves(&self) -> usize {
        self.total_moves
    }

    /// Moves the player has made in their current turn block.
    pub fn moves_in_turn(&self, player: Player) -> usize {
        self.moves_in_turn[player.index()]
    }

    pub fn game(&self) -> &Arc<TuningGame> {
        &self.game
    }

    /// Human-readable description of an action, including the resolved SQL.
    /// Diagnostics only.
    pub fn action_to_string(&self, player: Player, action: ActionId) -> String {
        let sql = match player {
            Player::Client => self
                .game
                .workload()
                .get(action)
                .map(|txn| txn.statements.join("; ")),
            Player::Server => self
                .game
                .tuning()
                .get(action)
                .map(|a| a.statement.clone()),
        };
        match sql {
            Some(sql) => format!("Action(id={}, player={}, sql={})", action, player, sql),
            None => format!("Action(id={}, player={}, sql=<out of range>)", action, player),
        }
    }

    /// The rendered move history, shared by both information-state and
    /// observation accessors: this is a perfect-information game.
    pub fn history_string(&self) -> String {
        self.to_string()
    }

    pub fn information_state_string(&self, _player: Player) -> String {
        self.history_string()
    }

    pub fn observation_string(&self, _player: Player) -> String {
        self.history_string()
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "History[")?;
        for entry in &self.history {
            write!(f, "{},", entry)?;
        }
        write!(f, "]")
    }
}

// =============================================================================
// TESTS
// =============================================================================
