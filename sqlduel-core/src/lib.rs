//! SQLDUEL Core - Adversarial Database Tuning Game
//!
//! Models database performance tuning as a two-player sequential zero-sum
//! game: a client plays transactions from a weighted SQL workload catalog
//! while a tuner plays schema actions against the same database. This crate
//! is the pure in-memory half: catalogs, the turn-bounded state machine,
//! and plan-report cost extraction. Live payoff measurement lives in
//! `sqlduel-pg`, behind the [`solver::SolverState`] surface that any
//! sequential-game solver drives.

pub mod catalog;
pub mod error;
pub mod game;
pub mod plan;
pub mod registry;
pub mod solver;

pub use catalog::{GameSpec, TuningAction, TuningCatalog, WorkloadCatalog, WorkloadTransaction};
pub use error::{ConfigError, DuelError, DuelResult, ParseError};
pub use game::{ActionId, GameConfig, GameState, HistoryEntry, Player, TuningGame};
pub use plan::{PlanEstimate, PlanProfile};
pub use registry::{create_game, load_game, register_game, registered_games, BUILTIN_GAME};
pub use solver::SolverState;
