//! SQLDUEL PG - PostgreSQL Boundary
//!
//! The live half of the tuning game: connection configuration, the reward
//! engine that replays terminal histories under `EXPLAIN (ANALYZE, BUFFERS)`,
//! and the [`LiveState`] wrapper that exposes the whole game through the
//! solver-facing surface. Everything here blocks the calling thread on the
//! database; the in-memory state machine lives in `sqlduel-core`.

pub mod config;
pub mod error;
pub mod live;
pub mod reward;

pub use config::{DbConfig, SslMode};
pub use error::{RewardError, RewardResult};
pub use live::LiveState;
pub use reward::RewardEngine;
