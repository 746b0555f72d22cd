//! Live reward measurement
//!
//! Converts a terminal game history into a zero-sum payoff by replaying it
//! against the configured database: client transactions are profiled with
//! `EXPLAIN (ANALYZE, BUFFERS)` and priced by measured planning plus
//! execution time, tuning actions are executed directly and priced by
//! wall-clock elapsed time. Every replay owns one connection and one outer
//! transaction, rolled back at the end so repeated calls start from the
//! same schema.
//!
//! Payoffs are noisy by design: re-execution against a live system stands
//! in for a deterministic cost model, so consumers must treat the result
//! as an estimator, not an exact value.

use std::sync::Arc;
use std::time::Instant;

use postgres::Transaction;
use sqlduel_core::{GameState, ParseError, PlanEstimate, PlanProfile, Player, TuningGame};

use crate::config::DbConfig;
use crate::error::RewardResult;

/// Prices terminal states of one game against one database.
#[derive(Debug, Clone)]
pub struct RewardEngine {
    game: Arc<TuningGame>,
    db: DbConfig,
}

impl RewardEngine {
    pub fn new(game: Arc<TuningGame>, db: DbConfig) -> Self {
        Self { game, db }
    }

    pub fn game(&self) -> &Arc<TuningGame> {
        &self.game
    }

    pub fn db_config(&self) -> &DbConfig {
        &self.db
    }

    /// Replay the state's history and return the measured zero-sum payoff
    /// `[total_cost, -total_cost]`. The client minimizes the total; the
    /// tuner pays for its own statements' wall-clock time and, through the
    /// persistent schema effects within the replay scope, for their impact
    /// on subsequent client statements.
    ///
    /// Any execution or parse failure aborts the whole computation; no
    /// partial payoff is surfaced.
    ///
    /// # Panics
    ///
    /// Panics if `state` does not belong to this engine's game.
    pub fn replay(&self, state: &GameState) -> RewardResult<[f64; 2]> {
        assert!(
            Arc::ptr_eq(state.game(), &self.game),
            "state does not belong to this engine's game"
        );

        let mut client = self.db.connect()?;
        let mut txn = client.transaction()?;
        let mut total_ms = 0.0;

        for entry in state.history() {
            match entry.player {
                Player::Client => {
                    total_ms += self.profile_transaction(&mut txn, entry.action)?;
                }
                Player::Server => {
                    total_ms += self.apply_tuning(&mut txn, entry.action)?;
                }
            }
        }

        txn.rollback()?;
        tracing::info!(
            total_ms,
            moves = state.history().len(),
            "replay complete"
        );
        Ok([total_ms, -total_ms])
    }

    /// Cheaper payoff proxy: price client transactions by the planner's
    /// estimated total cost (`EXPLAIN` without execution) instead of
    /// measured time. Tuning actions are still executed so later estimates
    /// see their schema effects, but contribute no cost of their own.
    pub fn estimate(&self, state: &GameState) -> RewardResult<[f64; 2]> {
        assert!(
            Arc::ptr_eq(state.game(), &self.game),
            "state does not belong to this engine's game"
        );

        let mut client = self.db.connect()?;
        let mut txn = client.transaction()?;
        let mut total_cost = 0.0;

        for entry in state.history() {
            match entry.player {
                Player::Client => {
                    let workload = self
                        .game
                        .workload()
                        .get(entry.action)
                        .expect("history entries are bounds-checked at apply time");
                    for statement in &workload.statements {
                        let sql = format!("EXPLAIN {statement}");
                        let rows = txn.query(sql.as_str(), &[])?;
                        let root: String = rows
                            .first()
                            .ok_or(ParseError::EmptyReport)?
                            .try_get(0)?;
                        let est = PlanEstimate::parse(&root)?;
                        tracing::debug!(
                            transaction = %workload.name,
                            plan = %est,
                            "estimated client statement"
                        );
                        total_cost += est.total_cost * workload.weight;
                    }
                }
                Player::Server => {
                    self.apply_tuning(&mut txn, entry.action)?;
                }
            }
        }

        txn.rollback()?;
        Ok([total_cost, -total_cost])
    }

    /// Profile one workload transaction: each statement runs under
    /// `EXPLAIN (ANALYZE, BUFFERS)` in its own nested scope, and the
    /// weighted sum of measured planning + execution time is returned.
    fn profile_transaction(
        &self,
        txn: &mut Transaction<'_>,
        action: usize,
    ) -> RewardResult<f64> {
        let workload = self
            .game
            .workload()
            .get(action)
            .expect("history entries are bounds-checked at apply time");

        let mut transaction_ms = 0.0;
        for statement in &workload.statements {
            let mut scope = txn.transaction()?;
            let sql = format!("EXPLAIN (ANALYZE, BUFFERS) {statement}");
            let rows = scope.query(sql.as_str(), &[])?;
            let mut lines = Vec::with_capacity(rows.len());
            for row in &rows {
                lines.push(row.try_get::<_, String>(0)?);
            }
            let profile = PlanProfile::parse(lines.iter().map(String::as_str))?;
            scope.commit()?;

            tracing::debug!(
                transaction = %workload.name,
                statement = %statement,
                planning_ms = profile.planning_time_ms,
                execution_ms = profile.execution_time_ms,
                "profiled client statement"
            );
            transaction_ms += profile.measured_ms();
        }
        Ok(transaction_ms * workload.weight)
    }

    /// Execute one tuning action directly, not wrapped in an analysis
    /// request, and return its wall-clock elapsed milliseconds.
    fn apply_tuning(&self, txn: &mut Transaction<'_>, action: usize) -> RewardResult<f64> {
        let tuning = self
            .game
            .tuning()
            .get(action)
            .expect("history entries are bounds-checked at apply time");

        let started = Instant::now();
        txn.batch_execute(&tuning.statement)?;
        let elapsed_ms = started.elapsed().as_secs_f64() * 1_000.0;

        tracing::debug!(
            action = %tuning.name,
            elapsed_ms,
            "applied tuning action"
        );
        Ok(elapsed_ms)
    }
}
