//! Solver-facing state bound to a live reward engine
//!
//! [`LiveState`] pairs the pure in-memory state machine with the engine
//! that prices its terminal histories, which is the shape a solver
//! actually drives: everything except `returns()` stays in memory.

use std::sync::Arc;

use sqlduel_core::{ActionId, DuelResult, GameState, Player, SolverState};

use crate::reward::RewardEngine;

/// A game state whose payoffs are measured against the engine's database.
#[derive(Debug, Clone)]
pub struct LiveState {
    state: GameState,
    engine: Arc<RewardEngine>,
}

impl LiveState {
    /// Fresh initial state driven by `engine`.
    pub fn new(engine: Arc<RewardEngine>) -> Self {
        Self {
            state: engine.game().new_initial_state(),
            engine,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn engine(&self) -> &Arc<RewardEngine> {
        &self.engine
    }
}

impl SolverState for LiveState {
    fn current_player(&self) -> Option<Player> {
        self.state.current_player()
    }

    fn legal_actions(&self) -> Vec<ActionId> {
        self.state.legal_actions()
    }

    fn apply_action(&mut self, action: ActionId) {
        self.state.apply_action(action);
    }

    fn undo_action(&mut self, player: Player, action: ActionId) {
        self.state.undo_action(player, action);
    }

    fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    fn returns(&self) -> DuelResult<[f64; 2]> {
        Ok(self.engine.replay(&self.state)?)
    }

    fn clone_state(&self) -> Box<dyn SolverState> {
        Box::new(self.clone())
    }

    fn action_to_string(&self, player: Player, action: ActionId) -> String {
        self.state.action_to_string(player, action)
    }

    fn history_string(&self) -> String {
        self.state.history_string()
    }

    fn information_state_string(&self, player: Player) -> String {
        self.state.information_state_string(player)
    }

    fn observation_string(&self, player: Player) -> String {
        self.state.observation_string(player)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DbConfig;
    use sqlduel_core::{load_game, BUILTIN_GAME};

    fn live_state() -> LiveState {
        let game = load_game(BUILTIN_GAME).unwrap();
        LiveState::new(Arc::new(RewardEngine::new(game, DbConfig::default())))
    }

    #[test]
    fn test_live_state_drives_the_state_machine() {
        let mut live = live_state();
        assert_eq!(live.current_player(), Some(Player::Client));
        assert_eq!(live.legal_actions(), vec![0, 1]);

        live.apply_action(1);
        assert_eq!(live.current_player(), Some(Player::Server));
        live.undo_action(Player::Client, 1);
        assert_eq!(live.current_player(), Some(Player::Client));
        assert_eq!(live.history_string(), "History[]");
    }

    #[test]
    fn test_clone_state_branches_independently() {
        let mut live = live_state();
        live.apply_action(0);

        let mut branch = live.clone_state();
        branch.apply_action(1);

        assert_eq!(live.history_string(), "History[(client,0),]");
        assert_eq!(
            branch.history_string(),
            "History[(client,0),(server,1),]"
        );
    }

    #[test]
    fn test_rendering_delegates_to_inner_state() {
        let live = live_state();
        let rendered = live.action_to_string(Player::Server, 0);
        assert!(rendered.contains("create index on foo (a)"));
        assert_eq!(
            live.information_state_string(Player::Client),
            live.observation_string(Player::Client)
        );
    }
}
