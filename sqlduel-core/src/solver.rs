//! Solver-facing game surface
//!
//! The fixed capability set a sequential-game solver drives, identical for
//! every game it is pointed at: enumerate legal moves, walk the tree with
//! apply/undo, detect termination, and price terminal states. Implementors
//! pair the in-memory state machine with whatever payoff source the game
//! needs; the solver never sees the difference.

use crate::game::{ActionId, Player};
use crate::DuelResult;

/// One node of a two-player sequential game, as seen by a solver.
pub trait SolverState {
    /// The player to move, or `None` if the state is terminal.
    fn current_player(&self) -> Option<Player>;

    /// Legal moves for the current player, ascending; empty if terminal.
    fn legal_actions(&self) -> Vec<ActionId>;

    /// Apply a move for the current player. Illegal moves are a contract
    /// violation and panic.
    fn apply_action(&mut self, action: ActionId);

    /// Undo the immediately preceding `apply_action` only.
    fn undo_action(&mut self, player: Player, action: ActionId);

    /// True exactly when the configured number of moves has been made.
    fn is_terminal(&self) -> bool;

    /// Zero-sum payoff vector for a terminal state, `[client, server]`.
    ///
    /// May be re-invoked on the same state and is generally noisy: games
    /// that price against a live system re-measure on every call.
    fn returns(&self) -> DuelResult<[f64; 2]>;

    /// Independent copy of this node for branching searches.
    fn clone_state(&self) -> Box<dyn SolverState>;

    /// Diagnostic rendering of one action.
    fn action_to_string(&self, player: Player, action: ActionId) -> String;

    /// Rendered move history.
    fn history_string(&self) -> String;

    /// What `player` knows at this node.
    fn information_state_string(&self, player: Player) -> String;

    /// What `player` observes at this node.
    fn observation_string(&self, player: Player) -> String;
}
