//! Game registry
//!
//! Explicit name-to-factory mapping, populated at process start. Callers
//! register additional games with [`register_game`]; the built-in
//! `"sqlduel"` game is always present.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use once_cell::sync::Lazy;

use crate::catalog::GameSpec;
use crate::error::ConfigError;
use crate::game::TuningGame;
use crate::DuelResult;

/// Builds a game from a declarative spec.
pub type GameFactory = fn(GameSpec) -> DuelResult<Arc<TuningGame>>;

/// Name of the built-in game.
pub const BUILTIN_GAME: &str = "sqlduel";

static REGISTRY: Lazy<RwLock<HashMap<&'static str, GameFactory>>> = Lazy::new(|| {
    let mut games: HashMap<&'static str, GameFactory> = HashMap::new();
    games.insert(BUILTIN_GAME, TuningGame::from_spec as GameFactory);
    RwLock::new(games)
});

/// Register a factory under `name`, replacing any previous registration.
pub fn register_game(name: &'static str, factory: GameFactory) {
    REGISTRY
        .write()
        .expect("game registry lock poisoned")
        .insert(name, factory);
}

/// Build the named game from an explicit spec.
pub fn create_game(name: &str, spec: GameSpec) -> DuelResult<Arc<TuningGame>> {
    let factory = {
        let games = REGISTRY.read().expect("game registry lock poisoned");
        games.get(name).copied()
    };
    match factory {
        Some(factory) => factory(spec),
        None => Err(ConfigError::UnknownGame {
            name: name.to_string(),
        }
        .into()),
    }
}

/// Build the named game from the built-in demo spec.
pub fn load_game(name: &str) -> DuelResult<Arc<TuningGame>> {
    create_game(name, GameSpec::builtin())
}

/// Names of all registered games, sorted.
pub fn registered_games() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = REGISTRY
        .read()
        .expect("game registry lock poisoned")
        .keys()
        .copied()
        .collect();
    names.sort_unstable();
    names
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DuelError;

    #[test]
    fn test_builtin_game_is_registered() {
        assert!(registered_games().contains(&BUILTIN_GAME));
    }

    #[test]
    fn test_load_builtin_game() {
        let game = load_game(BUILTIN_GAME).unwrap();
        assert_eq!(game.num_players(), 2);
        assert_eq!(game.workload().len(), 2);
        assert_eq!(game.tuning().len(), 2);
    }

    #[test]
    fn test_unknown_game_is_rejected() {
        let err = load_game("chess").unwrap_err();
        assert_eq!(
            err,
            DuelError::Config(ConfigError::UnknownGame {
                name: "chess".to_string()
            })
        );
    }

    #[test]
    fn test_register_custom_factory() {
        fn single_epoch(mut spec: GameSpec) -> DuelResult<Arc<TuningGame>> {
            spec.game.max_server_turns = 1;
            TuningGame::from_spec(spec)
        }

        register_game("sqlduel_single_epoch", single_epoch);
        let game = create_game("sqlduel_single_epoch", GameSpec::builtin()).unwrap();
        assert_eq!(game.config().max_server_turns, 1);
        assert!(registered_games().contains(&"sqlduel_single_epoch"));
    }

    #[test]
    fn test_create_game_validates_spec() {
        let mut spec = GameSpec::builtin();
        spec.workload.clear();
        let err = create_game(BUILTIN_GAME, spec).unwrap_err();
        assert!(matches!(
            err,
            DuelError::Config(ConfigError::EmptyCatalog { .. })
        ));
    }
}
