//! Workload and tuning catalogs
//!
//! Both catalogs are closed, pre-declared sets: they are validated once at
//! game setup and never mutated afterwards. Entries are plain records;
//! nothing about a transaction or tuning action varies beyond its data.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::game::GameConfig;
use crate::DuelResult;

/// A named, weighted, ordered sequence of SQL statements representing one
/// unit of client work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkloadTransaction {
    /// Unique name within the workload catalog.
    pub name: String,
    /// Strictly positive weight applied to this transaction's measured cost.
    pub weight: f64,
    /// SQL statements executed in order.
    pub statements: Vec<String>,
}

impl WorkloadTransaction {
    pub fn new(
        name: impl Into<String>,
        weight: f64,
        statements: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            weight,
            statements,
        }
    }
}

/// A single schema-mutating SQL statement proposed by the tuner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TuningAction {
    /// Unique name within the tuning catalog.
    pub name: String,
    /// The statement, executed verbatim.
    pub statement: String,
}

impl TuningAction {
    pub fn new(name: impl Into<String>, statement: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            statement: statement.into(),
        }
    }
}

/// Immutable catalog of client workload transactions.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkloadCatalog {
    transactions: Vec<WorkloadTransaction>,
}

impl WorkloadCatalog {
    /// Validates and seals the catalog. Rejects an empty catalog, duplicate
    /// names, non-positive weights, and statement-less transactions.
    pub fn new(transactions: Vec<WorkloadTransaction>) -> Result<Self, ConfigError> {
        if transactions.is_empty() {
            return Err(ConfigError::EmptyCatalog {
                catalog: "workload",
            });
        }
        for (i, txn) in transactions.iter().enumerate() {
            if transactions[..i].iter().any(|t| t.name == txn.name) {
                return Err(ConfigError::DuplicateName {
                    catalog: "workload",
                    name: txn.name.clone(),
                });
            }
            if !(txn.weight > 0.0) {
                return Err(ConfigError::NonPositiveWeight {
                    name: txn.name.clone(),
                    weight: txn.weight,
                });
            }
            if txn.statements.is_empty() {
                return Err(ConfigError::NoStatements {
                    name: txn.name.clone(),
                });
            }
        }
        Ok(Self { transactions })
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn get(&self, id: usize) -> Option<&WorkloadTransaction> {
        self.transactions.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &WorkloadTransaction> {
        self.transactions.iter()
    }
}

/// Immutable catalog of tuner schema actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TuningCatalog {
    actions: Vec<TuningAction>,
}

impl TuningCatalog {
    /// Validates and seals the catalog. Rejects an empty catalog, duplicate
    /// names, and empty statements.
    pub fn new(actions: Vec<TuningAction>) -> Result<Self, ConfigError> {
        if actions.is_empty() {
            return Err(ConfigError::EmptyCatalog { catalog: "tuning" });
        }
        for (i, action) in actions.iter().enumerate() {
            if actions[..i].iter().any(|a| a.name == action.name) {
                return Err(ConfigError::DuplicateName {
                    catalog: "tuning",
                    name: action.name.clone(),
                });
            }
            if action.statement.trim().is_empty() {
                return Err(ConfigError::EmptyStatement {
                    name: action.name.clone(),
                });
            }
        }
        Ok(Self { actions })
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn get(&self, id: usize) -> Option<&TuningAction> {
        self.actions.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TuningAction> {
        self.actions.iter()
    }
}

/// Declarative description of one game: both catalogs plus the turn bounds.
///
/// Loadable from TOML or JSON; validation happens when the spec is turned
/// into a game, not at deserialization time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSpec {
    #[serde(default)]
    pub game: GameConfig,
    pub workload: Vec<WorkloadTransaction>,
    pub tuning: Vec<TuningAction>,
}

impl GameSpec {
    /// Parse a spec from a TOML document.
    pub fn from_toml_str(input: &str) -> DuelResult<Self> {
        toml::from_str(input).map_err(|e| {
            ConfigError::InvalidSpec {
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Parse a spec from a JSON document.
    pub fn from_json_str(input: &str) -> DuelResult<Self> {
        serde_json::from_str(input).map_err(|e| {
            ConfigError::InvalidSpec {
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// The built-in demo spec: two point-lookup queries against `foo` and
    /// two candidate indexes, with single-move alternating turns.
    pub fn builtin() -> Self {
        Self {
            game: GameConfig::default(),
            workload: vec![
                WorkloadTransaction::new(
                    "lookup_foo_5",
                    1.0,
                    vec!["select a from foo where a = 5".to_string()],
                ),
                WorkloadTransaction::new(
                    "lookup_foo_10",
                    1.0,
                    vec!["select a from foo where a = 10".to_string()],
                ),
            ],
            tuning: vec![
                TuningAction::new("index_foo_a", "create index on foo (a)"),
                TuningAction::new("index_bar_a", "create index on bar (a)"),
            ],
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(name: &str, weight: f64) -> WorkloadTransaction {
        WorkloadTransaction::new(name, weight, vec!["select 1".to_string()])
    }

    #[test]
    fn test_workload_catalog_accepts_valid_entries() {
        let catalog =
            WorkloadCatalog::new(vec![lookup("a", 1.0), lookup("b", 2.5)]).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(1).unwrap().name, "b");
        assert!(catalog.get(2).is_none());
    }

    #[test]
    fn test_workload_catalog_rejects_empty() {
        let err = WorkloadCatalog::new(vec![]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::EmptyCatalog {
                catalog: "workload"
            }
        );
    }

    #[test]
    fn test_workload_catalog_rejects_duplicate_names() {
        let err =
            WorkloadCatalog::new(vec![lookup("a", 1.0), lookup("a", 2.0)]).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateName { .. }));
    }

    #[test]
    fn test_workload_catalog_rejects_non_positive_weight() {
        for bad in [0.0, -1.0, f64::NAN] {
            let err = WorkloadCatalog::new(vec![lookup("a", bad)]).unwrap_err();
            assert!(matches!(err, ConfigError::NonPositiveWeight { .. }));
        }
    }

    #[test]
    fn test_workload_catalog_rejects_statement_less_transaction() {
        let txn = WorkloadTransaction::new("empty", 1.0, vec![]);
        let err = WorkloadCatalog::new(vec![txn]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::NoStatements {
                name: "empty".to_string()
            }
        );
    }

    #[test]
    fn test_tuning_catalog_rejects_blank_statement() {
        let err =
            TuningCatalog::new(vec![TuningAction::new("noop", "   ")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::EmptyStatement {
                name: "noop".to_string()
            }
        );
    }

    #[test]
    fn test_game_spec_from_toml() {
        let spec = GameSpec::from_toml_str(
            r#"
            [game]
            max_client_moves_per_turn = 2
            max_server_moves_per_turn = 1
            max_server_turns = 3

            [[workload]]
            name = "scan_orders"
            weight = 0.75
            statements = ["select * from orders"]

            [[tuning]]
            name = "index_orders_id"
            statement = "create index on orders (id)"
            "#,
        )
        .unwrap();
        assert_eq!(spec.game.max_client_moves_per_turn, 2);
        assert_eq!(spec.workload[0].weight, 0.75);
        assert_eq!(spec.tuning[0].name, "index_orders_id");
    }

    #[test]
    fn test_game_spec_from_toml_defaults_game_section() {
        let spec = GameSpec::from_toml_str(
            r#"
            [[workload]]
            name = "q"
            weight = 1.0
            statements = ["select 1"]

            [[tuning]]
            name = "t"
            statement = "create index on foo (a)"
            "#,
        )
        .unwrap();
        assert_eq!(spec.game, GameConfig::default());
    }

    #[test]
    fn test_game_spec_from_toml_rejects_garbage() {
        let err = GameSpec::from_toml_str("not = [valid").unwrap_err();
        assert!(matches!(
            err,
            crate::DuelError::Config(ConfigError::InvalidSpec { .. })
        ));
    }

    #[test]
    fn test_game_spec_json_round_trip() {
        let spec = GameSpec::builtin();
        let json = serde_json::to_string(&spec).unwrap();
        let back = GameSpec::from_json_str(&json).unwrap();
        assert_eq!(back, spec);
    }

    #[test]
    fn test_builtin_spec_is_valid() {
        let spec = GameSpec::builtin();
        assert!(WorkloadCatalog::new(spec.workload).is_ok());
        assert!(TuningCatalog::new(spec.tuning).is_ok());
    }
}
