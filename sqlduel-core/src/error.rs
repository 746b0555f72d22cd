//! Error types for sqlduel operations

use thiserror::Error;

/// Plan-report extraction errors.
///
/// Every variant is fatal for the enclosing reward computation: a cost
/// record is either fully populated by a successful parse or never
/// produced at all.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ParseError {
    #[error("no cost estimate found in plan line: {line:?}")]
    Estimate { line: String },

    #[error("plan report contains no profiled root node (cost=..)(actual time=..)")]
    MissingPlanLine,

    #[error("plan report contains no 'Planning Time:' summary line")]
    MissingPlanningTime,

    #[error("plan report contains no 'Execution Time:' summary line")]
    MissingExecutionTime,

    #[error("plan report is empty")]
    EmptyReport,
}

/// Catalog and game configuration errors.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("{catalog} catalog is empty")]
    EmptyCatalog { catalog: &'static str },

    #[error("duplicate name {name} in {catalog} catalog")]
    DuplicateName { catalog: &'static str, name: String },

    #[error("workload transaction {name} has non-positive weight {weight}")]
    NonPositiveWeight { name: String, weight: f64 },

    #[error("workload transaction {name} has no statements")]
    NoStatements { name: String },

    #[error("tuning action {name} has an empty statement")]
    EmptyStatement { name: String },

    #[error("turn bound {field} must be positive")]
    ZeroBound { field: &'static str },

    #[error("unknown game: {name}")]
    UnknownGame { name: String },

    #[error("invalid game spec: {reason}")]
    InvalidSpec { reason: String },
}

/// Master error type for all sqlduel operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DuelError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// Reward computation failed at the database boundary. Carried as a
    /// string so the core crate stays free of client-library types.
    #[error("reward error: {reason}")]
    Reward { reason: String },
}

/// Result type alias for sqlduel operations.
pub type DuelResult<T> = Result<T, DuelError>;

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display_estimate() {
        let err = ParseError::Estimate {
            line: "Seq Scan on foo".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("no cost estimate"));
        assert!(msg.contains("Seq Scan on foo"));
    }

    #[test]
    fn test_parse_error_display_missing_execution_time() {
        let err = ParseError::MissingExecutionTime;
        let msg = format!("{}", err);
        assert!(msg.contains("Execution Time"));
    }

    #[test]
    fn test_config_error_display_non_positive_weight() {
        let err = ConfigError::NonPositiveWeight {
            name: "new_order".to_string(),
            weight: -0.5,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("new_order"));
        assert!(msg.contains("-0.5"));
    }

    #[test]
    fn test_config_error_display_zero_bound() {
        let err = ConfigError::ZeroBound {
            field: "max_server_turns",
        };
        let msg = format!("{}", err);
        assert!(msg.contains("max_server_turns"));
    }

    #[test]
    fn test_duel_error_from_variants() {
        let parse = DuelError::from(ParseError::MissingPlanLine);
        assert!(matches!(parse, DuelError::Parse(_)));

        let config = DuelError::from(ConfigError::UnknownGame {
            name: "chess".to_string(),
        });
        assert!(matches!(config, DuelError::Config(_)));
    }
}
