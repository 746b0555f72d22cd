//! Error types for live reward measurement

use sqlduel_core::{ConfigError, DuelError, ParseError};
use thiserror::Error;

/// Reward computation errors. Every variant is fatal for the enclosing
/// replay: the outer transaction scope is released and no partial payoff
/// is surfaced.
#[derive(Debug, Error)]
pub enum RewardError {
    #[error("database error: {0}")]
    Db(#[from] postgres::Error),

    #[error("plan parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

impl From<RewardError> for DuelError {
    fn from(err: RewardError) -> Self {
        match err {
            RewardError::Parse(parse) => DuelError::Parse(parse),
            RewardError::Config(config) => DuelError::Config(config),
            RewardError::Db(db) => DuelError::Reward {
                reason: db.to_string(),
            },
        }
    }
}

/// Result type alias for reward operations.
pub type RewardResult<T> = Result<T, RewardError>;

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_maps_to_core_parse_variant() {
        let err: DuelError = RewardError::from(ParseError::MissingExecutionTime).into();
        assert_eq!(err, DuelError::Parse(ParseError::MissingExecutionTime));
    }

    #[test]
    fn test_config_error_maps_to_core_config_variant() {
        let source = ConfigError::UnknownGame {
            name: "chess".to_string(),
        };
        let err: DuelError = RewardError::from(source.clone()).into();
        assert_eq!(err, DuelError::Config(source));
    }
}
