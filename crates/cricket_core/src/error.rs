use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum ScoringError {
    /// The sensing layer produced something outside the closed symbol set.
    #[error("Invalid event symbol: {symbol:?}")]
    InvalidEvent { symbol: String },

    #[error("Invalid overs limit: {overs} (must be 1..={max})")]
    InvalidOversLimit { overs: u32, max: u32 },

    #[error("Invalid match setup: {0}")]
    InvalidSetup(String),

    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ScoringError {
    pub fn invalid_event(symbol: impl Into<String>) -> Self {
        ScoringError::InvalidEvent { symbol: symbol.into() }
    }

    /// Integration bugs in the sensing layer, as opposed to bad user input.
    pub fn is_integration_error(&self) -> bool {
        matches!(self, ScoringError::InvalidEvent { .. } | ScoringError::InvariantViolation(_))
    }
}

pub type Result<T> = std::result::Result<T, ScoringError>;
