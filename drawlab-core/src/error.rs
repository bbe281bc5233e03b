//! Error taxonomy shared across the workspace.
//!
//! Configuration problems are rejected eagerly and loudly; "not enough
//! history yet" is never an error anywhere in the crate — operations on
//! thin series return empty or zeroed results instead.

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::ParseOutcomeError;

/// Invalid configuration, raised at call time and never silently corrected.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown transition mode '{0}' (expected 'sequential' or 'same_slot')")]
    UnknownMode(String),

    #[error("negative weight for {component}: {value}")]
    NegativeWeight { component: &'static str, value: f64 },

    #[error("invalid date range: start {start} is after end {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("duplicate strategy name '{0}'")]
    DuplicateStrategy(String),

    #[error("invalid pattern: {0}")]
    Pattern(#[from] ParseOutcomeError),
}

/// A strategy adapter failing to produce a prediction.
///
/// The harness isolates these per step: the failing strategy records no
/// prediction for that draw and the run continues.
#[derive(Debug, Error)]
pub enum StrategyError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("prediction failed: {0}")]
    Failed(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl StrategyError {
    /// Wrap an arbitrary failure from an external strategy.
    pub fn failed(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        StrategyError::Failed(err.into())
    }
}
