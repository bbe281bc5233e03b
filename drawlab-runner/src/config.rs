//! Serializable backtest configuration.
//!
//! A `BacktestConfig` captures everything needed to reproduce a run: the
//! date window and the strategy lineup with their parameters. Configs are
//! validated eagerly — every configuration problem surfaces before any
//! snapshot is built — and hash to a content-addressed `run_id` so
//! identical runs share an identity across sweeps and artifacts.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use drawlab_core::error::ConfigError;
use drawlab_core::patterns::{NoPatterns, PatternBook, PatternSource};
use drawlab_core::scorer::ScorerConfig;
use drawlab_core::strategy::StrategyAdapter;
use drawlab_core::transition::TransitionMode;

/// Unique identifier for a backtest run (content-addressable hash).
pub type RunId = String;

/// Errors loading a config from disk or TOML text.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to parse config TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Serializable configuration for a single backtest run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BacktestConfig {
    /// Simulation window start (inclusive).
    pub start_date: NaiveDate,

    /// Simulation window end (inclusive).
    pub end_date: NaiveDate,

    /// Strategies to drive through the window.
    pub strategies: Vec<StrategySpec>,
}

/// Strategy configuration (serializable enum mirroring the adapter
/// variants; external strategies are attached by the caller, not config).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StrategySpec {
    /// Transition model over the given mode.
    Transition { mode: TransitionMode },

    /// Weighted scorer with optional weight overrides and pattern specs.
    Weighted {
        #[serde(default)]
        scorer: ScorerConfig,
        #[serde(default)]
        patterns: Vec<String>,
    },
}

impl StrategySpec {
    /// The name the adapter (and therefore metrics) will carry.
    pub fn display_name(&self) -> String {
        match self {
            StrategySpec::Transition { mode } => format!("transition_{mode}"),
            StrategySpec::Weighted { .. } => "weighted_score".to_string(),
        }
    }

    /// Resolve into a concrete adapter.
    pub fn build(&self) -> Result<StrategyAdapter, ConfigError> {
        match self {
            StrategySpec::Transition { mode } => Ok(StrategyAdapter::transition(*mode)),
            StrategySpec::Weighted { scorer, patterns } => {
                let source: Box<dyn PatternSource> = if patterns.is_empty() {
                    Box::new(NoPatterns)
                } else {
                    Box::new(PatternBook::with_patterns(
                        patterns.iter().map(String::as_str),
                    )?)
                };
                StrategyAdapter::weighted(scorer.clone(), source)
            }
        }
    }
}

impl BacktestConfig {
    /// Reject malformed date ranges and invalid strategy parameters before
    /// any simulation starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.start_date > self.end_date {
            return Err(ConfigError::InvalidDateRange {
                start: self.start_date,
                end: self.end_date,
            });
        }
        let mut names: Vec<String> = Vec::with_capacity(self.strategies.len());
        for spec in &self.strategies {
            if let StrategySpec::Weighted { scorer, patterns } = spec {
                scorer.validate()?;
                for pattern in patterns {
                    PatternBook::new().add(pattern)?;
                }
            }
            let name = spec.display_name();
            if names.contains(&name) {
                return Err(ConfigError::DuplicateStrategy(name));
            }
            names.push(name);
        }
        Ok(())
    }

    /// Resolve every spec into a concrete adapter.
    pub fn build_adapters(&self) -> Result<Vec<StrategyAdapter>, ConfigError> {
        self.strategies.iter().map(StrategySpec::build).collect()
    }

    /// Computes a deterministic hash ID for this configuration.
    ///
    /// Two runs with identical configs share a RunId, which is what the
    /// sweep uses to key its result table.
    pub fn run_id(&self) -> RunId {
        let json = serde_json::to_string(self).expect("BacktestConfig serialization failed");
        let hash = blake3::hash(json.as_bytes());
        hash.to_hex().to_string()
    }

    /// Parse and validate a config from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigFileError> {
        let config: BacktestConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config from a TOML file.
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigFileError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}
