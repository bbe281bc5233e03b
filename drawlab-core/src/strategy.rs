//! Strategy adapters — the single capability the harness understands.
//!
//! Every predictive strategy, built-in or external, is driven through
//! `predict_top5(snapshot)`. The adapter resolves its concrete behavior at
//! construction time (tagged variants), not by runtime type inspection, and
//! never sees anything but the truncated snapshot — which is what enforces
//! the no-lookahead invariant by construction.

use crate::domain::Outcome;
use crate::error::{ConfigError, StrategyError};
use crate::patterns::PatternSource;
use crate::scorer::{self, ScorerConfig};
use crate::series::SeriesSnapshot;
use crate::transition::{TransitionAccumulator, TransitionMode};

/// Number of ranked outcomes a prediction carries.
pub const TOP_N: usize = 5;

/// Contract for external strategies (e.g. a trained classifier).
///
/// Implementations must derive their prediction from the snapshot alone.
/// Returning fewer than five outcomes is allowed; a too-short history
/// should yield an empty prediction rather than an error.
pub trait Strategy: Send {
    fn name(&self) -> &str;

    /// Ranked outcomes, best first, at most five are used.
    fn predict_top5(&mut self, snapshot: &SeriesSnapshot) -> Result<Vec<Outcome>, StrategyError>;
}

enum AdapterKind {
    Transition { acc: TransitionAccumulator },
    Weighted {
        config: ScorerConfig,
        patterns: Box<dyn PatternSource>,
    },
    External { inner: Box<dyn Strategy> },
}

/// A named, uniformly drivable strategy.
pub struct StrategyAdapter {
    name: String,
    kind: AdapterKind,
}

impl StrategyAdapter {
    /// Transition-model strategy: top successors of the most recent draw.
    pub fn transition(mode: TransitionMode) -> Self {
        Self {
            name: format!("transition_{mode}"),
            kind: AdapterKind::Transition {
                acc: TransitionAccumulator::new(mode),
            },
        }
    }

    /// Weighted-scorer strategy. The config is validated eagerly.
    pub fn weighted(
        config: ScorerConfig,
        patterns: Box<dyn PatternSource>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            name: "weighted_score".to_string(),
            kind: AdapterKind::Weighted { config, patterns },
        })
    }

    /// Wrap an external strategy; its own name is used.
    pub fn external(inner: Box<dyn Strategy>) -> Self {
        Self {
            name: inner.name().to_string(),
            kind: AdapterKind::External { inner },
        }
    }

    /// Override the display name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ranked top-5 prediction from the snapshot.
    ///
    /// Too little history is not a failure: the prediction is empty. Only
    /// external strategies can genuinely error here.
    pub fn predict_top5(
        &mut self,
        snapshot: &SeriesSnapshot,
    ) -> Result<Vec<Outcome>, StrategyError> {
        match &mut self.kind {
            AdapterKind::Transition { acc } => {
                acc.sync(snapshot);
                if snapshot.len() < 2 {
                    return Ok(Vec::new());
                }
                let last = match snapshot.last() {
                    Some(record) => record.outcome,
                    None => return Ok(Vec::new()),
                };
                Ok(acc
                    .model()
                    .top_n(last, TOP_N)
                    .into_iter()
                    .map(|(outcome, _)| outcome)
                    .collect())
            }
            AdapterKind::Weighted { config, patterns } => {
                let items = scorer::score(snapshot, config, patterns.as_ref())?;
                Ok(items.into_iter().take(TOP_N).map(|i| i.outcome).collect())
            }
            AdapterKind::External { inner } => {
                let mut prediction = inner.predict_top5(snapshot)?;
                prediction.truncate(TOP_N);
                Ok(prediction)
            }
        }
    }
}

impl std::fmt::Debug for StrategyAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self.kind {
            AdapterKind::Transition { .. } => "transition",
            AdapterKind::Weighted { .. } => "weighted",
            AdapterKind::External { .. } => "external",
        };
        f.debug_struct("StrategyAdapter")
            .field("name", &self.name)
            .field("kind", &kind)
            .finish()
    }
}
