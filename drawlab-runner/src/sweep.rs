//! Weight sweep — parallel evaluation of scorer configurations.
//!
//! Steps within one run are inherently sequential (later snapshots depend
//! on earlier draws), but independent runs are embarrassingly parallel:
//! each worker owns its own adapter and a read-only view of the shared
//! series, and results are collected only after every run completes.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rayon::prelude::*;

use drawlab_core::patterns::{NoPatterns, PatternBook, PatternSource};
use drawlab_core::scorer::{ScorerConfig, DEFAULT_COVERAGE_WINDOW};
use drawlab_core::series::DrawSeries;
use drawlab_core::strategy::StrategyAdapter;

use crate::config::{BacktestConfig, RunId, StrategySpec};
use crate::harness::run_backtest;
use crate::metrics::StrategyMetrics;

/// Candidate weight values per scorer component.
#[derive(Debug, Clone)]
pub struct WeightGrid {
    pub frequency: Vec<f64>,
    pub absence: Vec<f64>,
    pub transition: Vec<f64>,
    pub coverage: Vec<f64>,
    pub pattern: Vec<f64>,
    pub coverage_window: usize,
}

impl WeightGrid {
    /// A coarse grid around the named default weights.
    pub fn coarse_default() -> Self {
        Self {
            frequency: vec![0.1, 0.2, 0.3],
            absence: vec![0.2, 0.3, 0.4],
            transition: vec![0.2, 0.3, 0.4],
            coverage: vec![0.0, 0.1],
            pattern: vec![0.0, 0.1],
            coverage_window: DEFAULT_COVERAGE_WINDOW,
        }
    }

    /// Total number of configurations in this grid.
    pub fn size(&self) -> usize {
        self.frequency.len()
            * self.absence.len()
            * self.transition.len()
            * self.coverage.len()
            * self.pattern.len()
    }

    /// All configurations in the grid, in a deterministic order.
    pub fn generate_configs(&self) -> Vec<ScorerConfig> {
        let mut configs = Vec::with_capacity(self.size());
        for &frequency in &self.frequency {
            for &absence in &self.absence {
                for &transition in &self.transition {
                    for &coverage in &self.coverage {
                        for &pattern in &self.pattern {
                            configs.push(ScorerConfig {
                                frequency,
                                absence,
                                transition,
                                coverage,
                                pattern,
                                coverage_window: self.coverage_window,
                            });
                        }
                    }
                }
            }
        }
        configs
    }
}

/// One evaluated configuration.
#[derive(Debug, Clone)]
pub struct SweepEntry {
    pub run_id: RunId,
    pub config: ScorerConfig,
    pub metrics: StrategyMetrics,
}

/// Results of a weight sweep, rankable by hit@3 rate.
#[derive(Debug, Clone)]
pub struct SweepResults {
    entries: Vec<SweepEntry>,
}

impl SweepResults {
    pub fn all(&self) -> &[SweepEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, run_id: &str) -> Option<&SweepEntry> {
        self.entries.iter().find(|e| e.run_id == run_id)
    }

    /// Entries sorted by hit@3 rate descending (ties keep grid order).
    pub fn sorted_by_hit3(&self) -> Vec<&SweepEntry> {
        let mut sorted: Vec<&SweepEntry> = self.entries.iter().collect();
        sorted.sort_by(|a, b| {
            b.metrics
                .hit3_pct
                .partial_cmp(&a.metrics.hit3_pct)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        sorted
    }

    pub fn top_n(&self, n: usize) -> Vec<&SweepEntry> {
        self.sorted_by_hit3().into_iter().take(n).collect()
    }

    pub fn best(&self) -> Option<&SweepEntry> {
        self.sorted_by_hit3().into_iter().next()
    }
}

/// Evaluate every configuration in the grid over the same window.
///
/// Each configuration is one independent backtest run dispatched across the
/// rayon pool. `pattern_specs` seeds a fresh pattern book per worker (the
/// book itself is cheap; sharing it would serialize nothing anyway).
pub fn sweep_weights(
    series: &DrawSeries,
    start_date: NaiveDate,
    end_date: NaiveDate,
    grid: &WeightGrid,
    pattern_specs: &[String],
) -> Result<SweepResults> {
    let configs = grid.generate_configs();

    let entries: Vec<SweepEntry> = configs
        .into_par_iter()
        .map(|config| {
            let patterns: Box<dyn PatternSource> = if pattern_specs.is_empty() {
                Box::new(NoPatterns)
            } else {
                Box::new(
                    PatternBook::with_patterns(pattern_specs.iter().map(String::as_str))
                        .context("invalid pattern spec")?,
                )
            };
            let mut adapters =
                vec![StrategyAdapter::weighted(config.clone(), patterns)
                    .context("invalid scorer config")?];

            let run = run_backtest(series, start_date, end_date, &mut adapters)
                .context("backtest run failed")?;
            let summary = run.summary();
            let metrics = summary
                .get("weighted_score")
                .cloned()
                .unwrap_or_default();

            let run_id = BacktestConfig {
                start_date,
                end_date,
                strategies: vec![StrategySpec::Weighted {
                    scorer: config.clone(),
                    patterns: pattern_specs.to_vec(),
                }],
            }
            .run_id();

            Ok(SweepEntry {
                run_id,
                config,
                metrics,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(SweepResults { entries })
}
