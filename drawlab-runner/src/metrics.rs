//! Hit-rate metrics — pure reductions over recorded backtest steps.
//!
//! A strategy's `total` counts every step it participated in, including
//! steps where it failed to produce a prediction; failures count against
//! every hit rate. An empty step list yields all-zero metrics, never an
//! error.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::harness::{BacktestRun, BacktestStep};

/// Aggregate Top-1/Top-3/Top-5 counts and rates for one strategy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StrategyMetrics {
    pub total: usize,
    pub hit1: usize,
    pub hit1_pct: f64,
    pub hit3: usize,
    pub hit3_pct: f64,
    pub hit5: usize,
    pub hit5_pct: f64,
}

impl StrategyMetrics {
    fn pct(hits: usize, total: usize) -> f64 {
        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        }
    }
}

/// Reduce recorded steps into per-strategy metrics.
///
/// Every requested strategy gets an entry; ones that never participated
/// get all zeros.
pub fn aggregate(steps: &[BacktestStep], strategies: &[String]) -> BTreeMap<String, StrategyMetrics> {
    let mut summary = BTreeMap::new();
    for name in strategies {
        let mut metrics = StrategyMetrics::default();
        for step in steps {
            let Some(prediction) = step.predictions.get(name) else {
                continue;
            };
            metrics.total += 1;
            if let Some(p) = prediction {
                metrics.hit1 += usize::from(p.hit1);
                metrics.hit3 += usize::from(p.hit3);
                metrics.hit5 += usize::from(p.hit5);
            }
        }
        metrics.hit1_pct = StrategyMetrics::pct(metrics.hit1, metrics.total);
        metrics.hit3_pct = StrategyMetrics::pct(metrics.hit3, metrics.total);
        metrics.hit5_pct = StrategyMetrics::pct(metrics.hit5, metrics.total);
        summary.insert(name.clone(), metrics);
    }
    summary
}

/// Cumulative running hit@3 percentage for one strategy: index = steps seen
/// so far, value = cumulative hits / steps. Suitable for charting drift.
pub fn cumulative_hit3(steps: &[BacktestStep], strategy: &str) -> Vec<f64> {
    let mut series = Vec::new();
    let mut seen = 0usize;
    let mut hits = 0usize;
    for step in steps {
        let Some(prediction) = step.predictions.get(strategy) else {
            continue;
        };
        seen += 1;
        if prediction.as_ref().is_some_and(|p| p.hit3) {
            hits += 1;
        }
        series.push(hits as f64 / seen as f64);
    }
    series
}

impl BacktestRun {
    /// Per-strategy summary over this run's steps.
    pub fn summary(&self) -> BTreeMap<String, StrategyMetrics> {
        aggregate(&self.steps, &self.strategies)
    }

    /// Cumulative hit@3 series for every strategy in this run.
    pub fn cumulative_hit3(&self) -> BTreeMap<String, Vec<f64>> {
        self.strategies
            .iter()
            .map(|name| (name.clone(), cumulative_hit3(&self.steps, name)))
            .collect()
    }
}
