//! Backtest harness — replays a series draw by draw, strictly forward.
//!
//! Each retained draw gets a snapshot truncated strictly before it; every
//! enabled strategy predicts from that snapshot alone, so no strategy can
//! see its own future. A strategy failing at a step records no prediction
//! for that step and the run carries on — one broken strategy cannot abort
//! the others.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use drawlab_core::domain::Outcome;
use drawlab_core::error::ConfigError;
use drawlab_core::series::DrawSeries;
use drawlab_core::strategy::StrategyAdapter;

/// Minimum visible history before a draw participates in metrics. Draws
/// behind the gate are excluded entirely, not counted as misses.
pub const WARMUP_MIN_DRAWS: usize = 10;

/// One strategy's ranked prediction at one step, classified against the
/// real outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepPrediction {
    pub top5: Vec<Outcome>,
    pub hit1: bool,
    pub hit3: bool,
    pub hit5: bool,
}

impl StepPrediction {
    /// Classify a ranked prediction against the real outcome.
    pub fn classify(top5: Vec<Outcome>, actual: Outcome) -> Self {
        let position = top5.iter().position(|&o| o == actual);
        Self {
            hit1: position.map_or(false, |p| p == 0),
            hit3: position.map_or(false, |p| p < 3),
            hit5: position.map_or(false, |p| p < 5),
            top5,
        }
    }
}

/// One simulated draw: the truncation index, the real outcome, and each
/// strategy's classified prediction (`None` records a strategy failure).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestStep {
    pub index: usize,
    pub date: NaiveDate,
    pub slot: String,
    pub outcome: Outcome,
    pub predictions: BTreeMap<String, Option<StepPrediction>>,
}

/// Complete result of one harness run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestRun {
    pub steps: Vec<BacktestStep>,
    /// Names of the strategies that were driven, in adapter order.
    pub strategies: Vec<String>,
    /// Per-step strategy failures, surfaced for the presentation layer.
    pub warnings: Vec<String>,
}

impl BacktestRun {
    fn empty(strategies: Vec<String>) -> Self {
        Self {
            steps: Vec::new(),
            strategies,
            warnings: Vec::new(),
        }
    }
}

/// Replay `series` over `[start_date, end_date]`, driving every adapter.
///
/// The window is validated before any snapshot is built; an empty window or
/// a window before the warm-up gate opens yields an empty run, not an
/// error.
pub fn run_backtest(
    series: &DrawSeries,
    start_date: NaiveDate,
    end_date: NaiveDate,
    strategies: &mut [StrategyAdapter],
) -> Result<BacktestRun, ConfigError> {
    if start_date > end_date {
        return Err(ConfigError::InvalidDateRange {
            start: start_date,
            end: end_date,
        });
    }
    let names: Vec<String> = strategies.iter().map(|s| s.name().to_string()).collect();
    for (i, name) in names.iter().enumerate() {
        if names[..i].contains(name) {
            return Err(ConfigError::DuplicateStrategy(name.clone()));
        }
    }

    let records = series.records();
    let start_index = match records.iter().position(|r| r.date >= start_date) {
        Some(index) => index,
        None => return Ok(BacktestRun::empty(names)),
    };

    let mut run = BacktestRun::empty(names);
    for index in start_index..records.len() {
        let record = &records[index];
        if record.date > end_date {
            break;
        }
        // Warm-up gate: too little history to model meaningfully.
        if index < WARMUP_MIN_DRAWS {
            continue;
        }

        let snapshot = series.truncate_before(index);
        let mut predictions = BTreeMap::new();
        for adapter in strategies.iter_mut() {
            let prediction = match adapter.predict_top5(&snapshot) {
                Ok(top5) => Some(StepPrediction::classify(top5, record.outcome)),
                Err(err) => {
                    run.warnings.push(format!(
                        "step {index} ({} {}): strategy '{}' failed: {err}",
                        record.date,
                        record.slot,
                        adapter.name()
                    ));
                    None
                }
            };
            predictions.insert(adapter.name().to_string(), prediction);
        }

        run.steps.push(BacktestStep {
            index,
            date: record.date,
            slot: record.slot.clone(),
            outcome: record.outcome,
            predictions,
        });
    }

    Ok(run)
}
