//! Report and export — JSON and CSV artifacts for the presentation layer.
//!
//! The core defines no bespoke format: the report is a plain nested
//! structure of names and numbers, serialized as-is. CSV exports exist for
//! spreadsheet-side analysis of summaries and step tapes.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::harness::BacktestRun;
use crate::metrics::StrategyMetrics;

/// Presentation-ready view of one run: summary, drift series, warnings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub strategies: Vec<String>,
    pub step_count: usize,
    pub summary: BTreeMap<String, StrategyMetrics>,
    /// Cumulative running hit@3 rate per strategy, for charting.
    pub cumulative_hit3: BTreeMap<String, Vec<f64>>,
    pub warnings: Vec<String>,
}

/// Reduce a finished run into its report.
pub fn build_report(run: &BacktestRun) -> RunReport {
    RunReport {
        strategies: run.strategies.clone(),
        step_count: run.steps.len(),
        summary: run.summary(),
        cumulative_hit3: run.cumulative_hit3(),
        warnings: run.warnings.clone(),
    }
}

/// Serialize a report to pretty JSON.
pub fn export_json(report: &RunReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize RunReport to JSON")
}

/// Export the per-strategy summary as CSV.
///
/// Columns: strategy, total, hit1, hit1_pct, hit3, hit3_pct, hit5, hit5_pct
pub fn export_summary_csv(summary: &BTreeMap<String, StrategyMetrics>) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record([
        "strategy", "total", "hit1", "hit1_pct", "hit3", "hit3_pct", "hit5", "hit5_pct",
    ])?;
    for (name, m) in summary {
        wtr.write_record([
            name,
            &m.total.to_string(),
            &m.hit1.to_string(),
            &format!("{:.4}", m.hit1_pct),
            &m.hit3.to_string(),
            &format!("{:.4}", m.hit3_pct),
            &m.hit5.to_string(),
            &format!("{:.4}", m.hit5_pct),
        ])?;
    }
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// Export the step tape as CSV, one row per step × strategy.
///
/// Columns: index, date, slot, outcome, strategy, predicted, hit1, hit3, hit5
/// `predicted` is the ranked top-5 joined with `|`; a failed prediction
/// leaves it empty with all hits false.
pub fn export_steps_csv(run: &BacktestRun) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record([
        "index", "date", "slot", "outcome", "strategy", "predicted", "hit1", "hit3", "hit5",
    ])?;
    for step in &run.steps {
        for (name, prediction) in &step.predictions {
            let (predicted, hit1, hit3, hit5) = match prediction {
                Some(p) => (
                    p.top5
                        .iter()
                        .map(|o| o.label())
                        .collect::<Vec<_>>()
                        .join("|"),
                    p.hit1,
                    p.hit3,
                    p.hit5,
                ),
                None => (String::new(), false, false, false),
            };
            wtr.write_record([
                &step.index.to_string(),
                &step.date.to_string(),
                &step.slot,
                step.outcome.label(),
                name,
                &predicted,
                &hit1.to_string(),
                &hit3.to_string(),
                &hit5.to_string(),
            ])?;
        }
    }
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// Paths of the artifacts written by `save_artifacts`.
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub report_json: PathBuf,
    pub summary_csv: PathBuf,
    pub steps_csv: PathBuf,
}

/// Save the full artifact set for one run under `output_dir`.
///
/// Writes `report.json`, `summary.csv` and `steps.csv`; the directory is
/// created if needed.
pub fn save_artifacts(run: &BacktestRun, output_dir: &Path) -> Result<ArtifactPaths> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create artifact dir: {}", output_dir.display()))?;

    let report = build_report(run);
    let paths = ArtifactPaths {
        report_json: output_dir.join("report.json"),
        summary_csv: output_dir.join("summary.csv"),
        steps_csv: output_dir.join("steps.csv"),
    };

    std::fs::write(&paths.report_json, export_json(&report)?)?;
    std::fs::write(&paths.summary_csv, export_summary_csv(&report.summary)?)?;
    std::fs::write(&paths.steps_csv, export_steps_csv(run)?)?;

    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use drawlab_core::patterns::NoPatterns;
    use drawlab_core::scorer::ScorerConfig;
    use drawlab_core::series::DrawSeries;
    use drawlab_core::strategy::StrategyAdapter;
    use drawlab_core::transition::TransitionMode;

    use crate::harness::run_backtest;

    fn sample_run() -> BacktestRun {
        let rows: Vec<(String, String, String)> = (0..15)
            .map(|i| {
                (
                    format!("2025-01-{:02}", i + 1),
                    "09:00 AM".to_string(),
                    if i % 3 == 0 { "7" } else { "21" }.to_string(),
                )
            })
            .collect();
        let series = DrawSeries::from_triples(
            rows.iter().map(|(d, s, o)| (d.as_str(), s.as_str(), o.as_str())),
        )
        .unwrap();
        let mut strategies = [
            StrategyAdapter::transition(TransitionMode::Sequential),
            StrategyAdapter::weighted(ScorerConfig::default(), Box::new(NoPatterns)).unwrap(),
        ];
        run_backtest(
            &series,
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            &mut strategies,
        )
        .unwrap()
    }

    #[test]
    fn report_json_roundtrip() {
        let run = sample_run();
        let report = build_report(&run);
        let json = export_json(&report).unwrap();
        let back: RunReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
        assert_eq!(back.step_count, run.steps.len());
    }

    #[test]
    fn summary_csv_has_one_row_per_strategy() {
        let run = sample_run();
        let csv = export_summary_csv(&run.summary()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3); // header + 2 strategies
        assert_eq!(
            lines[0],
            "strategy,total,hit1,hit1_pct,hit3,hit3_pct,hit5,hit5_pct"
        );
        assert!(lines.iter().any(|l| l.starts_with("transition_sequential,")));
        assert!(lines.iter().any(|l| l.starts_with("weighted_score,")));
    }

    #[test]
    fn steps_csv_has_one_row_per_step_strategy() {
        let run = sample_run();
        let csv = export_steps_csv(&run).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 1 + run.steps.len() * 2);
        assert_eq!(
            lines[0],
            "index,date,slot,outcome,strategy,predicted,hit1,hit3,hit5"
        );
        assert!(lines[1].contains("transition_sequential"));
        assert!(lines[2].contains("weighted_score"));
    }

    #[test]
    fn save_load_artifacts_roundtrip() {
        let run = sample_run();
        let dir = tempfile::tempdir().unwrap();
        let paths = save_artifacts(&run, dir.path()).unwrap();

        assert!(paths.report_json.exists());
        assert!(paths.summary_csv.exists());
        assert!(paths.steps_csv.exists());

        let json = std::fs::read_to_string(&paths.report_json).unwrap();
        let report: RunReport = serde_json::from_str(&json).unwrap();
        assert_eq!(report.summary, run.summary());
    }
}
