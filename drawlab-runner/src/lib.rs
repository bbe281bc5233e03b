//! DrawLab Runner — backtest orchestration, metrics, sweeps, export.
//!
//! This crate builds on `drawlab-core` to provide:
//! - Serializable run configuration with content-addressed run IDs
//! - The forward-replay harness with warm-up gating and failure isolation
//! - Top-1/Top-3/Top-5 metrics aggregation and drift series
//! - Parallel weight sweeps over a shared immutable series
//! - JSON/CSV artifact export

pub mod config;
pub mod export;
pub mod harness;
pub mod metrics;
pub mod sweep;

pub use config::{BacktestConfig, ConfigFileError, RunId, StrategySpec};
pub use export::{
    build_report, export_json, export_steps_csv, export_summary_csv, save_artifacts,
    ArtifactPaths, RunReport,
};
pub use harness::{run_backtest, BacktestRun, BacktestStep, StepPrediction, WARMUP_MIN_DRAWS};
pub use metrics::{aggregate, cumulative_hit3, StrategyMetrics};
pub use sweep::{sweep_weights, SweepEntry, SweepResults, WeightGrid};

#[cfg(test)]
mod send_sync_checks {
    use super::*;

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn result_types_are_send_sync() {
        assert_send::<BacktestRun>();
        assert_sync::<BacktestRun>();
        assert_send::<BacktestStep>();
        assert_sync::<BacktestStep>();
        assert_send::<StrategyMetrics>();
        assert_sync::<StrategyMetrics>();
        assert_send::<RunReport>();
        assert_sync::<RunReport>();
    }

    #[test]
    fn config_types_are_send_sync() {
        assert_send::<BacktestConfig>();
        assert_sync::<BacktestConfig>();
        assert_send::<StrategySpec>();
        assert_sync::<StrategySpec>();
    }

    #[test]
    fn sweep_types_are_send_sync() {
        assert_send::<WeightGrid>();
        assert_sync::<WeightGrid>();
        assert_send::<SweepEntry>();
        assert_sync::<SweepEntry>();
        assert_send::<SweepResults>();
        assert_sync::<SweepResults>();
    }
}
