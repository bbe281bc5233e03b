//! Property tests for harness and metrics invariants.
//!
//! Uses proptest to verify:
//! 1. Hit monotonicity — hit1_pct ≤ hit3_pct ≤ hit5_pct for every strategy
//! 2. Warm-up gating — no retained step has fewer than 10 visible draws
//! 3. Step ordering — steps advance strictly forward in index
//! 4. Replay determinism — the same run twice is identical

use proptest::prelude::*;

use chrono::NaiveDate;

use drawlab_core::data::synthetic_series;
use drawlab_core::patterns::NoPatterns;
use drawlab_core::scorer::ScorerConfig;
use drawlab_core::series::DrawSeries;
use drawlab_core::strategy::StrategyAdapter;
use drawlab_core::transition::TransitionMode;

use drawlab_runner::harness::{run_backtest, WARMUP_MIN_DRAWS};
use drawlab_runner::metrics::aggregate;

fn adapters() -> Vec<StrategyAdapter> {
    vec![
        StrategyAdapter::transition(TransitionMode::Sequential),
        StrategyAdapter::transition(TransitionMode::SameSlot),
        StrategyAdapter::weighted(ScorerConfig::default(), Box::new(NoPatterns)).unwrap(),
    ]
}

fn arb_series() -> impl Strategy<Value = DrawSeries> {
    (1usize..50, any::<u64>())
        .prop_map(|(days, seed)| synthetic_series(days, &["09:00 AM", "01:00 PM"], seed))
}

fn window() -> (NaiveDate, NaiveDate) {
    (
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
    )
}

proptest! {
    #[test]
    fn hit_rates_are_monotone_in_k(series in arb_series()) {
        let (start, end) = window();
        let mut strategies = adapters();
        let run = run_backtest(&series, start, end, &mut strategies).unwrap();
        let summary = aggregate(&run.steps, &run.strategies);
        prop_assert_eq!(summary.len(), run.strategies.len());
        for (name, metrics) in &summary {
            prop_assert!(
                metrics.hit1_pct <= metrics.hit3_pct && metrics.hit3_pct <= metrics.hit5_pct,
                "non-monotone hit rates for {}: {} / {} / {}",
                name, metrics.hit1_pct, metrics.hit3_pct, metrics.hit5_pct
            );
            prop_assert!(metrics.hit5 <= metrics.total);
        }
    }

    #[test]
    fn warmup_gate_holds(series in arb_series()) {
        let (start, end) = window();
        let mut strategies = adapters();
        let run = run_backtest(&series, start, end, &mut strategies).unwrap();
        for step in &run.steps {
            prop_assert!(step.index >= WARMUP_MIN_DRAWS);
        }
    }

    #[test]
    fn steps_advance_strictly_forward(series in arb_series()) {
        let (start, end) = window();
        let mut strategies = adapters();
        let run = run_backtest(&series, start, end, &mut strategies).unwrap();
        for pair in run.steps.windows(2) {
            prop_assert!(pair[0].index < pair[1].index);
        }
    }

    #[test]
    fn replay_is_deterministic(series in arb_series()) {
        let (start, end) = window();
        let mut first = adapters();
        let mut second = adapters();
        let run_a = run_backtest(&series, start, end, &mut first).unwrap();
        let run_b = run_backtest(&series, start, end, &mut second).unwrap();
        prop_assert_eq!(run_a, run_b);
    }
}
