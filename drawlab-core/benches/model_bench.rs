//! Model construction benchmarks — transition build vs. incremental sync,
//! and a full scorer pass.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use drawlab_core::data::synthetic_series;
use drawlab_core::patterns::NoPatterns;
use drawlab_core::scorer::{score, ScorerConfig};
use drawlab_core::transition::{TransitionAccumulator, TransitionMode, TransitionModel};

fn bench_transition_build(c: &mut Criterion) {
    let series = synthetic_series(250, &["09:00 AM", "01:00 PM", "04:00 PM", "07:00 PM"], 7);
    let snapshot = series.snapshot();

    c.bench_function("transition_build_1000", |b| {
        b.iter(|| TransitionModel::build(black_box(&snapshot), TransitionMode::Sequential))
    });

    c.bench_function("transition_incremental_replay_1000", |b| {
        b.iter(|| {
            let mut acc = TransitionAccumulator::new(TransitionMode::Sequential);
            for i in 0..=series.len() {
                acc.sync(black_box(&series.truncate_before(i)));
            }
            acc.consumed()
        })
    });
}

fn bench_scorer(c: &mut Criterion) {
    let series = synthetic_series(250, &["09:00 AM", "01:00 PM", "04:00 PM", "07:00 PM"], 7);
    let snapshot = series.snapshot();
    let config = ScorerConfig::default();

    c.bench_function("scorer_full_pass_1000", |b| {
        b.iter(|| score(black_box(&snapshot), &config, &NoPatterns).unwrap())
    });
}

criterion_group!(benches, bench_transition_build, bench_scorer);
criterion_main!(benches);
