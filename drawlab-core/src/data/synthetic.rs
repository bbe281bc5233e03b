//! Synthetic draw histories — deterministic fixtures for tests and benches.

use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::{DrawRecord, Outcome, ALPHABET_SIZE};
use crate::series::DrawSeries;

/// First date of every generated history.
const EPOCH: (i32, u32, u32) = (2024, 1, 1);

/// Generate `days × slots.len()` uniformly random draws from a fixed seed.
///
/// Same seed, same series — generated histories are reproducible by
/// construction so they can anchor deterministic tests.
pub fn synthetic_series(days: usize, slots: &[&str], seed: u64) -> DrawSeries {
    let mut rng = StdRng::seed_from_u64(seed);
    let start = NaiveDate::from_ymd_opt(EPOCH.0, EPOCH.1, EPOCH.2)
        .unwrap_or_default();

    let mut records = Vec::with_capacity(days * slots.len());
    for day in 0..days {
        let date = start
            .checked_add_days(Days::new(day as u64))
            .unwrap_or(start);
        for slot in slots {
            let index = rng.gen_range(0..ALPHABET_SIZE);
            let outcome = Outcome::from_index(index).unwrap_or(Outcome::ZERO);
            records.push(DrawRecord::new(date, *slot, outcome));
        }
    }
    DrawSeries::from_records(records, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_series() {
        let a = synthetic_series(10, &["09:00 AM", "01:00 PM"], 42);
        let b = synthetic_series(10, &["09:00 AM", "01:00 PM"], 42);
        assert_eq!(a.records(), b.records());
        assert_eq!(a.len(), 20);
    }

    #[test]
    fn different_seeds_diverge() {
        let a = synthetic_series(25, &["09:00 AM"], 1);
        let b = synthetic_series(25, &["09:00 AM"], 2);
        assert_ne!(a.records(), b.records());
    }

    #[test]
    fn records_are_chronological() {
        let series = synthetic_series(5, &["09:00 AM", "01:00 PM"], 7);
        let dates: Vec<_> = series.records().iter().map(|r| r.date).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted);
    }
}
