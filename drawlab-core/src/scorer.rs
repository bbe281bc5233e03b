//! Weighted scorer — blends five signals into one ranked list.
//!
//! Frequency, absence ("atraso"), transition probability, sector coverage
//! and active-pattern bonus, each normalized to `[0, 1]`, weighted and
//! summed per outcome. Pure function of the snapshot, the weight config and
//! the pattern source; scores are comparable only within one call.

use serde::{Deserialize, Serialize};

use crate::domain::{groups, Outcome, Sector, ALPHABET_SIZE};
use crate::error::ConfigError;
use crate::patterns::PatternSource;
use crate::series::SeriesSnapshot;
use crate::transition::{TransitionMode, TransitionModel};

/// Draws inspected by the coverage signal when not overridden.
pub const DEFAULT_COVERAGE_WINDOW: usize = 24;

/// Absence boost for outcomes never seen in the snapshot. The boost and the
/// 1.0 clamp are deliberate as tuned: total absence outranks merely-long
/// absence, but cannot dominate the sort on its own.
pub const NEVER_SEEN_BOOST: f64 = 1.2;

/// Weight configuration for the five signals plus the coverage window.
///
/// Weights are non-negative and need not sum to 1; nothing is normalized on
/// the caller's behalf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScorerConfig {
    pub frequency: f64,
    pub absence: f64,
    pub transition: f64,
    pub coverage: f64,
    pub pattern: f64,
    pub coverage_window: usize,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            frequency: 0.2,
            absence: 0.3,
            transition: 0.3,
            coverage: 0.1,
            pattern: 0.1,
            coverage_window: DEFAULT_COVERAGE_WINDOW,
        }
    }
}

impl ScorerConfig {
    /// Reject negative weights. Raised at call time, never corrected.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (component, value) in [
            ("frequency", self.frequency),
            ("absence", self.absence),
            ("transition", self.transition),
            ("coverage", self.coverage),
            ("pattern", self.pattern),
        ] {
            if value < 0.0 {
                return Err(ConfigError::NegativeWeight { component, value });
            }
        }
        Ok(())
    }
}

/// Per-outcome score with its components and raw supporting values.
///
/// Ephemeral: recomputed on every call, never persisted by the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreItem {
    pub outcome: Outcome,
    pub total: f64,
    pub frequency_score: f64,
    pub absence_score: f64,
    pub transition_score: f64,
    pub coverage_score: f64,
    pub pattern_score: f64,
    /// Occurrences in the snapshot.
    pub occurrences: u32,
    /// Draws elapsed since last seen; `None` if never seen.
    pub draws_since_seen: Option<usize>,
    pub sector: Sector,
}

/// Score every outcome against the snapshot, ranked descending by total
/// (ties by outcome natural order for determinism).
pub fn score(
    snapshot: &SeriesSnapshot,
    config: &ScorerConfig,
    patterns: &dyn PatternSource,
) -> Result<Vec<ScoreItem>, ConfigError> {
    config.validate()?;

    let records = snapshot.records();
    let len = records.len();

    // One pass: occurrence counts and last-seen indices.
    let mut counts = [0u32; ALPHABET_SIZE];
    let mut last_seen = [None::<usize>; ALPHABET_SIZE];
    for (i, record) in records.iter().enumerate() {
        counts[record.outcome.index()] += 1;
        last_seen[record.outcome.index()] = Some(i);
    }
    let max_count = counts.iter().copied().max().unwrap_or(0);
    let max_since = last_seen
        .iter()
        .flatten()
        .map(|&idx| len - 1 - idx)
        .max()
        .unwrap_or(0);

    // Conditional distribution after the most recent draw.
    let next_probs = if len >= 2 {
        let model = TransitionModel::build(snapshot, TransitionMode::Sequential);
        // len >= 2 implies a last record exists
        model.next_probs(records[len - 1].outcome)
    } else {
        Default::default()
    };

    // Sector coverage over the recent window.
    let window: Vec<Outcome> = snapshot
        .tail(config.coverage_window)
        .iter()
        .map(|r| r.outcome)
        .collect();
    let sector_shares = groups::sector_shares(&window);

    // Active-pattern bonus: best completion fraction per expected outcome.
    let history: Vec<Outcome> = snapshot.outcomes().collect();
    let mut pattern_bonus = [0.0f64; ALPHABET_SIZE];
    for active in patterns.active_patterns(&history) {
        let slot = &mut pattern_bonus[active.expected_next.index()];
        if active.progress > *slot {
            *slot = active.progress;
        }
    }

    let mut items: Vec<ScoreItem> = Outcome::all()
        .map(|outcome| {
            let idx = outcome.index();

            let frequency_score = if max_count > 0 {
                counts[idx] as f64 / max_count as f64
            } else {
                0.0
            };

            let (absence_score, draws_since_seen) = match last_seen[idx] {
                Some(seen) => {
                    let since = len - 1 - seen;
                    let s = if max_since > 0 {
                        (since as f64 / max_since as f64).min(1.0)
                    } else {
                        0.0
                    };
                    (s, Some(since))
                }
                None => {
                    let boosted = max_since as f64 * NEVER_SEEN_BOOST;
                    let s = if max_since > 0 {
                        (boosted / max_since as f64).min(1.0)
                    } else {
                        0.0
                    };
                    (s, None)
                }
            };

            let transition_score = next_probs.get(&outcome).copied().unwrap_or(0.0);
            let sector = outcome.sector();
            let coverage_score = sector_shares[sector as usize];
            let pattern_score = pattern_bonus[idx];

            let total = frequency_score * config.frequency
                + absence_score * config.absence
                + transition_score * config.transition
                + coverage_score * config.coverage
                + pattern_score * config.pattern;

            ScoreItem {
                outcome,
                total,
                frequency_score,
                absence_score,
                transition_score,
                coverage_score,
                pattern_score,
                occurrences: counts[idx],
                draws_since_seen,
                sector,
            }
        })
        .collect();

    items.sort_by(|a, b| {
        b.total
            .partial_cmp(&a.total)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.outcome.cmp(&b.outcome))
    });

    Ok(items)
}
