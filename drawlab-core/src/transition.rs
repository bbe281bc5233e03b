//! First-order transition model over the outcome sequence.
//!
//! Two construction modes: `sequential` learns the immediately-following
//! draw in full chronological order; `same_slot` learns the same slot label
//! on the next calendar day it occurs. Both are pure reductions over a
//! snapshot. The accumulator variant updates counts as the snapshot
//! boundary advances one draw at a time, which is how the harness uses it.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::{DrawRecord, Outcome};
use crate::error::ConfigError;
use crate::series::SeriesSnapshot;

/// How transitions are extracted from the series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionMode {
    /// Transition = immediately following draw in chronological order.
    Sequential,
    /// Transition = same slot label on the next calendar day it occurs.
    SameSlot,
}

impl TransitionMode {
    pub fn as_str(self) -> &'static str {
        match self {
            TransitionMode::Sequential => "sequential",
            TransitionMode::SameSlot => "same_slot",
        }
    }
}

impl fmt::Display for TransitionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransitionMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sequential" => Ok(TransitionMode::Sequential),
            "same_slot" => Ok(TransitionMode::SameSlot),
            other => Err(ConfigError::UnknownMode(other.to_string())),
        }
    }
}

/// Frequency and first-order conditional-transition tables.
///
/// Read-only after construction. Counts are over *observed* draws only:
/// `next_probs` of a never-seen outcome is an empty map, never a fabricated
/// uniform distribution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransitionModel {
    freq: BTreeMap<Outcome, u32>,
    transitions: BTreeMap<(Outcome, Outcome), u32>,
}

impl TransitionModel {
    /// Build the tables from a snapshot in one pass.
    pub fn build(snapshot: &SeriesSnapshot, mode: TransitionMode) -> Self {
        let mut acc = TransitionAccumulator::new(mode);
        acc.sync(snapshot);
        acc.into_model()
    }

    fn observe(&mut self, outcome: Outcome) {
        *self.freq.entry(outcome).or_insert(0) += 1;
    }

    fn observe_transition(&mut self, prev: Outcome, next: Outcome) {
        *self.transitions.entry((prev, next)).or_insert(0) += 1;
    }

    /// Occurrence count of an outcome.
    pub fn count(&self, outcome: Outcome) -> u32 {
        self.freq.get(&outcome).copied().unwrap_or(0)
    }

    /// Count of the `(prev, next)` transition.
    pub fn transition_count(&self, prev: Outcome, next: Outcome) -> u32 {
        self.transitions.get(&(prev, next)).copied().unwrap_or(0)
    }

    /// Unconditional outcome distribution; empty map for an empty snapshot.
    pub fn global_probs(&self) -> BTreeMap<Outcome, f64> {
        let total: u32 = self.freq.values().sum();
        if total == 0 {
            return BTreeMap::new();
        }
        self.freq
            .iter()
            .map(|(&o, &c)| (o, c as f64 / total as f64))
            .collect()
    }

    /// Conditional distribution over observed successors of `given`.
    ///
    /// Empty map if `given` never occurred or never had a successor.
    pub fn next_probs(&self, given: Outcome) -> BTreeMap<Outcome, f64> {
        let successors: BTreeMap<Outcome, u32> = self
            .transitions
            .iter()
            .filter(|((prev, _), _)| *prev == given)
            .map(|((_, next), &c)| (*next, c))
            .collect();
        let total: u32 = successors.values().sum();
        if total == 0 {
            return BTreeMap::new();
        }
        successors
            .into_iter()
            .map(|(o, c)| (o, c as f64 / total as f64))
            .collect()
    }

    /// The `n` highest-probability successors of `given`, ties broken by
    /// outcome natural sort order ascending.
    pub fn top_n(&self, given: Outcome, n: usize) -> Vec<(Outcome, f64)> {
        rank(self.next_probs(given), n)
    }

    /// The `n` most frequent outcomes overall, same tie-break.
    pub fn top_global(&self, n: usize) -> Vec<(Outcome, f64)> {
        rank(self.global_probs(), n)
    }
}

/// Descending by probability; the BTreeMap feeds outcomes in ascending
/// natural order and the sort is stable, so ties stay ascending.
fn rank(probs: BTreeMap<Outcome, f64>, n: usize) -> Vec<(Outcome, f64)> {
    let mut ranked: Vec<(Outcome, f64)> = probs.into_iter().collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    ranked.truncate(n);
    ranked
}

/// Incrementally maintained transition tables.
///
/// `sync` consumes only the records past the previously seen boundary when
/// the snapshot advanced monotonically, and falls back to a full rebuild
/// when it did not. Valid because snapshots of one series share a prefix.
#[derive(Debug)]
pub struct TransitionAccumulator {
    mode: TransitionMode,
    model: TransitionModel,
    consumed: usize,
    last: Option<Outcome>,
    last_by_slot: HashMap<String, Outcome>,
}

impl TransitionAccumulator {
    pub fn new(mode: TransitionMode) -> Self {
        Self {
            mode,
            model: TransitionModel::default(),
            consumed: 0,
            last: None,
            last_by_slot: HashMap::new(),
        }
    }

    pub fn mode(&self) -> TransitionMode {
        self.mode
    }

    /// Records consumed so far.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Fold one more record into the tables.
    pub fn advance(&mut self, record: &DrawRecord) {
        self.model.observe(record.outcome);
        match self.mode {
            TransitionMode::Sequential => {
                if let Some(prev) = self.last.replace(record.outcome) {
                    self.model.observe_transition(prev, record.outcome);
                }
            }
            TransitionMode::SameSlot => {
                if let Some(prev) = self
                    .last_by_slot
                    .insert(record.slot.clone(), record.outcome)
                {
                    self.model.observe_transition(prev, record.outcome);
                }
            }
        }
        self.consumed += 1;
    }

    /// Bring the tables up to the snapshot boundary.
    pub fn sync(&mut self, snapshot: &SeriesSnapshot) {
        if snapshot.len() < self.consumed {
            *self = Self::new(self.mode);
        }
        for record in &snapshot.records()[self.consumed..] {
            self.advance(record);
        }
    }

    pub fn model(&self) -> &TransitionModel {
        &self.model
    }

    pub fn into_model(self) -> TransitionModel {
        self.model
    }
}
