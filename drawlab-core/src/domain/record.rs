//! DrawRecord — one draw at one `(date, slot)` key.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::outcome::Outcome;

/// A single recorded draw. Immutable once recorded; uniquely keyed by
/// `(date, slot)` within a series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawRecord {
    pub date: NaiveDate,
    pub slot: String,
    pub outcome: Outcome,
}

impl DrawRecord {
    pub fn new(date: NaiveDate, slot: impl Into<String>, outcome: Outcome) -> Self {
        Self {
            date,
            slot: slot.into(),
            outcome,
        }
    }

    /// The unique key of this record within a series.
    pub fn key(&self) -> (NaiveDate, &str) {
        (self.date, self.slot.as_str())
    }
}
