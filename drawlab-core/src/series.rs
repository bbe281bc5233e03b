//! DrawSeries — the ordered draw history and its prefix snapshots.
//!
//! The series is built once from ingested history and read-only after
//! construction. Snapshots share the backing storage, so truncating at any
//! index is O(1); a snapshot is the unit of "information available at time
//! t" and the only thing strategies ever see during a backtest.

use std::sync::Arc;

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::{DrawRecord, Outcome, ParseOutcomeError, SlotOrder};

/// Error building a series from raw history rows.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("row {row}: invalid date '{value}' (expected YYYY-MM-DD)")]
    InvalidDate { row: usize, value: String },

    #[error("row {row}: {source}")]
    UnknownOutcome {
        row: usize,
        #[source]
        source: ParseOutcomeError,
    },

    #[error("csv: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Ordered, immutable draw history.
///
/// Records are ordered by `(date, slot rank)`; no two records share a
/// `(date, slot)` key. Backing storage is shared with every snapshot.
#[derive(Debug, Clone)]
pub struct DrawSeries {
    records: Arc<[DrawRecord]>,
    slot_order: SlotOrder,
}

impl DrawSeries {
    /// Build a series from records, deduplicating by `(date, slot)` with
    /// later entries overwriting earlier ones (corrections).
    ///
    /// `slot_order` overrides the derived chronological ordering of slot
    /// labels when supplied.
    pub fn from_records(records: Vec<DrawRecord>, slot_order: Option<SlotOrder>) -> Self {
        let slot_order = slot_order
            .unwrap_or_else(|| SlotOrder::derive(records.iter().map(|r| r.slot.clone())));

        // Last write wins per key.
        let mut deduped: Vec<DrawRecord> = Vec::with_capacity(records.len());
        for record in records {
            if let Some(existing) = deduped.iter_mut().find(|r| r.key() == record.key()) {
                *existing = record;
            } else {
                deduped.push(record);
            }
        }

        deduped.sort_by(|a, b| {
            a.date
                .cmp(&b.date)
                .then_with(|| slot_order.rank(&a.slot).cmp(&slot_order.rank(&b.slot)))
        });

        Self {
            records: deduped.into(),
            slot_order,
        }
    }

    /// Build a series from `(date, slot, outcome)` string triples, the
    /// ingestion interface. Dates are ISO-8601; duplicate keys overwrite.
    pub fn from_triples<'a, I>(triples: I) -> Result<Self, IngestError>
    where
        I: IntoIterator<Item = (&'a str, &'a str, &'a str)>,
    {
        let mut records = Vec::new();
        for (row, (date, slot, outcome)) in triples.into_iter().enumerate() {
            let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|_| {
                IngestError::InvalidDate {
                    row,
                    value: date.to_string(),
                }
            })?;
            let outcome: Outcome = outcome
                .parse()
                .map_err(|source| IngestError::UnknownOutcome { row, source })?;
            records.push(DrawRecord::new(date, slot.trim(), outcome));
        }
        Ok(Self::from_records(records, None))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[DrawRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&DrawRecord> {
        self.records.get(index)
    }

    pub fn slot_order(&self) -> &SlotOrder {
        &self.slot_order
    }

    /// Read-only view of the records `[0, index)`. O(1): the backing
    /// storage is shared, never copied. `index` past the end is clamped.
    pub fn truncate_before(&self, index: usize) -> SeriesSnapshot {
        SeriesSnapshot {
            records: Arc::clone(&self.records),
            len: index.min(self.records.len()),
        }
    }

    /// Snapshot covering the whole series.
    pub fn snapshot(&self) -> SeriesSnapshot {
        self.truncate_before(self.records.len())
    }
}

/// Read-only prefix view of a series.
#[derive(Debug, Clone)]
pub struct SeriesSnapshot {
    records: Arc<[DrawRecord]>,
    len: usize,
}

impl SeriesSnapshot {
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn records(&self) -> &[DrawRecord] {
        &self.records[..self.len]
    }

    pub fn get(&self, index: usize) -> Option<&DrawRecord> {
        self.records().get(index)
    }

    /// Most recent visible draw.
    pub fn last(&self) -> Option<&DrawRecord> {
        self.records().last()
    }

    /// The most recent `n` visible draws, oldest first.
    pub fn tail(&self, n: usize) -> &[DrawRecord] {
        let records = self.records();
        &records[records.len().saturating_sub(n)..]
    }

    /// Visible outcomes in chronological order.
    pub fn outcomes(&self) -> impl Iterator<Item = Outcome> + '_ {
        self.records().iter().map(|r| r.outcome)
    }
}
