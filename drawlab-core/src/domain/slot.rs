//! Slot ordering — chronological ranking of time-of-day labels.
//!
//! Slot labels are free-form strings (`"09:00 AM"`, `"14:30"`, `"noon"`).
//! Within a day, an explicit caller-supplied ordering wins; otherwise labels
//! that parse as clock times sort chronologically and unparseable labels
//! keep first-appearance insertion order, after the parseable ones.

use chrono::NaiveTime;

/// Try to read a chronological meaning out of a slot label.
///
/// Accepts 12-hour (`"09:00 AM"`) and 24-hour (`"14:30"`) clock forms.
pub fn parse_slot_time(label: &str) -> Option<NaiveTime> {
    let trimmed = label.trim();
    NaiveTime::parse_from_str(trimmed, "%I:%M %p")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
        .ok()
}

/// A fixed ordering of the slot labels seen in a series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotOrder {
    labels: Vec<String>,
}

impl SlotOrder {
    /// Ordering derived from labels in first-appearance order: parseable
    /// clock times sort chronologically, the rest keep insertion order and
    /// follow them.
    pub fn derive<I, S>(insertion: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut labels: Vec<String> = Vec::new();
        for label in insertion {
            let label = label.into();
            if !labels.contains(&label) {
                labels.push(label);
            }
        }
        // Stable sort: unparseable labels all compare equal and after any
        // parseable one, so their insertion order survives.
        labels.sort_by(|a, b| match (parse_slot_time(a), parse_slot_time(b)) {
            (Some(ta), Some(tb)) => ta.cmp(&tb),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        Self { labels }
    }

    /// Explicit caller-supplied ordering; duplicates are dropped.
    pub fn explicit<I, S>(order: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut labels: Vec<String> = Vec::new();
        for label in order {
            let label = label.into();
            if !labels.contains(&label) {
                labels.push(label);
            }
        }
        Self { labels }
    }

    /// Rank of a label within a day. Labels outside the ordering rank last.
    pub fn rank(&self, label: &str) -> usize {
        self.labels
            .iter()
            .position(|l| l == label)
            .unwrap_or(self.labels.len())
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
