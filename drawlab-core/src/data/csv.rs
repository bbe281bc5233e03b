//! CSV ingestion — `date,slot,outcome` rows into a DrawSeries.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::series::{DrawSeries, IngestError};

#[derive(Debug, Deserialize)]
struct CsvRow {
    date: String,
    slot: String,
    outcome: String,
}

/// Read a draw history from CSV with a `date,slot,outcome` header.
///
/// Duplicate `(date, slot)` keys overwrite, matching the triple interface.
pub fn read_draws<R: Read>(reader: R) -> Result<DrawSeries, IngestError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut rows: Vec<CsvRow> = Vec::new();
    for row in csv_reader.deserialize() {
        rows.push(row?);
    }
    DrawSeries::from_triples(
        rows.iter()
            .map(|r| (r.date.as_str(), r.slot.as_str(), r.outcome.as_str())),
    )
}

/// Read a draw history from a CSV file on disk.
pub fn load_draws(path: impl AsRef<Path>) -> Result<DrawSeries, IngestError> {
    let file = std::fs::File::open(path)?;
    read_draws(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_well_formed_csv() {
        let data = "\
date,slot,outcome
2025-01-01,09:00 AM,12
2025-01-01,01:00 PM,00
2025-01-02,09:00 AM,5
";
        let series = read_draws(data.as_bytes()).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.get(1).unwrap().outcome.label(), "00");
    }

    #[test]
    fn reports_the_offending_row() {
        let data = "\
date,slot,outcome
2025-01-01,09:00 AM,12
2025-01-01,01:00 PM,99
";
        let err = read_draws(data.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("row 1"));
    }
}
