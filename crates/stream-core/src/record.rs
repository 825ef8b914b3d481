// File: crates/stream-core/src/record.rs
// Summary: Record and Dataset model produced by ingestion and consumed by the layout.

use chrono::NaiveDate;

/// Date format of the `Date` column.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One parsed data point. `values` is aligned with the owning dataset's keys.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    pub date: String,
    pub values: Vec<f64>,
}

impl Record {
    pub fn new(date: impl Into<String>, values: Vec<f64>) -> Self {
        Self { date: date.into(), values }
    }

    /// Parse the date text; `None` when it does not match `YYYY-MM-DD`.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }
}

pub fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).ok()
}

/// Ordered records in file order plus the series keys their values follow.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    keys: Vec<String>,
    records: Vec<Record>,
}

impl Dataset {
    /// Contract: every record carries exactly `keys.len()` values.
    pub fn new(keys: Vec<String>, records: Vec<Record>) -> Self {
        debug_assert!(records.iter().all(|r| r.values.len() == keys.len()));
        Self { keys, records }
    }

    pub fn empty(keys: Vec<String>) -> Self {
        Self { keys, records: Vec::new() }
    }

    pub fn keys(&self) -> &[String] { &self.keys }
    pub fn records(&self) -> &[Record] { &self.records }
    pub fn len(&self) -> usize { self.records.len() }
    pub fn is_empty(&self) -> bool { self.records.is_empty() }

    pub fn key_index(&self, key: &str) -> Option<usize> {
        self.keys.iter().position(|k| k == key)
    }

    /// Raw (non-stacked) values of one series over time, paired with the record date text.
    pub fn series_values(&self, key: &str) -> Option<Vec<(&str, f64)>> {
        let idx = self.key_index(key)?;
        Some(self.records.iter().map(|r| (r.date.as_str(), r.values[idx])).collect())
    }
}
