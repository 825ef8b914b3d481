// File: crates/stream-core/src/ingest.rs
// Summary: Comma-separated text to Dataset conversion with silent rejection of non-numeric rows.

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::config::SeriesConfig;
use crate::record::{Dataset, Record};

/// Parse `text` against the default five-entity configuration.
pub fn parse(text: &str) -> Dataset {
    parse_with(text, &SeriesConfig::default())
}

/// Parse `text` into records carrying the configured date column and one value per series.
///
/// The first line names the fields. Every later non-empty line is split on commas (no quoting),
/// zipped with the header names and trimmed. A row is kept only if every configured series
/// column starts with a finite number (trailing text such as `%` is ignored); anything else
/// is dropped without error.
pub fn parse_with(text: &str, config: &SeriesConfig) -> Dataset {
    let keys: Vec<String> = config.keys().map(str::to_string).collect();
    let text = text.trim();
    if text.is_empty() {
        return Dataset::empty(keys);
    }

    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let headers = match rdr.headers() {
        Ok(h) => h.clone(),
        Err(err) => {
            debug!(%err, "unreadable header line");
            return Dataset::empty(keys);
        }
    };
    let date_ix = column(&headers, &config.date_column);
    let value_ix: Vec<Option<usize>> = keys.iter().map(|k| column(&headers, k)).collect();

    let mut records = Vec::new();
    let mut dropped = 0usize;
    for row in rdr.records() {
        let Ok(row) = row else {
            dropped += 1;
            continue;
        };
        match to_record(&row, date_ix, &value_ix) {
            Some(rec) => records.push(rec),
            None => dropped += 1,
        }
    }
    debug!(kept = records.len(), dropped, "parsed csv rows");
    Dataset::new(keys, records)
}

/// Later duplicates of a header name win.
fn column(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().enumerate().filter(|(_, h)| *h == name).map(|(i, _)| i).last()
}

/// Longest leading decimal number of `text`, ignoring whatever follows it (`"85%"` reads as 85).
fn leading_number(text: &str) -> Option<f64> {
    let b = text.as_bytes();
    let digits = |mut i: usize| {
        while i < b.len() && b[i].is_ascii_digit() {
            i += 1;
        }
        i
    };
    let mut end = 0;
    if matches!(b.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let int_end = digits(end);
    let mut seen = int_end > end;
    end = int_end;
    if b.get(end) == Some(&b'.') {
        let frac_end = digits(end + 1);
        if frac_end > end + 1 || seen {
            seen |= frac_end > end + 1;
            end = frac_end;
        }
    }
    if !seen {
        return None;
    }
    if matches!(b.get(end), Some(b'e' | b'E')) {
        let mut i = end + 1;
        if matches!(b.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let exp_end = digits(i);
        if exp_end > i {
            end = exp_end;
        }
    }
    text[..end].trim_end_matches('.').parse().ok()
}

fn to_record(row: &StringRecord, date_ix: Option<usize>, value_ix: &[Option<usize>]) -> Option<Record> {
    let field = |ix: Option<usize>| ix.and_then(|i| row.get(i));
    let values = value_ix
        .iter()
        .map(|&ix| field(ix).and_then(leading_number).filter(|v| v.is_finite()))
        .collect::<Option<Vec<f64>>>()?;
    let date = field(date_ix).unwrap_or_default().to_string();
    Some(Record::new(date, values))
}
