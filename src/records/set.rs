//! Ordered, append-only sequence of string records.

use serde::{Deserialize, Serialize};

/// An ordered sequence of opaque string records.
///
/// Insertion order is the canonical order. Duplicates are allowed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordSet {
    records: Vec<String>,
}

impl RecordSet {
    /// Create an empty record set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record to the end.
    pub fn push(&mut self, record: impl Into<String>) {
        self.records.push(record.into());
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Return a copy of the records selected by `limit`.
    ///
    /// - `0`: every record
    /// - `n > 0`: the first `n` records
    /// - `n < 0`: the last `|n|` records, still oldest first
    ///
    /// Limits larger than the set are clamped.
    pub fn slice(&self, limit: i64) -> Vec<String> {
        let len = self.records.len();
        let count = limit.unsigned_abs().min(len as u64) as usize;

        if limit > 0 {
            self.records[..count].to_vec()
        } else if limit < 0 {
            self.records[len - count..].to_vec()
        } else {
            self.records.clone()
        }
    }
}

impl<S: Into<String>> FromIterator<S> for RecordSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().map(Into::into).collect(),
        }
    }
}
