use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One discoverable item on the listing page
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    /// Display name, non-empty after trimming
    pub name: String,

    /// Absolute URL of the record's detail page
    pub url: String,
}

impl Record {
    /// Create a new record
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Insertion-ordered collection of records, deduplicated by the exact
/// (name, url) pair. Two records sharing a name but pointing at different
/// URLs are distinct entries.
#[derive(Debug, Default, Clone)]
pub struct ResultSet {
    records: Vec<Record>,
    seen: HashSet<Record>,
}

impl ResultSet {
    /// Create an empty result set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, silently skipping exact duplicates.
    /// Returns true if the record was newly added.
    pub fn insert(&mut self, record: Record) -> bool {
        if self.seen.contains(&record) {
            ::log::trace!("skipping duplicate record: {}", record.url);
            return false;
        }
        self.seen.insert(record.clone());
        self.records.push(record);
        true
    }

    /// Merge another result set into this one, keeping insertion order and
    /// the pair-dedup rule. Merging the same set again is a no-op.
    pub fn merge(&mut self, other: ResultSet) {
        for record in other.records {
            self.insert(record);
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The records in insertion order
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Consume the set, yielding the records in insertion order
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }
}

impl IntoIterator for ResultSet {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl FromIterator<Record> for ResultSet {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        let mut set = ResultSet::new();
        for record in iter {
            set.insert(record);
        }
        set
    }
}
