//! Ordered, id-indexed collection of catalog records.

use std::collections::{HashMap, HashSet};

use crate::error::{AppError, Result};
use crate::models::Record;

/// The full set of records loaded at startup.
///
/// Order is the order of the source index and never changes.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<Record>,
    positions: HashMap<u64, usize>,
}

impl Catalog {
    /// Build a catalog from records in source order.
    ///
    /// When an id repeats, lookups resolve to its first occurrence.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut positions = HashMap::with_capacity(records.len());
        for (pos, record) in records.iter().enumerate() {
            positions.entry(record.id).or_insert(pos);
        }
        Self { records, positions }
    }

    /// Parse a JSON array of records.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let records: Vec<Record> = serde_json::from_slice(bytes)
            .map_err(|e| AppError::catalog(format!("invalid catalog index: {e}")))?;
        Ok(Self::from_records(records))
    }

    pub fn get(&self, id: u64) -> Option<&Record> {
        self.positions.get(&id).map(|&pos| &self.records[pos])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    /// Records whose line range is inverted or starts at zero.
    pub fn range_violations(&self) -> Vec<&Record> {
        self.records
            .iter()
            .filter(|r| !r.has_valid_range())
            .collect()
    }

    /// Ids that occur more than once, in order of their second occurrence.
    pub fn duplicate_ids(&self) -> Vec<u64> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        let mut duplicates = Vec::new();
        for record in &self.records {
            if !seen.insert(record.id) && reported.insert(record.id) {
                duplicates.push(record.id);
            }
        }
        duplicates
    }
}
