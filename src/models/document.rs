//! Transient state of the document currently on screen.

use chrono::{DateTime, Utc};

use crate::models::LineRange;

/// The artifact currently shown, with its active decoration.
///
/// Replaced as a whole on every applied selection.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayedDocument {
    pub record_id: u64,
    pub content: String,
    pub decoration: Option<LineRange>,
    pub fetched_at: DateTime<Utc>,
}

impl DisplayedDocument {
    pub fn line_count(&self) -> usize {
        self.content.lines().count()
    }
}
