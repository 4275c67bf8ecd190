//! Catalog record data structure.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::ArtifactNaming;

/// One row of the defect catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Identifier assigned when the corpus was built
    pub id: u64,

    /// Project the defect was taken from
    #[serde(default)]
    pub project_name: String,

    /// First line of the defect region (1-based, inclusive)
    pub start_line: usize,

    /// Last line of the defect region (1-based, inclusive)
    pub end_line: usize,

    /// Content hash of the buggy file
    pub defect_file_hash: String,

    /// Descriptive fields carried for display only
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Record {
    /// Build the retrieval key of the buggy artifact.
    ///
    /// The key is `{prefix}{id}{separator}{defectFileHash}{extension}`,
    /// e.g. `bug-42-abc123.java` with the default naming.
    pub fn retrieval_key(&self, naming: &ArtifactNaming) -> String {
        format!(
            "{}{}{}{}{}",
            naming.prefix, self.id, naming.separator, self.defect_file_hash, naming.extension
        )
    }

    /// The defect region as recorded in the catalog.
    pub fn line_range(&self) -> LineRange {
        LineRange::new(self.start_line, self.end_line)
    }

    /// Whether `startLine <= endLine` and both are positive.
    pub fn has_valid_range(&self) -> bool {
        self.start_line >= 1 && self.start_line <= self.end_line
    }

    /// Render a descriptive field as display text.
    pub fn display_field(&self, name: &str) -> Option<String> {
        match self.extra.get(name)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// Inclusive, 1-based range of whole lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

impl LineRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Whether `line` (1-based) lies inside the range.
    pub fn contains(&self, line: usize) -> bool {
        self.start <= line && line <= self.end
    }

    /// Number of lines covered, zero for an inverted range.
    pub fn len(&self) -> usize {
        if self.start > self.end {
            0
        } else {
            self.end - self.start + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fit the range into a document of `line_count` lines.
    ///
    /// A start of zero is raised to line 1 and the end is lowered to the last
    /// line. Returns `None` when nothing of the range is left.
    pub fn clamp_to(&self, line_count: usize) -> Option<LineRange> {
        let start = self.start.max(1);
        let end = self.end.min(line_count);
        if line_count == 0 || start > end {
            return None;
        }
        Some(LineRange::new(start, end))
    }
}
