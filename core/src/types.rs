use serde::Serialize;
use std::collections::BTreeSet;

/// A (name, version) pair extracted from lockfile text
///
/// `raw_key` and `line` are diagnostic only: aggregation keeps just the pair,
/// and [`locate_line`](crate::locate_line) finds citations by scanning the
/// text again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedEntry {
    /// Package name (may be scoped, e.g. `@scope/name`)
    pub name: String,
    /// Resolved version
    pub version: String,
    /// Key the entry was found under (JSON key, YAML key or block header)
    pub raw_key: String,
    /// Line of the entry (1-indexed), for line-based dialects
    pub line: Option<usize>,
}

impl ParsedEntry {
    pub fn new(name: impl Into<String>, version: impl Into<String>, raw_key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            raw_key: raw_key.into(),
            line: None,
        }
    }

    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

/// Kind of change a diff record describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Added,
    Removed,
    Changed,
}

/// Versions of one package present on only one side of a diff
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffRecord {
    pub name: String,
    /// Versions only in the base lockfile
    pub removed: BTreeSet<String>,
    /// Versions only in the current lockfile
    pub added: BTreeSet<String>,
}

impl DiffRecord {
    pub fn kind(&self) -> ChangeKind {
        match (self.removed.is_empty(), self.added.is_empty()) {
            (true, _) => ChangeKind::Added,
            (false, true) => ChangeKind::Removed,
            (false, false) => ChangeKind::Changed,
        }
    }
}

/// A diff record with source line citations for both sides
#[derive(Debug, Clone, Serialize)]
pub struct CitedRecord {
    #[serde(flatten)]
    pub record: DiffRecord,
    pub kind: ChangeKind,
    /// Line of the first removed version in the base lockfile (1-indexed)
    pub base_line: Option<usize>,
    /// Line of the first added version in the current lockfile (1-indexed)
    pub current_line: Option<usize>,
}
