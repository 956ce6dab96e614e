use anyhow::{Result, bail};
use lockdiff_core::{
    CitedRecord, Dialect, DiffRecord, VersionSet, diff, locate_line, parse_versions, sort_records,
};
use serde::Serialize;
use tracing::debug;

/// Text of one side of the diff
#[derive(Debug, Clone, Copy)]
pub struct Side<'a> {
    pub dialect: Dialect,
    pub text: &'a str,
}

impl<'a> Side<'a> {
    /// Detect the dialect of `text` under `lockfile_name`; absent lockfiles read as empty
    pub fn detect(lockfile_name: &str, text: Option<&'a str>) -> Result<Self> {
        let text = text.unwrap_or_default();
        let Some(dialect) = Dialect::detect_with_content(lockfile_name, text) else {
            bail!("Unrecognized lockfile: {lockfile_name}");
        };
        Ok(Self { dialect, text })
    }

    fn versions(self) -> VersionSet {
        parse_versions(self.dialect, self.text)
    }

    fn locate(self, name: &str, version: &str) -> Option<usize> {
        locate_line(self.dialect, self.text, name, version)
    }
}

/// Diff between the base and current revision of one lockfile
#[derive(Debug, Clone, Serialize)]
pub struct LockfileReport {
    pub lockfile: String,
    pub base_dialect: Dialect,
    pub current_dialect: Dialect,
    pub changes: Vec<CitedRecord>,
}

impl LockfileReport {
    /// Parse both sides, diff them and cite source lines, sorted by package name
    pub fn build(lockfile: &str, base: Side<'_>, current: Side<'_>) -> Self {
        let (base_versions, current_versions) =
            rayon::join(|| base.versions(), || current.versions());
        debug!(
            base = base_versions.len(),
            current = current_versions.len(),
            "parsed lockfile packages"
        );

        let mut records = diff(&base_versions, &current_versions);
        sort_records(&mut records);

        let changes = records
            .into_iter()
            .map(|record| cite(record, base, current))
            .collect();

        Self {
            lockfile: lockfile.to_string(),
            base_dialect: base.dialect,
            current_dialect: current.dialect,
            changes,
        }
    }

    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }
}

fn cite(record: DiffRecord, base: Side<'_>, current: Side<'_>) -> CitedRecord {
    let base_line = record
        .removed
        .iter()
        .find_map(|version| base.locate(&record.name, version));
    let current_line = record
        .added
        .iter()
        .find_map(|version| current.locate(&record.name, version));

    CitedRecord {
        kind: record.kind(),
        record,
        base_line,
        current_line,
    }
}
