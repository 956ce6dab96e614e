use crate::types::{ChangeKind, CitedRecord};
use colored::Colorize;
use std::collections::BTreeSet;

/// Renders lockfile diff records in a table format
pub struct DiffRenderer {
    show_colors: bool,
}

impl DiffRenderer {
    pub fn new(show_colors: bool) -> Self {
        Self { show_colors }
    }

    /// Render all records to stdout
    pub fn render(&self, records: &[CitedRecord]) {
        for line in self.render_lines(records) {
            println!("{line}");
        }
    }

    /// Render all records as output lines
    pub fn render_lines(&self, records: &[CitedRecord]) -> Vec<String> {
        if records.is_empty() {
            return vec!["No dependency changes.".to_string()];
        }

        // Calculate column widths
        let max_name = records
            .iter()
            .map(|r| r.record.name.len())
            .max()
            .unwrap_or(0);

        let max_from = records
            .iter()
            .map(|r| join_versions(&r.record.removed).len())
            .max()
            .unwrap_or(0);

        let max_to = records
            .iter()
            .map(|r| join_versions(&r.record.added).len())
            .max()
            .unwrap_or(0);

        let mut lines = vec![format!("Dependency changes ({}):\n", records.len())];
        lines.extend(
            records
                .iter()
                .map(|record| self.format_row(record, max_name, max_from, max_to)),
        );
        lines
    }

    fn format_row(
        &self,
        cited: &CitedRecord,
        name_width: usize,
        from_width: usize,
        to_width: usize,
    ) -> String {
        let from = join_versions(&cited.record.removed);
        let to = join_versions(&cited.record.added);
        let kind = self.format_kind(cited.kind);

        let citation = match (cited.base_line, cited.current_line) {
            (Some(base), Some(current)) => format!("  (base L{base}, current L{current})"),
            (Some(base), None) => format!("  (base L{base})"),
            (None, Some(current)) => format!("  (current L{current})"),
            (None, None) => String::new(),
        };

        format!(
            "  {:<name_w$}  {:>from_w$} → {:<to_w$}  {}{}",
            cited.record.name,
            from,
            to,
            kind,
            citation,
            name_w = name_width,
            from_w = from_width,
            to_w = to_width,
        )
    }

    /// Format change kind with optional colors
    pub fn format_kind(&self, kind: ChangeKind) -> String {
        let (label, painted) = match kind {
            ChangeKind::Added => ("added", "added".green()),
            ChangeKind::Removed => ("removed", "removed".red()),
            ChangeKind::Changed => ("changed", "changed".yellow()),
        };
        if self.show_colors {
            painted.to_string()
        } else {
            label.to_string()
        }
    }
}

fn join_versions(versions: &BTreeSet<String>) -> String {
    if versions.is_empty() {
        return "-".to_string();
    }
    versions
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
