//! Best-effort mapping from a resolved (name, version) back to a lockfile line
//!
//! Used for citations only: a miss is a normal outcome and callers simply
//! omit the line.

use crate::dialect::Dialect;
use crate::parsers::pnpm;
use crate::parsers::yarn::{self, Flavor};
use regex::Regex;

/// How many lines past an entry key or `"name"` field to look for its `"version"` field
const ENTRY_WINDOW: usize = 30;

/// Line (1-indexed) of the entry for `name` at `version`, if one can be found
pub fn locate_line(dialect: Dialect, text: &str, name: &str, version: &str) -> Option<usize> {
    let lines: Vec<&str> = text.lines().collect();

    let index = match dialect {
        Dialect::Npm => locate_npm(&lines, name, version),
        Dialect::Pnpm => locate_pnpm(&lines, name, version),
        Dialect::YarnClassic => return locate_yarn(Flavor::Classic, text, name, version),
        Dialect::YarnBerry => return locate_yarn(Flavor::Berry, text, name, version),
        Dialect::Bun => locate_bun(&lines, name, version),
    };

    index.map(|i| i + 1)
}

/// `"<field>": "<value>"` with the value matched literally
fn field_pattern(field: &str, value: &str) -> Option<Regex> {
    Regex::new(&format!(r#""{field}"\s*:\s*"{}""#, regex::escape(value))).ok()
}

fn locate_npm(lines: &[&str], name: &str, version: &str) -> Option<usize> {
    let install_key = format!("node_modules/{name}\":");
    let version_field = field_pattern("version", version)?;

    // Prefer the install path whose entry carries the requested version
    let exact = lines.iter().enumerate().find_map(|(i, line)| {
        if !line.contains(&install_key) {
            return None;
        }
        let entry_has_version = lines[i + 1..]
            .iter()
            .take_while(|next| !next.contains("\"node_modules/"))
            .take(ENTRY_WINDOW)
            .any(|next| version_field.is_match(next));
        entry_has_version.then_some(i)
    });
    if exact.is_some() {
        return exact;
    }

    let quoted_key = format!("\"node_modules/{name}\"");
    if let Some(i) = lines.iter().position(|line| line.contains(&quoted_key)) {
        return Some(i);
    }

    let name_field = field_pattern("name", name)?;
    lines.iter().position(|line| name_field.is_match(line))
}

fn locate_pnpm(lines: &[&str], name: &str, version: &str) -> Option<usize> {
    // Exact key first, with or without the pre-v9 leading slash
    let exact = lines.iter().position(|line| {
        pnpm::entry_key(line).and_then(pnpm::parse_package_key) == Some((name, version))
    });
    if exact.is_some() {
        return exact;
    }

    let needle = format!("/{name}@{version}");
    lines
        .iter()
        .position(|line| line.contains(&needle) && line.trim_end().ends_with(':'))
        .or_else(|| {
            lines
                .iter()
                .position(|line| line.trim_start().starts_with(&needle))
        })
}

fn locate_yarn(flavor: Flavor, text: &str, name: &str, version: &str) -> Option<usize> {
    yarn::scan(flavor, text)
        .into_iter()
        .find(|block| block.version.as_deref() == Some(version) && block.names(flavor, name))
        .map(|block| block.header_line)
}

fn locate_bun(lines: &[&str], name: &str, version: &str) -> Option<usize> {
    let name_field = field_pattern("name", name)?;
    let version_field = field_pattern("version", version)?;

    let record = lines.iter().enumerate().find_map(|(i, line)| {
        if !name_field.is_match(line) {
            return None;
        }
        lines[i..]
            .iter()
            .take(ENTRY_WINDOW + 1)
            .any(|next| version_field.is_match(next))
            .then_some(i)
    });
    if record.is_some() {
        return record;
    }

    let ident = format!("\"{name}@{version}\"");
    lines
        .iter()
        .position(|line| line.contains(&ident))
        .or_else(|| lines.iter().position(|line| version_field.is_match(line)))
}
