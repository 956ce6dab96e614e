//! Per-dialect lockfile parsers
//!
//! Every parser turns raw lockfile text into [`ParsedEntry`] values. Input
//! problems never escape [`parse_versions`]: a malformed or foreign document
//! simply yields an empty [`VersionSet`].

mod bun;
mod npm;
pub(crate) mod pnpm;
pub(crate) mod yarn;

use crate::dialect::Dialect;
use crate::error::ParseError;
use crate::types::ParsedEntry;
use crate::version_set::VersionSet;
use tracing::debug;

/// Outcome of parsing lockfile text under a filename
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockfileParse {
    Parsed {
        dialect: Dialect,
        versions: VersionSet,
    },
    /// The filename matched none of the known lockfile names
    UnknownDialect,
}

impl LockfileParse {
    /// Collapse to a version set; unknown dialects count as empty
    pub fn into_versions(self) -> VersionSet {
        match self {
            LockfileParse::Parsed { versions, .. } => versions,
            LockfileParse::UnknownDialect => VersionSet::new(),
        }
    }
}

/// Extract all entries from lockfile text
pub fn parse_entries(dialect: Dialect, text: &str) -> Result<Vec<ParsedEntry>, ParseError> {
    match dialect {
        Dialect::Npm => npm::parse(text),
        Dialect::Pnpm => Ok(pnpm::parse(text)),
        Dialect::YarnClassic => Ok(yarn::parse(yarn::Flavor::Classic, text)),
        Dialect::YarnBerry => Ok(yarn::parse(yarn::Flavor::Berry, text)),
        Dialect::Bun => bun::parse(text),
    }
}

/// Parse lockfile text, reporting why a JSON document could not be read
pub fn try_parse_versions(dialect: Dialect, text: &str) -> Result<VersionSet, ParseError> {
    parse_entries(dialect, text).map(VersionSet::from_iter)
}

/// Parse lockfile text into installed versions per package.
///
/// Malformed input degrades to an empty set.
pub fn parse_versions(dialect: Dialect, text: &str) -> VersionSet {
    try_parse_versions(dialect, text).unwrap_or_else(|e| {
        debug!(%dialect, error = %e, "lockfile could not be parsed, treating as empty");
        VersionSet::new()
    })
}

/// Detect the dialect from `filename` (and `text` for yarn) and parse
pub fn parse_lockfile(filename: &str, text: &str) -> LockfileParse {
    match Dialect::detect_with_content(filename, text) {
        Some(dialect) => LockfileParse::Parsed {
            dialect,
            versions: parse_versions(dialect, text),
        },
        None => LockfileParse::UnknownDialect,
    }
}

/// Split `name@version` on the last `@`.
///
/// The `@` must sit past index 0 so a bare scoped name like `@scope/name`
/// is not mistaken for an empty name with a version.
pub(crate) fn split_name_version(spec: &str) -> Option<(&str, &str)> {
    let at = spec.rfind('@').filter(|&at| at > 0)?;
    let name = &spec[..at];
    let version = spec[at + 1..].trim();
    if version.is_empty() {
        return None;
    }
    Some((name, version))
}

/// Strip one layer of matching single or double quotes
pub(crate) fn strip_quotes(s: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = s
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    s
}
