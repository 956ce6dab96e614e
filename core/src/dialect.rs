use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Lockfile grammar, determined from the lockfile's filename
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Dialect {
    Npm,
    Pnpm,
    YarnClassic,
    YarnBerry,
    /// bun's text lockfile (JSON with comments and trailing commas)
    Bun,
}

/// Filename suffixes in detection order
const SUFFIXES: &[(&str, Dialect)] = &[
    ("package-lock.json", Dialect::Npm),
    ("npm-shrinkwrap.json", Dialect::Npm),
    ("pnpm-lock.yaml", Dialect::Pnpm),
    ("yarn.lock", Dialect::YarnClassic),
    ("bun.lock", Dialect::Bun),
];

impl Dialect {
    /// Detect the dialect from a filename. Full paths are reduced to their basename.
    ///
    /// `yarn.lock` always maps to [`Dialect::YarnClassic`] here; use
    /// [`Dialect::detect_with_content`] to tell berry lockfiles apart.
    pub fn detect(filename: &str) -> Option<Dialect> {
        let basename = Path::new(filename)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(filename);

        SUFFIXES
            .iter()
            .find(|(suffix, _)| basename.ends_with(suffix))
            .map(|(_, dialect)| *dialect)
    }

    /// Detect the dialect from a filename, refining `yarn.lock` to berry when
    /// the text carries a `__metadata:` block.
    pub fn detect_with_content(filename: &str, text: &str) -> Option<Dialect> {
        match Self::detect(filename)? {
            Dialect::YarnClassic if is_berry_lockfile(text) => Some(Dialect::YarnBerry),
            dialect => Some(dialect),
        }
    }

    /// Canonical lockfile name for this dialect
    pub fn lockfile_name(self) -> &'static str {
        match self {
            Dialect::Npm => "package-lock.json",
            Dialect::Pnpm => "pnpm-lock.yaml",
            Dialect::YarnClassic | Dialect::YarnBerry => "yarn.lock",
            Dialect::Bun => "bun.lock",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dialect::Npm => "npm",
            Dialect::Pnpm => "pnpm",
            Dialect::YarnClassic => "yarn-classic",
            Dialect::YarnBerry => "yarn-berry",
            Dialect::Bun => "bun",
        };
        f.write_str(name)
    }
}

fn is_berry_lockfile(text: &str) -> bool {
    text.lines().any(|line| line.trim_end() == "__metadata:")
}
