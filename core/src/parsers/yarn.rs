//! yarn.lock, both the v1 "classic" format and the YAML-flavoured berry format
//!
//! ```text
//! "foo@^1.0.0", "foo@^1.1.0":          "foo@npm:^1.0.0, foo@npm:^1.1.0":
//!   version "1.1.0"                      version: 1.1.0
//!   resolved "https://..."               resolution: "foo@npm:1.1.0"
//! ```
//!
//! Both flavours share one block scanner so that parsing and line location
//! always agree on what a block is.

use super::{ParsedEntry, strip_quotes};
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flavor {
    Classic,
    Berry,
}

impl Flavor {
    /// Whether a top-level line may begin a block header
    fn opens_header(self, line: &str) -> bool {
        let trimmed = line.trim_end();
        if trimmed.is_empty() || is_indented(line) || trimmed.starts_with('#') {
            return false;
        }
        match self {
            Flavor::Classic => trimmed.ends_with(':') || trimmed.ends_with(','),
            Flavor::Berry => trimmed.starts_with('"') && trimmed.ends_with(':'),
        }
    }

    /// Resolved version from a body line, if the line is the version field
    fn body_version(self, line: &str) -> Option<String> {
        let value = match self {
            Flavor::Classic => line.strip_prefix("  version ")?,
            Flavor::Berry => line.strip_prefix("  version:")?,
        };
        let value = value.trim();

        let version = match self {
            Flavor::Classic => strip_quotes(value),
            Flavor::Berry => berry_scalar(value),
        };
        (!version.is_empty()).then(|| version.to_string())
    }

    /// Package name of a header specifier
    pub(crate) fn package_name(self, specifier: &str) -> Option<&str> {
        match self {
            // Last `@`, so `@scope/name@^1.0.0` keeps its scope
            Flavor::Classic => {
                let at = specifier.rfind('@').filter(|&at| at > 0)?;
                Some(&specifier[..at])
            }
            // The first `@` of a scoped name belongs to the scope
            Flavor::Berry => {
                let spec = strip_quotes(specifier);
                let at = if let Some(rest) = spec.strip_prefix('@') {
                    rest.find('@')? + 1
                } else {
                    spec.find('@')?
                };
                (at > 0).then(|| &spec[..at])
            }
        }
    }
}

/// Double-quoted, single-quoted or bare YAML scalar
fn berry_scalar(value: &str) -> &str {
    if let Some(inner) = value
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    {
        return inner;
    }
    if let Some(inner) = value
        .strip_prefix('\'')
        .and_then(|rest| rest.strip_suffix('\''))
    {
        return inner;
    }
    value
}

fn is_indented(line: &str) -> bool {
    line.starts_with([' ', '\t'])
}

/// One lockfile block: the header's specifiers and the version its body resolves to
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Block {
    /// Header text as written, without the trailing `:`
    pub header: String,
    /// Line of the first header line (1-indexed)
    pub header_line: usize,
    pub specifiers: Vec<String>,
    pub version: Option<String>,
}

impl Block {
    fn from_header(lines: &[&str], header_line: usize) -> Self {
        let joined = lines.join("\n");
        let header = joined.trim_end().trim_end_matches(':').to_string();

        let specifiers = header
            .split(',')
            .map(|spec| spec.trim().trim_end_matches(':').trim_matches('"'))
            .filter(|spec| !spec.is_empty())
            .map(String::from)
            .collect();

        Self {
            header,
            header_line,
            specifiers,
            version: None,
        }
    }

    /// Whether any specifier of this block names `name`
    pub fn names(&self, flavor: Flavor, name: &str) -> bool {
        self.specifiers
            .iter()
            .any(|spec| flavor.package_name(spec) == Some(name))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    OutsideBlock,
    InHeader,
    InBody,
}

/// Split yarn.lock text into blocks
pub(crate) fn scan(flavor: Flavor, text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut state = State::OutsideBlock;
    let mut header_lines: Vec<&str> = Vec::new();
    let mut header_line = 0;
    let mut current: Option<Block> = None;

    for (index, line) in text.lines().enumerate() {
        if state == State::InHeader {
            if line.trim().is_empty() {
                // Header never completed
                header_lines.clear();
                state = State::OutsideBlock;
                continue;
            }
            if is_indented(line) {
                // Body started before a closing `:`; keep what we have
                current = Some(Block::from_header(&header_lines, header_line));
                state = State::InBody;
            } else {
                header_lines.push(line);
                if line.trim_end().ends_with(':') {
                    current = Some(Block::from_header(&header_lines, header_line));
                    state = State::InBody;
                }
                continue;
            }
        }

        if state == State::InBody {
            if is_indented(line) {
                if let Some(block) = current.as_mut().filter(|block| block.version.is_none()) {
                    block.version = flavor.body_version(line);
                }
                continue;
            }
            if line.trim().is_empty() {
                continue;
            }
            blocks.extend(current.take());
            state = State::OutsideBlock;
        }

        if flavor.opens_header(line) {
            header_lines.clear();
            header_lines.push(line);
            header_line = index + 1;
            if line.trim_end().ends_with(':') {
                current = Some(Block::from_header(&header_lines, header_line));
                state = State::InBody;
            } else {
                state = State::InHeader;
            }
        }
    }

    blocks.extend(current);
    blocks
}

pub(super) fn parse(flavor: Flavor, text: &str) -> Vec<ParsedEntry> {
    let mut entries = Vec::new();

    for block in scan(flavor, text) {
        let Some(version) = &block.version else {
            trace!(header = %block.header, "skipping yarn block without version");
            continue;
        };

        for spec in &block.specifiers {
            if let Some(name) = flavor.package_name(spec) {
                entries.push(
                    ParsedEntry::new(name, version.as_str(), block.header.as_str())
                        .at_line(block.header_line),
                );
            }
        }
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::VersionSet;

    const CLASSIC: &str = r#"# THIS IS AN AUTOGENERATED FILE. DO NOT EDIT THIS FILE DIRECTLY.
# yarn lockfile v1


"@babel/code-frame@^7.0.0", "@babel/code-frame@^7.22.5":
  version "7.22.5"
  resolved "https://registry.yarnpkg.com/@babel/code-frame/-/code-frame-7.22.5.tgz"
  dependencies:
    "@babel/highlight" "^7.22.5"

a@^1.0.0, a@^1.1.0:
  version "1.1.0"
  resolved "https://registry.yarnpkg.com/a/-/a-1.1.0.tgz"

debug@2.6.9:
  version "2.6.9"

debug@^4.3.4:
  version "4.3.4"
  dependencies:
    ms "2.1.2"
"#;

    const BERRY: &str = r#"# This file is generated by running "yarn install" inside your project.
# Manual changes might be lost - proceed with caution!

__metadata:
  version: 8
  cacheKey: 10c0

"@babel/core@npm:^7.22.0, @babel/core@npm:^7.22.5":
  version: 7.22.5
  resolution: "@babel/core@npm:7.22.5"
  dependencies:
    debug: "npm:^4.1.0"
  checksum: 10c0/abc
  languageName: node
  linkType: hard

"lodash@npm:^4.17.21":
  version: "4.17.21"
  resolution: "lodash@npm:4.17.21"

"ms@npm:2.1.2":
  version: '2.1.2'
  resolution: "ms@npm:2.1.2"
"#;

    fn versions(flavor: Flavor, text: &str) -> VersionSet {
        parse(flavor, text).into_iter().collect()
    }

    #[test]
    fn test_classic_specifiers_collapse() {
        let set = versions(Flavor::Classic, "\"a@^1.0.0\", \"a@^1.1.0\":\n  version \"1.1.0\"\n");
        assert_eq!(set.len(), 1);
        assert_eq!(set.get("a").map(std::collections::HashSet::len), Some(1));
        assert!(set.contains("a", "1.1.0"));
    }

    #[test]
    fn test_classic_lockfile() {
        let set = versions(Flavor::Classic, CLASSIC);

        assert!(set.contains("@babel/code-frame", "7.22.5"));
        assert!(set.contains("a", "1.1.0"));
        assert!(set.contains("debug", "2.6.9"));
        assert!(set.contains("debug", "4.3.4"));
        // Dependency lines inside bodies are not blocks
        assert!(set.get("ms").is_none());
        assert!(set.get("@babel/highlight").is_none());
    }

    #[test]
    fn test_classic_wrapped_header() {
        let text = "\"very-long-package-name@^1.0.0\",\n\"very-long-package-name@~1.2.0\":\n  version \"1.2.3\"\n";
        let blocks = scan(Flavor::Classic, text);

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].specifiers.len(), 2);
        assert_eq!(blocks[0].header_line, 1);
        assert_eq!(blocks[0].version.as_deref(), Some("1.2.3"));
    }

    #[test]
    fn test_classic_version_needs_two_space_indent() {
        let text = "a@^1.0.0:\n  dependencies:\n    version \"9.9.9\"\n  version \"1.0.0\"\n";
        let set = versions(Flavor::Classic, text);
        assert!(set.contains("a", "1.0.0"));
        assert!(!set.contains("a", "9.9.9"));
    }

    #[test]
    fn test_block_without_version_is_skipped() {
        let text = "a@^1.0.0:\n  resolved \"x\"\n\nb@^2.0.0:\n  version \"2.0.0\"\n";
        let set = versions(Flavor::Classic, text);
        assert!(set.get("a").is_none());
        assert!(set.contains("b", "2.0.0"));
    }

    #[test]
    fn test_berry_lockfile() {
        let set = versions(Flavor::Berry, BERRY);

        assert_eq!(set.len(), 3);
        assert!(set.contains("@babel/core", "7.22.5"));
        assert!(set.contains("lodash", "4.17.21"));
        assert!(set.contains("ms", "2.1.2"));
        // `__metadata` is not a quoted header
        assert!(set.get("__metadata").is_none());
    }

    #[test]
    fn test_berry_package_name() {
        assert_eq!(
            Flavor::Berry.package_name("\"@scope/name@npm:^1.0.0\""),
            Some("@scope/name")
        );
        assert_eq!(
            Flavor::Berry.package_name("alias@npm:real@^1.0.0"),
            Some("alias")
        );
        assert_eq!(Flavor::Berry.package_name("@scope/name"), None);
        assert_eq!(Flavor::Berry.package_name("@broken"), None);
    }

    #[test]
    fn test_classic_package_name() {
        assert_eq!(
            Flavor::Classic.package_name("@scope/name@^1.0.0"),
            Some("@scope/name")
        );
        assert_eq!(Flavor::Classic.package_name("@scope/name"), None);
        assert_eq!(Flavor::Classic.package_name("plain"), None);
    }

    #[test]
    fn test_berry_scalar_forms() {
        assert_eq!(
            Flavor::Berry.body_version("  version: \"1.0.0\""),
            Some("1.0.0".to_string())
        );
        assert_eq!(
            Flavor::Berry.body_version("  version: '1.0.0'"),
            Some("1.0.0".to_string())
        );
        assert_eq!(
            Flavor::Berry.body_version("  version: 0.0.0-use.local"),
            Some("0.0.0-use.local".to_string())
        );
        assert_eq!(Flavor::Berry.body_version("  version:"), None);
        assert_eq!(Flavor::Berry.body_version("    version: 1.0.0"), None);
    }

    #[test]
    fn test_block_header_lines() {
        let blocks = scan(Flavor::Berry, BERRY);
        let lines: Vec<usize> = blocks.iter().map(|b| b.header_line).collect();
        assert_eq!(lines, vec![8, 17, 21]);
    }
}
