//! pnpm-lock.yaml
//!
//! Only the top-level `packages:` block is read, with a line scanner rather
//! than a YAML parser: keys are all we need and pnpm's quoting of them varies
//! between lockfile versions.

use super::{ParsedEntry, split_name_version, strip_quotes};
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    OutsideBlock,
    InBlock,
}

pub(super) fn parse(text: &str) -> Vec<ParsedEntry> {
    let mut entries = Vec::new();
    let mut state = State::OutsideBlock;

    for (index, line) in text.lines().enumerate() {
        if is_top_level_key(line) {
            state = if line.trim_end() == "packages:" {
                State::InBlock
            } else {
                State::OutsideBlock
            };
            continue;
        }

        if state == State::OutsideBlock {
            continue;
        }

        let Some(key) = entry_key(line) else {
            continue;
        };

        match parse_package_key(key) {
            Some((name, version)) => {
                entries.push(ParsedEntry::new(name, version, key).at_line(index + 1));
            }
            None => trace!(key, "skipping pnpm key without version"),
        }
    }

    entries
}

/// Non-indented `key:` line, e.g. `packages:` or `snapshots:`
fn is_top_level_key(line: &str) -> bool {
    !line.starts_with([' ', '\t']) && line.trim_end().ends_with(':')
}

/// Key of a two-space-indented `  key:` line
pub(crate) fn entry_key(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("  ")?;
    if rest.starts_with([' ', '\t']) {
        return None;
    }
    rest.trim_end().strip_suffix(':').map(str::trim_end)
}

/// Split a package key like `/@scope/name@1.2.3(peer@2.0.0)` into name and version
pub(crate) fn parse_package_key(key: &str) -> Option<(&str, &str)> {
    let key = strip_quotes(key.trim());
    let key = key.strip_prefix('/').unwrap_or(key);
    let core = match key.find('(') {
        Some(paren) => &key[..paren],
        None => key,
    };
    split_name_version(core)
}
