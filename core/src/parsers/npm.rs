//! package-lock.json / npm-shrinkwrap.json

use super::ParsedEntry;
use crate::error::ParseError;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::trace;

const NODE_MODULES: &str = "node_modules/";

#[derive(Debug, Deserialize)]
struct PackageLock {
    /// npm v7+: flattened install tree keyed by install path
    packages: Option<Map<String, Value>>,
    /// npm v6 (lockfileVersion 1): nested dependency tree
    dependencies: Option<Map<String, Value>>,
}

#[derive(Debug, Default, Deserialize)]
struct PackageEntry {
    name: Option<String>,
    version: Option<String>,
}

pub(super) fn parse(text: &str) -> Result<Vec<ParsedEntry>, ParseError> {
    let lock: PackageLock = serde_json::from_str(text)?;

    let mut entries = Vec::new();
    if let Some(packages) = &lock.packages {
        parse_packages(packages, &mut entries);
    } else if let Some(dependencies) = &lock.dependencies {
        parse_legacy_dependencies(dependencies, &mut entries);
    } else {
        return Err(ParseError::Shape("missing `packages` object"));
    }

    Ok(entries)
}

fn parse_packages(packages: &Map<String, Value>, entries: &mut Vec<ParsedEntry>) {
    for (key, value) in packages {
        // Root project
        if key.is_empty() {
            continue;
        }

        let entry = PackageEntry::deserialize(value).unwrap_or_default();
        let Some(version) = entry.version.filter(|v| !v.is_empty()) else {
            trace!(key = %key, "skipping npm entry without version");
            continue;
        };

        let name = entry
            .name
            .filter(|name| !name.is_empty())
            .or_else(|| name_from_install_path(key).map(String::from));

        match name {
            Some(name) => entries.push(ParsedEntry::new(name, version, key.as_str())),
            None => trace!(key = %key, "skipping npm entry without resolvable name"),
        }
    }
}

/// Name of the package installed at `path`, e.g. `node_modules/a/node_modules/@s/b` -> `@s/b`
fn name_from_install_path(path: &str) -> Option<&str> {
    let at = path.rfind(NODE_MODULES)?;
    let name = path[at + NODE_MODULES.len()..].trim_end_matches('/');
    (!name.is_empty()).then_some(name)
}

fn parse_legacy_dependencies(deps: &Map<String, Value>, entries: &mut Vec<ParsedEntry>) {
    for (name, data) in deps {
        if let Some(version) = data.get("version").and_then(Value::as_str)
            && !version.is_empty()
        {
            entries.push(ParsedEntry::new(name.as_str(), version, name.as_str()));
        }

        if let Some(nested) = data.get("dependencies").and_then(Value::as_object) {
            parse_legacy_dependencies(nested, entries);
        }
    }
}
