use crate::types::DiffRecord;
use crate::version_set::VersionSet;
use std::collections::{BTreeSet, HashSet};

/// Compare installed versions between a base and a current lockfile.
///
/// Yields one record per package whose version set differs; a package missing
/// on one side is compared against the empty set. Record order is
/// unspecified, see [`sort_records`].
pub fn diff(previous: &VersionSet, current: &VersionSet) -> Vec<DiffRecord> {
    let empty: HashSet<String> = HashSet::new();
    let names: HashSet<&str> = previous.names().chain(current.names()).collect();

    names
        .into_iter()
        .filter_map(|name| {
            let before = previous.get(name).unwrap_or(&empty);
            let after = current.get(name).unwrap_or(&empty);

            if same_versions(before, after) {
                return None;
            }

            Some(DiffRecord {
                name: name.to_string(),
                removed: only_in(before, after),
                added: only_in(after, before),
            })
        })
        .collect()
}

/// Order records by package name
pub fn sort_records(records: &mut [DiffRecord]) {
    records.sort_by(|a, b| a.name.cmp(&b.name));
}

fn same_versions(a: &HashSet<String>, b: &HashSet<String>) -> bool {
    a.len() == b.len() && a.iter().all(|version| b.contains(version))
}

fn only_in(side: &HashSet<String>, other: &HashSet<String>) -> BTreeSet<String> {
    side.difference(other).cloned().collect()
}
