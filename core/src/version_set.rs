use crate::types::ParsedEntry;
use std::collections::hash_map::{self, HashMap};
use std::collections::HashSet;

/// Installed versions per package name.
///
/// A name is only ever present together with at least one version.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionSet {
    packages: HashMap<String, HashSet<String>>,
}

impl VersionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `version` of `name` is installed.
    ///
    /// Returns false when either half is empty or the pair was already present.
    pub fn insert(&mut self, name: &str, version: &str) -> bool {
        if name.is_empty() || version.is_empty() {
            return false;
        }

        match self.packages.get_mut(name) {
            Some(versions) => versions.insert(version.to_string()),
            None => {
                self.packages.insert(
                    name.to_string(),
                    HashSet::from([version.to_string()]),
                );
                true
            }
        }
    }

    /// Versions installed for `name`
    pub fn get(&self, name: &str) -> Option<&HashSet<String>> {
        self.packages.get(name)
    }

    pub fn contains(&self, name: &str, version: &str) -> bool {
        self.get(name).is_some_and(|versions| versions.contains(version))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.packages.keys().map(String::as_str)
    }

    pub fn iter(&self) -> hash_map::Iter<'_, String, HashSet<String>> {
        self.packages.iter()
    }

    /// Number of distinct package names
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

impl Extend<ParsedEntry> for VersionSet {
    fn extend<I: IntoIterator<Item = ParsedEntry>>(&mut self, entries: I) {
        for entry in entries {
            self.insert(&entry.name, &entry.version);
        }
    }
}

impl FromIterator<ParsedEntry> for VersionSet {
    fn from_iter<I: IntoIterator<Item = ParsedEntry>>(entries: I) -> Self {
        let mut set = VersionSet::new();
        set.extend(entries);
        set
    }
}

impl<'a> IntoIterator for &'a VersionSet {
    type Item = (&'a String, &'a HashSet<String>);
    type IntoIter = hash_map::Iter<'a, String, HashSet<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
