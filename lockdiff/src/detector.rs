use lockdiff_core::Dialect;
use std::path::{Path, PathBuf};

/// Lockfile names in detection order
const LOCKFILE_NAMES: &[&str] = &[
    "package-lock.json",
    "npm-shrinkwrap.json",
    "pnpm-lock.yaml",
    "yarn.lock",
    "bun.lock",
];

/// Detected lockfile in a project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedLockfile {
    /// File name relative to the project directory
    pub name: String,
    pub path: PathBuf,
}

/// Detects which lockfile a project uses
pub struct ProjectDetector {
    project_path: PathBuf,
}

impl ProjectDetector {
    pub fn new(project_path: PathBuf) -> Self {
        Self { project_path }
    }

    pub fn project_path(&self) -> &Path {
        &self.project_path
    }

    /// Check if a lock file exists and return the first one found
    pub fn detect_lockfile(&self) -> Option<DetectedLockfile> {
        LOCKFILE_NAMES.iter().find_map(|name| {
            let path = self.project_path.join(name);
            path.is_file().then(|| DetectedLockfile {
                name: (*name).to_string(),
                path,
            })
        })
    }

    /// Resolve a lockfile by name, whether or not it exists on disk yet
    pub fn lockfile(&self, name: &str) -> Option<DetectedLockfile> {
        Dialect::detect(name)?;
        Some(DetectedLockfile {
            name: name.to_string(),
            path: self.project_path.join(name),
        })
    }
}
