use anyhow::{Context, Result, bail};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// Where one side of the diff reads its lockfile text from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockfileSource {
    /// A file on disk
    File(PathBuf),
    /// `git show <rev>:./<path>`, run inside `repo_dir`
    GitRevision {
        repo_dir: PathBuf,
        rev: String,
        path: String,
    },
}

impl LockfileSource {
    /// Read the lockfile text. A lockfile absent from the source yields `None`.
    pub fn read(&self) -> Result<Option<String>> {
        match self {
            LockfileSource::File(path) => {
                if !path.exists() {
                    debug!(path = %path.display(), "lockfile not on disk");
                    return Ok(None);
                }
                let content = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                Ok(Some(content))
            }
            LockfileSource::GitRevision {
                repo_dir,
                rev,
                path,
            } => read_git_revision(repo_dir, rev, path),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            LockfileSource::File(path) => path.display().to_string(),
            LockfileSource::GitRevision { rev, path, .. } => format!("{rev}:{path}"),
        }
    }
}

fn read_git_revision(repo_dir: &Path, rev: &str, path: &str) -> Result<Option<String>> {
    let object = format!("{rev}:./{path}");
    let output = Command::new("git")
        .arg("-C")
        .arg(repo_dir)
        .args(["show", &object])
        .output()
        .context("Failed to run git")?;

    if output.status.success() {
        return Ok(Some(String::from_utf8_lossy(&output.stdout).into_owned()));
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    if is_missing_path(&stderr) {
        debug!(%object, "lockfile not present at revision");
        return Ok(None);
    }

    bail!("git show {object} failed: {}", stderr.trim());
}

/// Whether git's error means the path does not exist at that revision
fn is_missing_path(stderr: &str) -> bool {
    stderr.contains("does not exist in")
        || stderr.contains("exists on disk, but not in")
}
