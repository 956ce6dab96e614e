use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Helper to create a temporary project directory
pub struct TempProject {
    pub dir: TempDir,
}

impl TempProject {
    /// Create a new temporary project
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp directory");
        Self { dir }
    }

    /// Get the path to the project directory
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Create a file in the project with the given content
    pub fn create_file(&self, relative_path: &str, content: &str) {
        let file_path = self.dir.path().join(relative_path);

        // Create parent directories if needed
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }

        fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Get the absolute path to a file in the project
    pub fn file_path(&self, relative_path: &str) -> PathBuf {
        self.dir.path().join(relative_path)
    }

    /// Run git inside the project, panicking on failure
    pub fn git(&self, args: &[&str]) {
        let output = Command::new("git")
            .arg("-C")
            .arg(self.dir.path())
            .args([
                "-c",
                "user.name=lockdiff",
                "-c",
                "user.email=lockdiff@example.com",
                "-c",
                "commit.gpgsign=false",
                "-c",
                "init.defaultBranch=main",
            ])
            .args(args)
            .output()
            .expect("Failed to run git");
        assert!(
            output.status.success(),
            "git {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }

    /// Initialize a repository and commit everything currently in the project
    pub fn commit_all(&self, message: &str) {
        if !self.dir.path().join(".git").exists() {
            self.git(&["init", "-q"]);
        }
        self.git(&["add", "-A"]);
        self.git(&["commit", "-q", "--allow-empty", "-m", message]);
    }
}

impl Default for TempProject {
    fn default() -> Self {
        Self::new()
    }
}

/// pnpm lockfile before an upgrade
pub fn sample_pnpm_base() -> &'static str {
    r#"lockfileVersion: '6.0'

dependencies:
  lodash:
    specifier: ^4.17.20
    version: 4.17.20

packages:

  /lodash@4.17.20:
    resolution: {integrity: sha512-a}
    dev: false

  /left-pad@1.3.0:
    resolution: {integrity: sha512-b}
    dev: false
"#
}

/// pnpm lockfile after an upgrade
pub fn sample_pnpm_current() -> &'static str {
    r#"lockfileVersion: '6.0'

dependencies:
  lodash:
    specifier: ^4.17.21
    version: 4.17.21

packages:

  /lodash@4.17.21:
    resolution: {integrity: sha512-c}
    dev: false

  /@types/node@20.4.1:
    resolution: {integrity: sha512-d}
    dev: true
"#
}

/// npm lockfile with a single dependency
pub fn sample_package_lock() -> &'static str {
    r#"{
  "name": "app",
  "lockfileVersion": 3,
  "packages": {
    "": { "name": "app" },
    "node_modules/express": {
      "version": "4.18.2"
    }
  }
}
"#
}
