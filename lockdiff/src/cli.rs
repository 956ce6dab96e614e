use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Show which installed package versions changed between two lockfile revisions
#[derive(Parser, Debug, Clone)]
#[command(name = "lockdiff")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to project directory (defaults to current directory)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Git revision to read the base lockfile from
    #[arg(short, long, value_name = "REV", default_value = "HEAD")]
    pub base_ref: String,

    /// Git revision to read the current lockfile from (defaults to the working tree)
    #[arg(short, long, value_name = "REV")]
    pub current_ref: Option<String>,

    /// Read the base lockfile from this file instead of git
    #[arg(long, value_name = "FILE", conflicts_with = "base_ref")]
    pub base_file: Option<PathBuf>,

    /// Read the current lockfile from this file
    #[arg(long, value_name = "FILE", conflicts_with = "current_ref")]
    pub current_file: Option<PathBuf>,

    /// Lockfile name, e.g. pnpm-lock.yaml (detected from PATH by default)
    #[arg(short, long, value_name = "NAME")]
    pub lockfile: Option<String>,

    /// Print the diff as JSON
    #[arg(long)]
    pub json: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn project_path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}
