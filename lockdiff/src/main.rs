use anyhow::{Context, Result, bail};
use clap::Parser;
use lockdiff_core::{Dialect, DiffRenderer};
use std::path::Path;
use tracing_subscriber::EnvFilter;

use lockdiff::cli::Args;
use lockdiff::detector::ProjectDetector;
use lockdiff::report::{LockfileReport, Side};
use lockdiff::source::LockfileSource;

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    if args.no_color {
        colored::control::set_override(false);
    }

    let project_path = args.project_path();
    if !project_path.exists() {
        bail!("Project path does not exist: {}", project_path.display());
    }

    let detector = ProjectDetector::new(project_path.clone());
    let lockfile_name = lockfile_name(&args, &detector)?;
    tracing::debug!(lockfile = %lockfile_name, "using lockfile");

    let base_source = match &args.base_file {
        Some(path) => LockfileSource::File(path.clone()),
        None => LockfileSource::GitRevision {
            repo_dir: project_path.clone(),
            rev: args.base_ref.clone(),
            path: lockfile_name.clone(),
        },
    };
    let current_source = match (&args.current_file, &args.current_ref) {
        (Some(path), _) => LockfileSource::File(path.clone()),
        (None, Some(rev)) => LockfileSource::GitRevision {
            repo_dir: project_path.clone(),
            rev: rev.clone(),
            path: lockfile_name.clone(),
        },
        (None, None) => LockfileSource::File(project_path.join(&lockfile_name)),
    };

    let base_text = base_source
        .read()
        .with_context(|| format!("Failed to read base lockfile {}", base_source.describe()))?;
    let current_text = current_source.read().with_context(|| {
        format!(
            "Failed to read current lockfile {}",
            current_source.describe()
        )
    })?;

    if base_text.is_none() && current_text.is_none() {
        bail!(
            "No {lockfile_name} found in {} or {}",
            base_source.describe(),
            current_source.describe()
        );
    }

    let base = Side::detect(&lockfile_name, base_text.as_deref())?;
    let current = Side::detect(&lockfile_name, current_text.as_deref())?;
    let report = LockfileReport::build(&lockfile_name, base, current);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        DiffRenderer::new(!args.no_color).render(&report.changes);
    }

    Ok(())
}

/// Lockfile name from `--lockfile`, the given files, or the project directory
fn lockfile_name(args: &Args, detector: &ProjectDetector) -> Result<String> {
    if let Some(name) = &args.lockfile {
        return match detector.lockfile(name) {
            Some(lockfile) => Ok(lockfile.name),
            None => bail!("Unrecognized lockfile name: {name}"),
        };
    }

    let from_files = [&args.current_file, &args.base_file]
        .into_iter()
        .flatten()
        .filter_map(|path| file_name(path))
        .find(|name| Dialect::detect(name).is_some());
    if let Some(name) = from_files {
        return Ok(name);
    }

    match detector.detect_lockfile() {
        Some(lockfile) => Ok(lockfile.name),
        None => bail!("No lockfile found in {:?}", detector.project_path()),
    }
}

fn file_name(path: &Path) -> Option<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(String::from)
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
