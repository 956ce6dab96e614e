pub mod cli;
pub mod detector;
pub mod report;
pub mod source;

pub use lockdiff_core::{
    ChangeKind, CitedRecord, Dialect, DiffRecord, DiffRenderer, LockfileParse, ParseError,
    VersionSet, diff, locate_line, parse_lockfile, parse_versions,
};
