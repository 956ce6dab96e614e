//! Multi-dialect JavaScript lockfile parsing and version diffing.
//!
//! ```
//! use lockdiff_core::{Dialect, diff, parse_versions};
//!
//! let base = r#"{"packages": {"node_modules/foo": {"version": "1.0.0"}}}"#;
//! let current = r#"{"packages": {"node_modules/foo": {"version": "1.1.0"}}}"#;
//!
//! let dialect = Dialect::detect("package-lock.json").unwrap();
//! let records = diff(&parse_versions(dialect, base), &parse_versions(dialect, current));
//! assert_eq!(records.len(), 1);
//! ```

pub mod dialect;
pub mod diff;
pub mod error;
pub mod locate;
pub mod output;
pub mod parsers;
pub mod types;
pub mod version_set;

// Re-export commonly used types at crate root
pub use dialect::Dialect;
pub use diff::{diff, sort_records};
pub use error::ParseError;
pub use locate::locate_line;
pub use output::DiffRenderer;
pub use parsers::{LockfileParse, parse_entries, parse_lockfile, parse_versions, try_parse_versions};
pub use types::{ChangeKind, CitedRecord, DiffRecord, ParsedEntry};
pub use version_set::VersionSet;
