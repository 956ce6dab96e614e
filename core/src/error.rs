use thiserror::Error;

/// Why a lockfile document produced no entries
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unexpected lockfile shape: {0}")]
    Shape(&'static str),
}
