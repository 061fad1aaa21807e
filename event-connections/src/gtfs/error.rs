use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading a GTFS feed from disk.
#[derive(Debug, Error)]
pub enum GtfsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("GTFS file not found: {}", .0.display())]
    MissingFile(PathBuf),
    #[error("{file} is missing required column {column}")]
    MissingColumn {
        file: &'static str,
        column: &'static str,
    },
    #[error("{file} line {line}: invalid {column} {value:?}")]
    InvalidField {
        file: &'static str,
        line: u64,
        column: &'static str,
        value: String,
    },
}
