//! Error types for csv2rstlib

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or rendering a table
#[derive(Error, Debug)]
pub enum Csv2RstError {
    /// Failed to open the input file
    #[error("cannot open input file '{path}': {source}")]
    InputUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to create the output file
    #[error("cannot create output file '{path}': {source}")]
    OutputUnwritable {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The input could not be parsed as CSV
    #[error("malformed CSV input: {0}")]
    MalformedInput(csv::Error),

    /// A numeric option has an unusable value
    #[error("invalid value '{value}' for {name}: {reason}")]
    InvalidOption {
        name: &'static str,
        value: String,
        reason: String,
    },

    /// The rendered table lines would not fit in memory
    #[error("table is too wide to render ({columns} columns)")]
    TooWide { columns: usize },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Csv2RstError {
    /// Why an option value was rejected, without repeating the value itself.
    pub fn reason(&self) -> String {
        match self {
            Csv2RstError::InvalidOption { reason, .. } => reason.clone(),
            other => other.to_string(),
        }
    }
}

/// Read failures surfaced by the CSV reader are IO errors, not bad CSV.
impl From<csv::Error> for Csv2RstError {
    fn from(err: csv::Error) -> Self {
        if err.is_io_error() {
            Csv2RstError::Io(std::io::Error::other(err))
        } else {
            Csv2RstError::MalformedInput(err)
        }
    }
}
