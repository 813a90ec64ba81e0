//! Error types for the player data pipeline.
//!
//! - [`CsvError`] - reading, decoding, parsing and writing tables
//! - [`PipelineError`] - top-level orchestration errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// CSV Errors
// =============================================================================

/// Errors while reading or writing a table.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to read or write a file.
    #[error("Failed to access '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid CSV structure (ragged rows, bad quoting, ...).
    #[error("Invalid CSV format: {0}")]
    Parse(String),

    /// Empty file (not even a header row).
    #[error("CSV file is empty")]
    EmptyFile,

    /// A column the pipeline consumes is absent.
    #[error("Missing column '{column}' in {table}")]
    MissingColumn { table: String, column: String },

    /// A cell holds a value that cannot be interpreted.
    #[error("Invalid value in {table}, line {line}, column '{column}' (value '{value}'): {message}")]
    InvalidValue {
        table: String,
        line: usize,
        column: String,
        value: String,
        message: String,
    },
}

impl From<csv::Error> for CsvError {
    fn from(err: csv::Error) -> Self {
        CsvError::Parse(err.to_string())
    }
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level pipeline errors.
///
/// This is the error type returned by [`crate::run_pipeline`]. Any error
/// aborts the whole run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// One of the four input files does not exist.
    #[error("File not found: {}", .0.display())]
    MissingInput(PathBuf),

    /// CSV error.
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    /// Output directory or artifact error.
    #[error("IO error on '{path}': {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for CSV operations.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        let csv_err = CsvError::EmptyFile;
        let pipeline_err: PipelineError = csv_err.into();
        assert!(pipeline_err.to_string().contains("empty"));

        let csv_err = CsvError::MissingColumn {
            table: "player profiles".into(),
            column: "place_of_birth".into(),
        };
        let pipeline_err: PipelineError = csv_err.into();
        assert!(pipeline_err.to_string().contains("place_of_birth"));
    }

    #[test]
    fn test_invalid_value_format() {
        let err = CsvError::InvalidValue {
            table: "market values".into(),
            line: 5,
            column: "value".into(),
            value: "abc".into(),
            message: "not a number".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("in market values, line 5"));
        assert!(msg.contains("column 'value'"));
        assert!(msg.contains("value 'abc'"));
    }

    #[test]
    fn test_missing_input_mentions_path() {
        let err = PipelineError::MissingInput(PathBuf::from("data/team_details.csv"));
        assert_eq!(err.to_string(), "File not found: data/team_details.csv");
    }
}
