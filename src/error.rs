//! Error types for the converter.
//!
//! Per-row problems never show up here: invalid rows are dropped and logged.
//! Only structural failures (unreadable required input, a failed report
//! command) abort the run.

use thiserror::Error;

/// Result type alias for converter operations
pub type Result<T> = std::result::Result<T, SheetError>;

/// Errors that abort a run.
#[derive(Error, Debug)]
pub enum SheetError {
    /// Failed to open or read a required input file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reader error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The external ledger binary exited unsuccessfully
    #[error("ledger command exited with {status}")]
    Ledger { status: std::process::ExitStatus },
}
