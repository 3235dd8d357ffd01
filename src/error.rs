//! Error types for trueno-plot operations.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in trueno-plot operations.
///
/// Buffer and chart errors are precondition violations: callers are expected
/// to check `len()` or dimensions before asking for statistics or a grid.
#[derive(Error, Debug)]
pub enum Error {
    /// Ring buffer created with zero capacity.
    #[error("Invalid capacity: ring buffer capacity must be greater than 0")]
    InvalidCapacity,

    /// Statistic requested from a buffer with no live values.
    #[error("Empty buffer: no live samples")]
    EmptyBuffer,

    /// Statistic needs more live samples than the buffer holds.
    #[error("Insufficient samples: need at least {required}, have {actual}")]
    InsufficientSamples {
        /// Minimum number of samples.
        required: usize,
        /// Number of live samples.
        actual: usize,
    },

    /// Invalid dimensions for a chart.
    #[error("Invalid dimensions: {rows} rows x {cols} cols")]
    InvalidDimensions {
        /// Row count.
        rows: usize,
        /// Column count.
        cols: usize,
    },

    /// Scale domain error (e.g., equal domain ends).
    #[error("Scale domain error: {0}")]
    ScaleDomain(String),

    /// Color parsing error.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// Configuration parsing error with line number.
    #[error("configuration error at line {line}: {message}")]
    ConfigParse {
        /// Line number where the error occurred (1-indexed, 0 if unknown).
        line: usize,
        /// Error message describing the issue.
        message: String,
    },

    /// Configuration file not found.
    #[error("configuration file not found: {0}")]
    ConfigNotFound(String),

    /// Invalid configuration value.
    #[error("invalid configuration value for '{key}': {message}")]
    ConfigInvalid {
        /// The configuration key with invalid value.
        key: String,
        /// Error message describing why the value is invalid.
        message: String,
    },

    /// I/O error (input stream, terminal output).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
