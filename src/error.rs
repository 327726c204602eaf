//! Error types for parameter parsing, configuration and export

use thiserror::Error;

/// Errors raised when building or validating a `SimulationParams`
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParamError {
    #[error("Malformed value {value:?} for {field}: {reason}")]
    Malformed {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("Unknown value {value:?} for {field}")]
    UnknownVariant { field: &'static str, value: String },

    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },

    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f64 },

    #[error("{field} must be between {min} and {max} (got {value})")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// Errors raised while writing or reading a CSV export or scenario file
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid row {line}: {reason}")]
    Parse { line: u64, reason: String },

    #[error("Invalid scenario {name:?}: {source}")]
    Scenario {
        name: String,
        #[source]
        source: ParamError,
    },
}

/// Errors raised while reading runtime configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value {value:?} for {var}: {reason}")]
    InvalidEnv {
        var: &'static str,
        value: String,
        reason: String,
    },
}
