//! Error handling for PathPlanner
//!
//! Provides error types for the layers of the planner:
//! - Spline errors (structural misuse of the control point sequence)
//! - Persistence errors (malformed path documents)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Spline error type
///
/// Represents programming errors made against the control point sequence.
/// These are not recoverable by the spline; callers are expected to pass
/// only handles obtained from the spline's own accessors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SplineError {
    /// The handle does not name a control point currently in this spline
    #[error("Invalid control point reference (slot {index}, generation {generation})")]
    InvalidReference {
        /// The arena slot the handle points at.
        index: usize,
        /// The generation recorded in the handle.
        generation: u32,
    },

    /// The time increment for path iteration is unusable
    #[error("Invalid path interval {interval}: must be finite and > 0")]
    InvalidInterval {
        /// The rejected interval in seconds.
        interval: f64,
    },
}

/// Persistence error type
///
/// Represents errors found while rebuilding a spline from a stored document.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PersistenceError {
    /// A control point record (or the document itself) is unusable
    #[error("Malformed record{}: {reason}", record_suffix(.record))]
    MalformedRecord {
        /// Index of the offending control point record, `None` for the document.
        record: Option<usize>,
        /// What is wrong with the record.
        reason: String,
    },
}

fn record_suffix(record: &Option<usize>) -> String {
    record.map(|i| format!(" {}", i)).unwrap_or_default()
}

impl PersistenceError {
    /// Malformed control point record at `record`
    pub fn record(record: usize, reason: impl Into<String>) -> Self {
        PersistenceError::MalformedRecord {
            record: Some(record),
            reason: reason.into(),
        }
    }

    /// Malformed document
    pub fn document(reason: impl Into<String>) -> Self {
        PersistenceError::MalformedRecord {
            record: None,
            reason: reason.into(),
        }
    }
}

/// Main error type for PathPlanner
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Spline error
    #[error(transparent)]
    Spline(#[from] SplineError),

    /// Persistence error
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Check if this is an invalid control point reference
    pub fn is_invalid_reference(&self) -> bool {
        matches!(self, Error::Spline(SplineError::InvalidReference { .. }))
    }

    /// Check if this is a malformed persisted record
    pub fn is_malformed_record(&self) -> bool {
        matches!(
            self,
            Error::Persistence(PersistenceError::MalformedRecord { .. })
        )
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
