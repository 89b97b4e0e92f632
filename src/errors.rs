//! Error types for spheregeo
//!
//! Geometric failures and adapter (file / parse) failures share one enum so
//! that callers can propagate everything with `?`.

use thiserror::Error;

/// Reasons a convex hull walk can fail
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HullError {
    /// Fewer than two points were supplied
    #[error("convex hull needs at least 2 points, got {count}")]
    InsufficientPoints {
        /// Number of points supplied
        count: usize,
    },

    /// The gift-wrapping march did not return to its starting vertex
    #[error(
        "hull walk is not circular: started at {start:?}, stopped at {last:?} \
         after {visited} vertices"
    )]
    NonCircularWalk {
        /// Index the walk started from, if a start edge was found at all
        start: Option<usize>,
        /// Last index the walk reached
        last: Option<usize>,
        /// Number of vertices recorded before giving up
        visited: usize,
    },
}

/// Main error type for the spheregeo library
#[derive(Debug, Error)]
pub enum GeoError {
    /// Vectors coincide or are antipodal where a well-defined plane is required
    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    /// An argument is outside the accepted domain
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Convex hull failure
    #[error("Hull error: {0}")]
    Hull(#[from] HullError),

    /// Not enough points for the requested construction
    #[error("Need at least {required} points, found {found}")]
    InsufficientPoints {
        /// Minimum number of points the operation needs
        required: usize,
        /// Number of points available
        found: usize,
    },

    /// I/O error from the file adapters
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed coordinate line
    #[error("Parse error on line {line}: {message}")]
    Parse {
        /// 1-based line number
        line: usize,
        /// What was wrong with the line
        message: String,
    },

    /// GeoJSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for spheregeo operations
pub type Result<T> = std::result::Result<T, GeoError>;

/// Helper to build a `DegenerateInput` error
pub fn degenerate(what: impl Into<String>) -> GeoError {
    GeoError::DegenerateInput(what.into())
}
