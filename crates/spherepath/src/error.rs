//! Error types for path generation.

use thiserror::Error;

/// Errors that can occur while generating a toolpath.
#[derive(Error, Debug)]
pub enum PathError {
    /// Path settings are out of range.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    /// A single generator parameter is out of range.
    #[error("invalid parameter '{name}' = {value}: {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: f64,
        /// What the value must satisfy.
        reason: &'static str,
    },

    /// A point has no defined orientation.
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),
}

/// Result type for path generation.
pub type Result<T> = std::result::Result<T, PathError>;
