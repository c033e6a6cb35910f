//! Error types for G-code output.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while writing or rewriting G-code.
#[derive(Error, Debug)]
pub enum GcodeError {
    /// The output file could not be created.
    #[error("cannot create {}: {source}", path.display())]
    Create {
        /// Target path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Writing to the output file failed.
    #[error("cannot write {}: {source}", path.display())]
    Write {
        /// Target path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Scale factor must be positive and finite.
    #[error("invalid scale factor {0}")]
    InvalidScale(f64),

    /// A coordinate word has no parsable number.
    #[error("line {line}: malformed word '{word}'")]
    MalformedWord {
        /// 1-based line number.
        line: usize,
        /// The offending word.
        word: String,
    },

    /// Arc step must be positive and finite.
    #[error("invalid arc step {0} degrees")]
    InvalidArcStep(f64),

    /// The arc has no well-defined plane, radius or sweep.
    #[error("degenerate arc: {0}")]
    DegenerateArc(&'static str),

    /// Not enough lines to hold the header, footer and a body.
    #[error("input has {lines} lines, need more than {required}")]
    TooShort {
        /// Lines in the input.
        lines: usize,
        /// Header plus footer lines.
        required: usize,
    },
}

/// Result type for G-code output.
pub type Result<T> = std::result::Result<T, GcodeError>;
