//! Error types for vector-table loading and benchmark-file parsing.
//!
//! Undefined statistics (a correlation or accuracy requested over zero scored
//! items, or over zero-variance input) are deliberately NOT errors: they are
//! surfaced as `Option<f64>::None` by the pipelines and rendered as `NA` in
//! reports, so they stay distinguishable from a legitimate score of `0.0`.
//! Out-of-vocabulary words are not errors either; they only move the
//! missing/total counters.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias for fallible vecbench operations.
pub type EvalResult<T> = Result<T, EvalError>;

/// Top-level error type for loading and parsing.
#[derive(Debug, Error)]
pub enum EvalError {
    /// IO failure with the offending path attached.
    #[error("IO error reading {path}: {source}")]
    Io {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Malformed header or row in a vector or benchmark file.
    #[error("format error in {path} at line {line}: {message}")]
    Format {
        /// File containing the malformed line.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// What was wrong with the line.
        message: String,
    },

    /// A row's Euclidean norm was below epsilon during normalization.
    ///
    /// Dividing by a near-zero norm would silently produce NaN or infinite
    /// components, so the load fails instead.
    #[error("degenerate vector for word {word:?} at row {row}: norm {norm:e} is below epsilon")]
    DegenerateVector {
        /// Word whose vector is degenerate.
        word: String,
        /// Row index in the table.
        row: usize,
        /// The offending norm.
        norm: f64,
    },
}

impl EvalError {
    /// Build an IO error for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        EvalError::Io {
            path: path.into(),
            source,
        }
    }

    /// Build a format error for `path` at 1-based `line`.
    pub fn format(path: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        EvalError::Format {
            path: path.into(),
            line,
            message: message.into(),
        }
    }
}
