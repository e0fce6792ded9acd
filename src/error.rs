//! # Error Types
//!
//! This module defines error types used throughout the bug library.

use thiserror::Error;

/// Main error type for bug operations
#[derive(Debug, Error)]
pub enum BugError {
    /// Structurally invalid BUG text (empty input, row or column overflow)
    #[error("Format error: {0}")]
    Format(String),

    /// Operation the codec cannot perform (header-only decode)
    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    /// Image processing error from the generic image collaborator
    #[error("Image error: {0}")]
    Image(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used by the codec.
pub type Result<T> = std::result::Result<T, BugError>;
