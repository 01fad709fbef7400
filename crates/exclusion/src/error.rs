//! crates/exclusion/src/error.rs
//!
//! Error types for rule construction and session configuration.

use thiserror::Error;

/// Result type for fallible filter construction.
pub type ExcludeResult<T> = Result<T, ExcludeError>;

/// Errors raised when a rule or session is built from malformed input.
///
/// Evaluating a filter never fails; these errors only surface from
/// constructors and indicate a bug in the caller that produced the input.
#[derive(Debug, Error)]
pub enum ExcludeError {
    /// A required identifier field was empty.
    #[error("exclude rule requires a non-empty {field}")]
    EmptyPattern {
        /// Name of the offending field.
        field: &'static str,
    },
    /// A glob pattern could not be compiled.
    #[error("failed to compile exclude pattern '{pattern}': {source}")]
    InvalidGlob {
        /// The offending pattern text.
        pattern: String,
        /// Underlying glob error.
        #[source]
        source: globset::Error,
    },
    /// Session configuration was rejected.
    #[error("invalid session configuration: {0}")]
    InvalidConfig(String),
}

impl ExcludeError {
    pub(crate) const fn empty(field: &'static str) -> Self {
        Self::EmptyPattern { field }
    }
}

/// Rejects empty identifier fields.
pub(crate) fn require_non_empty(value: &str, field: &'static str) -> ExcludeResult<()> {
    if value.is_empty() {
        Err(ExcludeError::empty(field))
    } else {
        Ok(())
    }
}
