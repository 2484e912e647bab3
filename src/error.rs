//! Error types for the document lifecycle core.
//!
//! The taxonomy is deliberately small: `NotFound` and `Conflict` are terminal
//! for the current operation, `Validation` always carries the complete
//! violation list so a caller can present every problem at once, and
//! `Storage` wraps failures surfaced by the persistence collaborator.

use thiserror::Error;

/// Main error type for document operations.
#[derive(Debug, Error)]
pub enum DocError {
    #[error("{what} not found: {id}")]
    NotFound { what: &'static str, id: String },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl DocError {
    pub fn not_found(what: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            what,
            id: id.to_string(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    /// A validation failure with a single violation.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(vec![message.into()])
    }

    /// All violation messages, or an empty slice for non-validation errors.
    pub fn violations(&self) -> &[String] {
        match self {
            Self::Validation(list) => list,
            _ => &[],
        }
    }
}

/// Result type alias for document operations.
pub type DocResult<T> = Result<T, DocError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_joins_all_messages() {
        let err = DocError::Validation(vec!["ssn is required".into(), "email is required".into()]);
        let text = err.to_string();
        assert!(text.contains("ssn is required"));
        assert!(text.contains("email is required"));
    }

    #[test]
    fn test_violations_accessor() {
        let err = DocError::validation("missing signature");
        assert_eq!(err.violations(), &["missing signature".to_string()]);

        let err = DocError::conflict("document is not in draft status");
        assert!(err.violations().is_empty());
    }
}
