//! Result and error types for arialoc.

use thiserror::Error;

use crate::diagnostics::NotFoundError;

/// Result type for arialoc operations
pub type LocatorResult<T> = Result<T, LocatorError>;

/// Errors that can occur while parsing or resolving a semantic locator
#[derive(Debug, Error)]
pub enum LocatorError {
    /// Malformed locator syntax
    #[error("Invalid semantic locator at position {position}: {message}")]
    Parse {
        /// Error message
        message: String,
        /// Byte offset into the locator string
        position: usize,
    },

    /// No element matched (only raised by single-element lookups)
    #[error("{0}")]
    NotFound(Box<NotFoundError>),

    /// A tree collaborator broke its contract (e.g. results out of document order)
    #[error("Internal invariant violated: {message}")]
    InvariantViolation {
        /// Error message
        message: String,
    },

    /// Strict lookup matched more than one element
    #[error("Semantic locator {locator} matched {count} elements, expected exactly one")]
    Ambiguous {
        /// Canonical form of the locator
        locator: String,
        /// Number of matching elements
        count: usize,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LocatorError {
    /// Create a parse error
    #[must_use]
    pub fn parse(message: impl Into<String>, position: usize) -> Self {
        Self::Parse {
            message: message.into(),
            position,
        }
    }

    /// Create an invariant violation error
    #[must_use]
    pub fn invariant(message: impl Into<String>) -> Self {
        Self::InvariantViolation {
            message: message.into(),
        }
    }

    /// Whether this is a not-found error
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// The not-found diagnostic, if this is a not-found error
    #[must_use]
    pub fn as_not_found(&self) -> Option<&NotFoundError> {
        match self {
            Self::NotFound(err) => Some(err),
            _ => None,
        }
    }
}

impl From<NotFoundError> for LocatorError {
    fn from(err: NotFoundError) -> Self {
        Self::NotFound(Box::new(err))
    }
}
