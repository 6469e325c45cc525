//! Error types for the CLI

use std::path::PathBuf;
use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Tree snapshot could not be loaded
    #[error("Failed to load tree {}: {source}", path.display())]
    TreeLoad {
        /// Snapshot path
        path: PathBuf,
        /// Underlying error
        source: arialoc::LocatorError,
    },

    /// Locator resolution error
    #[error("{0}")]
    Locator(#[from] arialoc::LocatorError),

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML configuration parse error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl CliError {
    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a tree load error
    #[must_use]
    pub fn tree_load(path: impl Into<PathBuf>, source: arialoc::LocatorError) -> Self {
        Self::TreeLoad {
            path: path.into(),
            source,
        }
    }

    /// Whether the error reports a locator that matched nothing
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Locator(err) if err.is_not_found())
    }
}
